//! Narrative feedback sink.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::constants::MESSAGE_HISTORY_LIMIT;

/// Receives user-facing feedback lines from the simulation.
pub trait MessageSink {
    fn display(&mut self, text: &str);
}

/// Bounded message history, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageLog {
    entries: VecDeque<String>,
    limit: usize,
}

impl MessageLog {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit: limit.max(1),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any retained line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.contains(needle))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new(MESSAGE_HISTORY_LIMIT)
    }
}

impl MessageSink for MessageLog {
    fn display(&mut self, text: &str) {
        if self.entries.len() >= self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(text.to_string());
    }
}

/// Discards everything. Used by the simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl MessageSink for NullSink {
    fn display(&mut self, _text: &str) {}
}
