//! Pyramid (dungeon) state.

use crate::core::constants::PYRAMID_MAX_STEPS;
use serde::{Deserialize, Serialize};

fn default_pyramid_max_steps() -> u32 {
    PYRAMID_MAX_STEPS
}

/// Progress through the fixed-length pyramid sub-map.
///
/// Every field is optional in saved snapshots; an old save without them
/// loads as "not in the pyramid".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonState {
    #[serde(default)]
    pub in_pyramid: bool,
    #[serde(default)]
    pub pyramid_steps: u32,
    #[serde(default = "default_pyramid_max_steps")]
    pub pyramid_max_steps: u32,
    /// Map steps to restore once the pyramid is left.
    #[serde(default)]
    pub normal_map_steps: u32,
}

impl Default for DungeonState {
    fn default() -> Self {
        Self::new(PYRAMID_MAX_STEPS)
    }
}

impl DungeonState {
    pub fn new(max_steps: u32) -> Self {
        Self {
            in_pyramid: false,
            pyramid_steps: 0,
            pyramid_max_steps: max_steps,
            normal_map_steps: 0,
        }
    }

    /// Enter the pyramid, remembering where the outer map left off.
    /// Returns false if already inside.
    pub fn enter(&mut self, map_steps: u32) -> bool {
        if self.in_pyramid {
            return false;
        }
        self.in_pyramid = true;
        self.pyramid_steps = 0;
        self.normal_map_steps = map_steps;
        true
    }

    /// Leave the pyramid. Returns the map steps to restore, or `None` when
    /// not inside.
    pub fn exit(&mut self) -> Option<u32> {
        if !self.in_pyramid {
            return None;
        }
        self.in_pyramid = false;
        self.pyramid_steps = 0;
        Some(self.normal_map_steps)
    }

    pub fn advance(&mut self) {
        if self.in_pyramid {
            self.pyramid_steps += 1;
        }
    }

    pub fn remaining(&self) -> u32 {
        self.pyramid_max_steps.saturating_sub(self.pyramid_steps)
    }

    pub fn is_complete(&self) -> bool {
        self.in_pyramid && self.pyramid_steps >= self.pyramid_max_steps
    }
}
