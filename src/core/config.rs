use super::constants::*;
use serde::{Deserialize, Serialize};

/// Per-run knobs. Everything else is a tuning constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub starting_map_goal: u32,
    pub map_goal_increment: u32,
    pub pyramid_length: u32,
    /// Steps on a fresh map during which the pyramid entrance is suppressed.
    pub early_game_guard_steps: u32,
    pub enemy_attack_delay_ms: u64,
    pub auto_spin_interval_ms: u64,
    pub message_history_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_map_goal: DEFAULT_MAP_GOAL,
            map_goal_increment: MAP_GOAL_INCREMENT,
            pyramid_length: PYRAMID_MAX_STEPS,
            early_game_guard_steps: EARLY_GAME_GUARD_STEPS,
            enemy_attack_delay_ms: ENEMY_ATTACK_DELAY_MS,
            auto_spin_interval_ms: AUTO_SPIN_INTERVAL_MS,
            message_history_limit: MESSAGE_HISTORY_LIMIT,
        }
    }
}
