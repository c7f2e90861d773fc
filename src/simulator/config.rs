//! Simulation configuration.

use crate::combat::EnemyKind;
use crate::core::constants::START_POTIONS;

/// Configuration for a batch of simulated battles.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of battles to simulate
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random). Run `i` uses `seed + i`.
    pub seed: Option<u64>,

    /// Map difficulty the enemy is scaled for
    pub difficulty: u32,

    /// Fight with pyramid scaling and rewards
    pub in_pyramid: bool,

    pub enemy_kind: EnemyKind,

    /// Rounds before a battle counts as timed out
    pub max_rounds: u32,

    /// Potions the fresh player starts with
    pub potions: u32,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            difficulty: 1,
            in_pyramid: false,
            enemy_kind: EnemyKind::Monster,
            max_rounds: 200,
            potions: START_POTIONS,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for one enemy type at one difficulty
    pub fn enemy_balance_test(enemy_kind: EnemyKind, difficulty: u32) -> Self {
        Self {
            num_runs: 200,
            enemy_kind,
            difficulty,
            ..Default::default()
        }
    }

    /// Quick config for pyramid fights
    pub fn pyramid_balance_test(difficulty: u32) -> Self {
        Self {
            num_runs: 200,
            difficulty,
            in_pyramid: true,
            ..Default::default()
        }
    }

    /// No potions: every death ends the run
    pub fn hardcore(enemy_kind: EnemyKind, difficulty: u32) -> Self {
        Self {
            potions: 0,
            ..Self::enemy_balance_test(enemy_kind, difficulty)
        }
    }
}
