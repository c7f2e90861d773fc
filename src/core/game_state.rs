//! World state shared by the event handlers: map progress, pyramid state
//! and temporary buffs.

use super::constants::DEFAULT_MAP_GOAL;
use crate::dungeon::DungeonState;
use serde::{Deserialize, Serialize};

/// Progress on the current outer map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapState {
    pub map_steps: u32,
    pub map_goal: u32,
    /// Never decreases; starts at 1.
    pub difficulty: u32,
    #[serde(default)]
    pub has_encountered_caravan_rest: bool,
}

impl Default for MapState {
    fn default() -> Self {
        Self::new(DEFAULT_MAP_GOAL)
    }
}

impl MapState {
    pub fn new(goal: u32) -> Self {
        Self {
            map_steps: 0,
            map_goal: goal.max(1),
            difficulty: 1,
            has_encountered_caravan_rest: false,
        }
    }

    pub fn progress(&self) -> f64 {
        self.map_steps as f64 / self.map_goal as f64
    }

    pub fn goal_reached(&self) -> bool {
        self.map_steps >= self.map_goal
    }

    /// Start the next map: steps reset, difficulty +1, goal +`increment`.
    pub fn next_map(&mut self, increment: u32) {
        self.map_steps = 0;
        self.difficulty += 1;
        self.map_goal += increment;
        self.has_encountered_caravan_rest = false;
    }

    /// `2^(difficulty-1)`, the scale applied to most event payouts.
    pub fn payout_scale(&self) -> f64 {
        2f64.powi(self.difficulty as i32 - 1)
    }
}

/// Temporary effects granted by events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Buffs {
    /// Hint generations left that heal 5% of max hp and stamina.
    pub oasis_blessing: u32,
    /// Hint generations left that force one good event.
    pub bandit_info: u32,
    /// Hint generations left that reveal event names.
    pub compass_effect: u32,
    /// Gold added to the next victory.
    pub bandits_loot: u64,
    /// Next trading-post purchase is discounted.
    pub shop_discount: bool,
}

impl Buffs {
    /// Decrement a counter, returning whether it was active.
    pub fn consume(counter: &mut u32) -> bool {
        if *counter == 0 {
            return false;
        }
        *counter -= 1;
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    pub map: MapState,
    #[serde(default)]
    pub dungeon: DungeonState,
    #[serde(default)]
    pub buffs: Buffs,
}

impl WorldState {
    pub fn difficulty(&self) -> u32 {
        self.map.difficulty
    }

    pub fn in_pyramid(&self) -> bool {
        self.dungeon.in_pyramid
    }

    /// Count one move on whichever map the player is on.
    pub fn advance_step(&mut self) {
        if self.dungeon.in_pyramid {
            self.dungeon.advance();
        } else {
            self.map.map_steps += 1;
        }
    }

    pub fn next_map(&mut self, increment: u32) {
        self.map.next_map(increment);
        tracing::info!(
            difficulty = self.map.difficulty,
            goal = self.map.map_goal,
            "advanced to next map"
        );
    }
}
