//! Serializable session snapshot.
//!
//! Field-for-field copy of the persistent state. New fields must be
//! additive with `#[serde(default)]` so older snapshots keep loading.

use crate::character::Player;
use crate::combat::BattleState;
use crate::core::game_state::WorldState;
use crate::enhancement::EnhancementRecord;
use crate::events::DirectionHints;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub run_id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub player: Player,
    #[serde(default)]
    pub world: WorldState,
    #[serde(default)]
    pub battle: BattleState,
    #[serde(default)]
    pub enhancement: EnhancementRecord,
    /// Paths on offer when the save was made. Absent mid-battle.
    #[serde(default)]
    pub hints: Option<DirectionHints>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(blob: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(blob)
    }
}
