//! Desert Quest - encounter and combat core for a desert-exploration RPG.
//!
//! The player picks one of three directions, each hiding a weighted event
//! with optional branch overlays. Encounters resolve into battles fought
//! with three slot symbols per round, shops, narrative choices or a trip
//! into the pyramid. Everything draws from an injected `rand::Rng`, so a
//! seeded or scripted source makes a whole session reproducible.
//!
//! [`GameSession`] is the entry point; the submodules expose the pieces it
//! is built from for testing and balance work.

pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod enhancement;
pub mod events;
pub mod items;
pub mod save_manager;
pub mod simulator;

pub use crate::character::Player;
pub use crate::combat::{BattleState, EnemyKind, Symbol};
pub use crate::core::{
    GameSession, MessageLog, MessageSink, Panel, ScriptedRng, SessionConfig, Snapshot, WorldState,
};
pub use crate::events::{Direction, EventId, EventRegistry};
pub use crate::save_manager::{PersistenceError, SaveManager};
