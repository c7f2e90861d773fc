//! Pyramid sub-map: bounded length, scaled enemies, dungeon loot.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
