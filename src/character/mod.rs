//! Player model and progression.

pub mod player;
pub mod progression;

pub use player::*;
pub use progression::*;
