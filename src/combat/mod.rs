//! Slot-machine combat: battle state, symbol effects and outcomes.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
