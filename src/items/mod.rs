//! Item system: types, static catalog, equipment, generation and loot drops.

pub mod catalog;
pub mod drops;
pub mod equipment;
pub mod generation;
pub mod types;

pub use catalog::*;
pub use drops::*;
pub use equipment::*;
pub use generation::*;
pub use types::*;
