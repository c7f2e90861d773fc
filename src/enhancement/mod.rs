//! Trading-post item enhancement.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
