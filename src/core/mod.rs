//! Session core: constants, randomness, messages, world state, the deferred
//! task queue and the session orchestrator.

pub mod config;
pub mod constants;
pub mod game_state;
pub mod messages;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod snapshot;

pub use config::*;
pub use constants::*;
pub use game_state::*;
pub use messages::*;
pub use rng::*;
pub use scheduler::*;
pub use session::*;
pub use snapshot::*;
