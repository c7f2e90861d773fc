//! Exploration events: the registry, direction hints, branch overlays and
//! the handlers behind every event category.

pub mod branches;
pub mod choices;
pub mod context;
pub mod directions;
pub mod dispatcher;
pub mod outcomes;
pub mod registry;
pub mod shops;

pub use branches::*;
pub use choices::*;
pub use context::*;
pub use directions::*;
pub use dispatcher::*;
pub use outcomes::*;
pub use registry::*;
pub use shops::*;
