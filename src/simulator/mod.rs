//! Battle balance simulator for Monte Carlo analysis.
//!
//! Run thousands of seeded auto-battles to analyze:
//! - Win rate per enemy type and difficulty
//! - Rounds per fight and potion usage
//! - Gold, XP and drop payouts
//!
//! The simulator drives the same round resolution, enemy AI and victory
//! code as a live session.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{BattleRun, SimReport};
pub use runner::{run_simulation, simulate_single_battle};
