//! Stake Clicker: an idle staking game economy.
//!
//! [`economy`] holds the state machine (upgrades, production, milestones,
//! achievements) and its save format. [`session`] ties it to a frame clock,
//! a storage backend and a wallet. [`wallet`] submits scores to the on-chain
//! leaderboard.

pub mod console;
pub mod economy;
pub mod session;
pub mod time;
pub mod wallet;

pub use economy::{EconomyError, Engine};
pub use session::{Action, ActionOutcome, Session, SessionConfig, SubmitError};
