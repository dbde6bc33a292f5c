//! Fundamental types for the Agora governance engine.
//!
//! This crate defines the primitives shared by every other crate in the workspace:
//! account identities, amounts, timestamps, ballot identities and asset references.

pub mod account;
pub mod amount;
pub mod asset;
pub mod ballot;
pub mod time;

pub use account::AccountId;
pub use amount::{Amount, UNIT};
pub use asset::Asset;
pub use ballot::BallotId;
pub use time::{Timestamp, DAY_SECS};
