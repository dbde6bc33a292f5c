//! Nullable infrastructure for deterministic testing.
//!
//! Every collaborator the governance engine drives (clock, ballots, token,
//! treasury, crowdfunding) has an in-memory implementation here that:
//! - Returns deterministic values
//! - Can be controlled programmatically (weights, supply, refusals)
//! - Can run a callback in the middle of a transfer, to exercise re-entry
//!
//! Usage: build a [`NullHost`], hand its `collaborators()` to the engine,
//! and drive the nullables from the test.

pub mod ballots;
pub mod clock;
pub mod crowdfunding;
pub mod host;
pub mod token;
pub mod treasury;

pub use ballots::{NullBallot, NullBallotBook};
pub use clock::NullClock;
pub use crowdfunding::{NullCampaign, NullCrowdfunding};
pub use host::NullHost;
pub use token::NullToken;
pub use treasury::NullTreasury;
