//! Ballot identity type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a ballot minted by the ballot collaborator.
///
/// Every proposal gets a fresh ballot, so a ballot identity also names
/// the proposal it was opened for.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BallotId(u64);

impl BallotId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for BallotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BallotId({:#x})", self.0)
    }
}

impl fmt::Display for BallotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ballot-{:08x}", self.0)
    }
}
