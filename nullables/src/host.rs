//! A complete set of nullable collaborators.

use crate::{NullBallotBook, NullClock, NullCrowdfunding, NullToken, NullTreasury};
use agora_governance::Collaborators;
use agora_types::{AccountId, Amount};
use std::rc::Rc;

/// Nullable collaborators sharing one clock, with handles kept for the test.
pub struct NullHost {
    pub clock: Rc<NullClock>,
    pub ballots: Rc<NullBallotBook>,
    pub token: Rc<NullToken>,
    pub treasury: Rc<NullTreasury>,
    pub crowdfunding: Rc<NullCrowdfunding>,
}

impl NullHost {
    /// Collaborators for a system identified by `system`, starting at
    /// `now_secs` with a governance token of `supply`.
    pub fn new(system: impl Into<AccountId>, now_secs: u64, supply: Amount) -> Self {
        let system = system.into();
        Self {
            clock: Rc::new(NullClock::new(now_secs)),
            ballots: Rc::new(NullBallotBook::new()),
            token: Rc::new(NullToken::new("governance-token", system.clone(), supply)),
            treasury: Rc::new(NullTreasury::new(system)),
            crowdfunding: Rc::new(NullCrowdfunding::new()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            clock: self.clock.clone(),
            ballots: self.ballots.clone(),
            token: self.token.clone(),
            treasury: self.treasury.clone(),
            crowdfunding: self.crowdfunding.clone(),
        }
    }
}
