//! Nullable ballot book — ballots whose weight the test sets directly.

use agora_governance::{BallotBook, HostError};
use agora_types::{AccountId, Amount, BallotId, Timestamp};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// What the book remembers about one ballot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullBallot {
    pub admin: AccountId,
    pub token: AccountId,
    pub end_time: Timestamp,
    pub lock_time: Timestamp,
    pub weight: Amount,
    pub destroyed: bool,
}

pub struct NullBallotBook {
    next_id: Cell<u64>,
    ballots: RefCell<HashMap<BallotId, NullBallot>>,
    refuse_open: Cell<bool>,
}

impl NullBallotBook {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(1),
            ballots: RefCell::new(HashMap::new()),
            refuse_open: Cell::new(false),
        }
    }

    /// Record `weight` as the total weight cast on `ballot`.
    pub fn set_weight(&self, ballot: &BallotId, weight: Amount) {
        if let Some(b) = self.ballots.borrow_mut().get_mut(ballot) {
            b.weight = weight;
        }
    }

    pub fn ballot(&self, ballot: &BallotId) -> Option<NullBallot> {
        self.ballots.borrow().get(ballot).cloned()
    }

    pub fn is_destroyed(&self, ballot: &BallotId) -> bool {
        self.ballots
            .borrow()
            .get(ballot)
            .is_some_and(|b| b.destroyed)
    }

    /// Number of ballots ever opened.
    pub fn opened(&self) -> usize {
        self.ballots.borrow().len()
    }

    /// Make subsequent `open` calls fail.
    pub fn refuse_open(&self, refuse: bool) {
        self.refuse_open.set(refuse);
    }
}

impl Default for NullBallotBook {
    fn default() -> Self {
        Self::new()
    }
}

impl BallotBook for NullBallotBook {
    fn open(
        &self,
        admin: &AccountId,
        token: &AccountId,
        end_time: Timestamp,
        lock_time: Timestamp,
    ) -> Result<BallotId, HostError> {
        if self.refuse_open.get() {
            return Err(HostError::new("ballot", "ballot factory refused"));
        }
        let id = BallotId::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.ballots.borrow_mut().insert(
            id,
            NullBallot {
                admin: admin.clone(),
                token: token.clone(),
                end_time,
                lock_time,
                weight: Amount::ZERO,
                destroyed: false,
            },
        );
        Ok(id)
    }

    fn end_time(&self, ballot: &BallotId) -> Option<Timestamp> {
        self.ballots
            .borrow()
            .get(ballot)
            .filter(|b| !b.destroyed)
            .map(|b| b.end_time)
    }

    fn total_weight(&self, ballot: &BallotId) -> Amount {
        self.ballots
            .borrow()
            .get(ballot)
            .map(|b| b.weight)
            .unwrap_or(Amount::ZERO)
    }

    fn destroy(&self, ballot: &BallotId) {
        if let Some(b) = self.ballots.borrow_mut().get_mut(ballot) {
            b.destroyed = true;
        }
    }
}
