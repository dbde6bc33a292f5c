//! Pending proposals keyed by ballot identity.

use crate::action::{Action, ActionKind};
use crate::error::GovernanceError;
use agora_types::BallotId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A pending governance decision: selector, encoded arguments, active flag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceAction {
    pub active: bool,
    pub kind: ActionKind,
    pub payload: Vec<u8>,
}

impl GovernanceAction {
    pub fn decode(&self) -> Result<Action, GovernanceError> {
        Action::decode(self.kind, &self.payload)
    }
}

/// One proposal per ballot. Deleted entries are indistinguishable from
/// entries that never existed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProposalRegistry {
    entries: HashMap<BallotId, GovernanceAction>,
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an active proposal for a freshly opened ballot.
    pub fn create(
        &mut self,
        ballot: BallotId,
        kind: ActionKind,
        payload: Vec<u8>,
    ) -> Result<(), GovernanceError> {
        if self.is_active(&ballot) {
            return Err(GovernanceError::DuplicateBallot(ballot));
        }
        self.entries.insert(
            ballot,
            GovernanceAction {
                active: true,
                kind,
                payload,
            },
        );
        Ok(())
    }

    /// Clear the active flag. Idempotent.
    pub fn deactivate(&mut self, ballot: &BallotId) {
        if let Some(entry) = self.entries.get_mut(ballot) {
            entry.active = false;
        }
    }

    /// Remove the entry entirely.
    pub fn delete(&mut self, ballot: &BallotId) -> Option<GovernanceAction> {
        self.entries.remove(ballot)
    }

    pub fn get(&self, ballot: &BallotId) -> Option<&GovernanceAction> {
        self.entries.get(ballot)
    }

    pub fn is_active(&self, ballot: &BallotId) -> bool {
        self.entries.get(ballot).is_some_and(|e| e.active)
    }

    /// The entry for `ballot` if it is active; absent and inactive entries
    /// both fail with `BallotNotFound`.
    pub fn active(&self, ballot: &BallotId) -> Result<&GovernanceAction, GovernanceError> {
        self.entries
            .get(ballot)
            .filter(|e| e.active)
            .ok_or(GovernanceError::BallotNotFound(*ballot))
    }

    /// Transition an active entry into execution: the flag is cleared before
    /// the caller sees the action, so a second attempt finds nothing to run.
    pub fn begin_execution(
        &mut self,
        ballot: &BallotId,
    ) -> Result<GovernanceAction, GovernanceError> {
        let snapshot = self.active(ballot)?.clone();
        self.deactivate(ballot);
        Ok(snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ballot(n: u64) -> BallotId {
        BallotId::new(n)
    }

    #[test]
    fn create_then_get_active() {
        let mut registry = ProposalRegistry::new();
        registry
            .create(ballot(1), ActionKind::Retire, vec![1, 2, 3])
            .unwrap();
        let entry = registry.active(&ballot(1)).unwrap();
        assert!(entry.active);
        assert_eq!(entry.kind, ActionKind::Retire);
        assert_eq!(entry.payload, vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_active_ballot_rejected() {
        let mut registry = ProposalRegistry::new();
        registry.create(ballot(1), ActionKind::Grant, vec![]).unwrap();
        assert!(matches!(
            registry.create(ballot(1), ActionKind::Retire, vec![]),
            Err(GovernanceError::DuplicateBallot(_))
        ));
    }

    #[test]
    fn inactive_and_missing_look_the_same() {
        let mut registry = ProposalRegistry::new();
        registry.create(ballot(1), ActionKind::Grant, vec![]).unwrap();
        registry.deactivate(&ballot(1));
        registry.deactivate(&ballot(1));

        assert!(matches!(
            registry.active(&ballot(1)),
            Err(GovernanceError::BallotNotFound(b)) if b == ballot(1)
        ));
        assert!(matches!(
            registry.active(&ballot(2)),
            Err(GovernanceError::BallotNotFound(b)) if b == ballot(2)
        ));
    }

    #[test]
    fn begin_execution_only_once() {
        let mut registry = ProposalRegistry::new();
        registry
            .create(ballot(7), ActionKind::ApproveMinter, vec![9])
            .unwrap();

        let taken = registry.begin_execution(&ballot(7)).unwrap();
        assert!(taken.active);
        assert!(!registry.is_active(&ballot(7)));
        assert!(registry.get(&ballot(7)).is_some());
        assert!(registry.begin_execution(&ballot(7)).is_err());

        registry.delete(&ballot(7));
        assert!(registry.get(&ballot(7)).is_none());
        assert!(registry.is_empty());
    }
}
