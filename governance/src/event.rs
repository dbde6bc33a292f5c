//! Events emitted by the engine.
//!
//! Events form an append-only log. They are observable but never read back
//! by the engine to make decisions.

use crate::config::{CampaignConfig, VotingConfig};
use agora_types::{AccountId, Amount, Asset, BallotId, Timestamp};
use std::cell::RefCell;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GovernanceEvent {
    // ── Decoded previews (emitted by preview and again when applying) ─────
    CrowdFundingPreview {
        ballot: BallotId,
        config: CampaignConfig,
        beneficiary: AccountId,
    },
    MinterApprovalPreview {
        ballot: BallotId,
        minter: AccountId,
        amount: Amount,
    },
    RetirementPreview {
        ballot: BallotId,
        successor: AccountId,
    },
    GrantPreview {
        ballot: BallotId,
        recipient: AccountId,
        amount: Amount,
        asset: Asset,
    },
    SettingsPreview {
        ballot: BallotId,
        admin: AccountId,
        config: VotingConfig,
    },

    // ── Outcomes ──────────────────────────────────────────────────────────
    BallotCreated {
        ballot: BallotId,
        proposer: AccountId,
        end_time: Timestamp,
        lock_time: Timestamp,
    },
    MinterApproved {
        minter: AccountId,
        amount: Amount,
    },
    CampaignCreated {
        campaign: AccountId,
        beneficiary: AccountId,
        allowance: Amount,
    },
    SystemChanged {
        successor: AccountId,
        swept_to: AccountId,
        swept: Amount,
    },
    GrantGiven {
        recipient: AccountId,
        amount: Amount,
        asset: Asset,
    },
    SettingsChanged {
        admin: AccountId,
        config: VotingConfig,
    },
    PaymentReceived {
        from: AccountId,
        amount: Amount,
    },
    ProposalClosed {
        ballot: BallotId,
        passed: bool,
    },
}

impl GovernanceEvent {
    /// Whether this is one of the decoded-preview events.
    pub fn is_preview(&self) -> bool {
        matches!(
            self,
            Self::CrowdFundingPreview { .. }
                | Self::MinterApprovalPreview { .. }
                | Self::RetirementPreview { .. }
                | Self::GrantPreview { .. }
                | Self::SettingsPreview { .. }
        )
    }
}

type Listener = Box<dyn Fn(&GovernanceEvent)>;

/// Append-only event log with synchronous fan-out to subscribers.
///
/// Listeners run inline on the emitting call and must not subscribe
/// further listeners from inside a callback.
#[derive(Default)]
pub struct EventLog {
    entries: RefCell<Vec<GovernanceEvent>>,
    listeners: RefCell<Vec<Listener>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: Listener) {
        self.listeners.borrow_mut().push(listener);
    }

    pub fn emit(&self, event: GovernanceEvent) {
        self.entries.borrow_mut().push(event.clone());
        for listener in self.listeners.borrow().iter() {
            listener(&event);
        }
    }

    /// A copy of every event emitted so far, oldest first.
    pub fn snapshot(&self) -> Vec<GovernanceEvent> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn listeners_see_events_in_order() {
        let log = EventLog::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        log.subscribe(Box::new(move |e| sink.borrow_mut().push(e.clone())));

        let first = GovernanceEvent::PaymentReceived {
            from: AccountId::new("a"),
            amount: Amount::new(1),
        };
        let second = GovernanceEvent::ProposalClosed {
            ballot: BallotId::new(3),
            passed: false,
        };
        log.emit(first.clone());
        log.emit(second.clone());

        assert_eq!(*seen.borrow(), vec![first.clone(), second.clone()]);
        assert_eq!(log.snapshot(), vec![first, second]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn preview_classification() {
        let preview = GovernanceEvent::RetirementPreview {
            ballot: BallotId::new(1),
            successor: AccountId::new("v2"),
        };
        let outcome = GovernanceEvent::MinterApproved {
            minter: AccountId::new("m"),
            amount: Amount::new(5),
        };
        assert!(preview.is_preview());
        assert!(!outcome.is_preview());
    }
}
