//! Interfaces of the external components the engine drives.
//!
//! All of them take `&self`: they are independent components with their own
//! storage, and any of them may call back into the engine before returning.

use crate::config::CampaignConfig;
use crate::error::HostError;
use agora_types::{AccountId, Amount, BallotId, Timestamp};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Caller identity and the value attached to a call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallContext {
    pub caller: AccountId,
    pub value: Amount,
}

impl CallContext {
    pub fn new(caller: impl Into<AccountId>, value: Amount) -> Self {
        Self {
            caller: caller.into(),
            value,
        }
    }
}

/// The ballot component: weighted votes for one proposal each.
pub trait BallotBook {
    /// Open a ballot that closes at `end_time` and keeps voting power locked
    /// until `lock_time`.
    fn open(
        &self,
        admin: &AccountId,
        token: &AccountId,
        end_time: Timestamp,
        lock_time: Timestamp,
    ) -> Result<BallotId, HostError>;

    fn end_time(&self, ballot: &BallotId) -> Option<Timestamp>;

    fn total_weight(&self, ballot: &BallotId) -> Amount;

    fn destroy(&self, ballot: &BallotId);
}

/// The mintable, lockable governance token.
pub trait GovernanceToken {
    fn id(&self) -> AccountId;

    fn total_supply(&self) -> Amount;

    /// Whether `other` is this token or a token it controls.
    fn can_control(&self, other: &AccountId) -> bool;

    /// Add `amount` to the minting allowance of `target`.
    fn increase_minting_allowance(&self, target: &AccountId, amount: Amount)
        -> Result<(), HostError>;

    fn set_owner(&self, new_owner: &AccountId) -> Result<(), HostError>;
}

/// Balances held by the governance system itself.
pub trait Treasury {
    /// Take custody of value sent by `from` with a call.
    fn accept(&self, from: &AccountId, amount: Amount);

    /// Native balance held by the system.
    fn balance(&self) -> Amount;

    fn send_native(&self, to: &AccountId, amount: Amount) -> Result<(), HostError>;

    /// Call the token's transfer entry point; `false` means the token refused.
    fn transfer_token(&self, token: &AccountId, to: &AccountId, amount: Amount) -> bool;

    /// Move the whole native balance to `to`, returning the amount moved.
    fn sweep(&self, to: &AccountId) -> Amount;
}

/// The crowdfunding component.
pub trait Crowdfunding {
    fn launch(
        &self,
        admin: &AccountId,
        beneficiary: &AccountId,
        config: &CampaignConfig,
    ) -> Result<AccountId, HostError>;

    /// Token supply the campaign may mint.
    fn total_supply(&self, campaign: &AccountId) -> Amount;
}
