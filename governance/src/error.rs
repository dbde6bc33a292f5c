use agora_types::{AccountId, Amount, BallotId, Timestamp};
use thiserror::Error;

/// A voting or campaign configuration breached one of its bounds.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("majority {value}% outside [{min}%, {max}%]")]
    MajorityOutOfRange { value: u8, min: u8, max: u8 },

    #[error("lock duration {value}s outside [{min}s, {max}s]")]
    LockDurationOutOfRange { value: u64, min: u64, max: u64 },

    #[error("proposal fee {value} exceeds maximum {max}")]
    FeeTooHigh { value: Amount, max: Amount },

    #[error("campaign funding goal must be non-zero")]
    ZeroFundingGoal,

    #[error("campaign token supply must be non-zero")]
    ZeroTokenSupply,

    #[error("campaign duration must be non-zero")]
    ZeroCampaignDuration,
}

/// Failure reported by an external collaborator (ballot, token, treasury, campaign).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{component}: {reason}")]
pub struct HostError {
    pub component: &'static str,
    pub reason: String,
}

impl HostError {
    pub fn new(component: &'static str, reason: impl Into<String>) -> Self {
        Self {
            component,
            reason: reason.into(),
        }
    }
}

/// Coarse failure classes callers can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authorization,
    Timing,
    Payment,
    Transfer,
    Retired,
    Collaborator,
    Internal,
}

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigViolation),

    #[error("token {0} is controlled by the governance token and cannot be granted")]
    ControlledAsset(AccountId),

    #[error("ballot {0} not found")]
    BallotNotFound(BallotId),

    #[error("voting on ballot {ballot} ends at {end_time}, now is {now}")]
    VotingNotEnded {
        ballot: BallotId,
        end_time: Timestamp,
        now: Timestamp,
    },

    #[error("deadline {deadline} is not after the current time {now}")]
    DeadlineNotInFuture { deadline: Timestamp, now: Timestamp },

    #[error("insufficient payment: paid {paid}, fee is {fee}")]
    InsufficientPayment { paid: Amount, fee: Amount },

    #[error("transfer of {amount} {asset} to {recipient} failed")]
    TransferFailed {
        recipient: AccountId,
        amount: Amount,
        asset: String,
    },

    #[error("governance system has been retired")]
    Retired,

    #[error("collaborator error: {0}")]
    Collaborator(#[from] HostError),

    #[error("ballot {0} already carries an active proposal")]
    DuplicateBallot(BallotId),

    #[error("payload codec error: {0}")]
    Codec(String),

    #[error("settings error: {0}")]
    Settings(String),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig(_) | Self::ControlledAsset(_) | Self::Settings(_) => {
                ErrorKind::Validation
            }
            Self::BallotNotFound(_) => ErrorKind::Authorization,
            Self::VotingNotEnded { .. } | Self::DeadlineNotInFuture { .. } => ErrorKind::Timing,
            Self::InsufficientPayment { .. } => ErrorKind::Payment,
            Self::TransferFailed { .. } => ErrorKind::Transfer,
            Self::Retired => ErrorKind::Retired,
            Self::Collaborator(_) => ErrorKind::Collaborator,
            Self::DuplicateBallot(_) | Self::Codec(_) => ErrorKind::Internal,
        }
    }
}

impl From<bincode::Error> for GovernanceError {
    fn from(e: bincode::Error) -> Self {
        Self::Codec(e.to_string())
    }
}
