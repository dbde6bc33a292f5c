//! Governance actions and their payload codec.
//!
//! A pending action is stored as an [`ActionKind`] selector plus an opaque
//! bincode payload. [`Action::decode`] is the one decoder shared by the
//! preview and apply paths, so what a voter previews is what executes.

use crate::config::{CampaignConfig, VotingConfig};
use crate::error::GovernanceError;
use agora_types::{AccountId, Amount, Asset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector naming which handler a payload belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    CreateCrowdFunding,
    ApproveMinter,
    Retire,
    Grant,
    ChangeSettings,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateCrowdFunding => "create_crowdfunding",
            Self::ApproveMinter => "approve_minter",
            Self::Retire => "retire",
            Self::Grant => "grant",
            Self::ChangeSettings => "change_settings",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded governance action with its typed arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Launch a crowdfunding campaign and let it mint its configured supply.
    CreateCrowdFunding {
        config: CampaignConfig,
        beneficiary: AccountId,
    },
    /// Raise a minter's allowance on the governance token.
    ApproveMinter { minter: AccountId, amount: Amount },
    /// Hand the token to a successor system and shut this one down.
    Retire { successor: AccountId },
    /// Pay out of the treasury.
    Grant {
        recipient: AccountId,
        amount: Amount,
        asset: Asset,
    },
    /// Replace the admin and voting configuration.
    ChangeSettings {
        admin: AccountId,
        config: VotingConfig,
    },
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::CreateCrowdFunding { .. } => ActionKind::CreateCrowdFunding,
            Self::ApproveMinter { .. } => ActionKind::ApproveMinter,
            Self::Retire { .. } => ActionKind::Retire,
            Self::Grant { .. } => ActionKind::Grant,
            Self::ChangeSettings { .. } => ActionKind::ChangeSettings,
        }
    }

    /// Encode the arguments into an opaque payload; the variant travels as the selector.
    pub fn encode(&self) -> Result<(ActionKind, Vec<u8>), GovernanceError> {
        let payload = match self {
            Self::CreateCrowdFunding {
                config,
                beneficiary,
            } => bincode::serialize(&(config, beneficiary))?,
            Self::ApproveMinter { minter, amount } => bincode::serialize(&(minter, amount))?,
            Self::Retire { successor } => bincode::serialize(successor)?,
            Self::Grant {
                recipient,
                amount,
                asset,
            } => bincode::serialize(&(recipient, amount, asset))?,
            Self::ChangeSettings { admin, config } => bincode::serialize(&(admin, config))?,
        };
        Ok((self.kind(), payload))
    }

    /// Decode a stored payload under its selector.
    pub fn decode(kind: ActionKind, payload: &[u8]) -> Result<Self, GovernanceError> {
        let action = match kind {
            ActionKind::CreateCrowdFunding => {
                let (config, beneficiary) = bincode::deserialize(payload)?;
                Self::CreateCrowdFunding {
                    config,
                    beneficiary,
                }
            }
            ActionKind::ApproveMinter => {
                let (minter, amount) = bincode::deserialize(payload)?;
                Self::ApproveMinter { minter, amount }
            }
            ActionKind::Retire => Self::Retire {
                successor: bincode::deserialize(payload)?,
            },
            ActionKind::Grant => {
                let (recipient, amount, asset) = bincode::deserialize(payload)?;
                Self::Grant {
                    recipient,
                    amount,
                    asset,
                }
            }
            ActionKind::ChangeSettings => {
                let (admin, config) = bincode::deserialize(payload)?;
                Self::ChangeSettings { admin, config }
            }
        };
        Ok(action)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateCrowdFunding {
                config,
                beneficiary,
            } => write!(f, "launch {} for beneficiary {}", config, beneficiary),
            Self::ApproveMinter { minter, amount } => {
                write!(f, "raise minting allowance of {} by {}", minter, amount)
            }
            Self::Retire { successor } => {
                write!(f, "retire in favour of {} and sweep treasury to admin", successor)
            }
            Self::Grant {
                recipient,
                amount,
                asset,
            } => write!(f, "grant {} of {} to {}", amount, asset, recipient),
            Self::ChangeSettings { admin, config } => {
                write!(f, "set admin to {} and voting to {}", admin, config)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_types::{DAY_SECS, UNIT};

    fn voting() -> VotingConfig {
        VotingConfig {
            proposal_fee: Amount::new(UNIT),
            lock_duration_secs: 200 * DAY_SECS,
            majority_percent: 66,
        }
    }

    #[test]
    fn payload_decodes_under_its_own_selector() {
        let action = Action::Grant {
            recipient: AccountId::new("alice"),
            amount: Amount::new(100),
            asset: Asset::Token(AccountId::new("usdc")),
        };
        let (kind, payload) = action.encode().unwrap();
        assert_eq!(kind, ActionKind::Grant);
        assert_eq!(Action::decode(kind, &payload).unwrap(), action);
    }

    #[test]
    fn selector_mismatch_is_a_codec_error() {
        let action = Action::Retire {
            successor: AccountId::new("v2"),
        };
        let (_, payload) = action.encode().unwrap();
        let err = Action::decode(ActionKind::ChangeSettings, &payload).unwrap_err();
        assert!(matches!(err, GovernanceError::Codec(_)));
    }

    #[test]
    fn description_names_arguments() {
        let action = Action::ChangeSettings {
            admin: AccountId::new("carol"),
            config: voting(),
        };
        let text = action.to_string();
        assert!(text.contains("carol"));
        assert!(text.contains("66%"));
        assert!(text.contains("200d"));
    }
}
