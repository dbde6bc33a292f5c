//! Action dispatch table.
//!
//! Each action variant has a preview handler and an apply handler. Both run
//! from the same decoded [`Action`]; apply re-emits the preview event before
//! touching anything, so the log shows exactly what ran.

use super::{GovernanceEngine, SystemStatus};
use crate::action::Action;
use crate::config::{CampaignConfig, VotingConfig};
use crate::error::{GovernanceError, HostError};
use crate::event::GovernanceEvent;
use agora_types::{AccountId, Amount, Asset, BallotId};
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum DispatchMode {
    /// Describe only.
    Preview,
    /// Describe, then carry out.
    Apply,
}

/// The decoded-preview event for `action` on `ballot`.
fn preview_event(ballot: BallotId, action: &Action) -> GovernanceEvent {
    match action.clone() {
        Action::CreateCrowdFunding {
            config,
            beneficiary,
        } => GovernanceEvent::CrowdFundingPreview {
            ballot,
            config,
            beneficiary,
        },
        Action::ApproveMinter { minter, amount } => GovernanceEvent::MinterApprovalPreview {
            ballot,
            minter,
            amount,
        },
        Action::Retire { successor } => GovernanceEvent::RetirementPreview { ballot, successor },
        Action::Grant {
            recipient,
            amount,
            asset,
        } => GovernanceEvent::GrantPreview {
            ballot,
            recipient,
            amount,
            asset,
        },
        Action::ChangeSettings { admin, config } => GovernanceEvent::SettingsPreview {
            ballot,
            admin,
            config,
        },
    }
}

impl GovernanceEngine {
    pub(super) fn dispatch(
        &self,
        ballot: BallotId,
        action: &Action,
        mode: DispatchMode,
    ) -> Result<(), GovernanceError> {
        self.events.emit(preview_event(ballot, action));
        if mode == DispatchMode::Preview {
            return Ok(());
        }
        match action {
            Action::CreateCrowdFunding {
                config,
                beneficiary,
            } => self.apply_crowdfunding(config, beneficiary),
            Action::ApproveMinter { minter, amount } => self.apply_minter(minter, *amount),
            Action::Retire { successor } => self.apply_retirement(successor),
            Action::Grant {
                recipient,
                amount,
                asset,
            } => self.apply_grant(recipient, *amount, asset),
            Action::ChangeSettings { admin, config } => self.apply_settings(admin, config),
        }
    }

    fn apply_crowdfunding(
        &self,
        config: &CampaignConfig,
        beneficiary: &AccountId,
    ) -> Result<(), GovernanceError> {
        let config = config.clone().validate_with(&self.bounds)?;
        let admin = self.state.borrow().admin.clone();
        let campaign = self
            .host
            .crowdfunding
            .launch(&admin, beneficiary, &config)?;
        let allowance = self.host.crowdfunding.total_supply(&campaign);
        self.host
            .token
            .increase_minting_allowance(&campaign, allowance)?;
        self.state.borrow_mut().campaigns.push(campaign.clone());
        info!(%campaign, %beneficiary, %allowance, "crowdfunding campaign created");
        self.events.emit(GovernanceEvent::CampaignCreated {
            campaign,
            beneficiary: beneficiary.clone(),
            allowance,
        });
        Ok(())
    }

    fn apply_minter(&self, minter: &AccountId, amount: Amount) -> Result<(), GovernanceError> {
        self.host.token.increase_minting_allowance(minter, amount)?;
        self.events.emit(GovernanceEvent::MinterApproved {
            minter: minter.clone(),
            amount,
        });
        Ok(())
    }

    fn apply_retirement(&self, successor: &AccountId) -> Result<(), GovernanceError> {
        self.host.token.set_owner(successor)?;
        let admin = {
            let mut state = self.state.borrow_mut();
            state.status = SystemStatus::Retired;
            state.admin.clone()
        };
        let swept = self.host.treasury.sweep(&admin);
        warn!(system = %self.id, %successor, %swept, "governance system retired");
        self.events.emit(GovernanceEvent::SystemChanged {
            successor: successor.clone(),
            swept_to: admin,
            swept,
        });
        Ok(())
    }

    fn apply_grant(
        &self,
        recipient: &AccountId,
        amount: Amount,
        asset: &Asset,
    ) -> Result<(), GovernanceError> {
        let delivered = match asset {
            Asset::Native => self.host.treasury.send_native(recipient, amount),
            Asset::Token(token) => {
                if self.host.treasury.transfer_token(token, recipient, amount) {
                    Ok(())
                } else {
                    Err(HostError::new("token", "transfer refused"))
                }
            }
        };
        if let Err(reason) = delivered {
            warn!(%recipient, %amount, %asset, %reason, "grant transfer failed");
            return Err(GovernanceError::TransferFailed {
                recipient: recipient.clone(),
                amount,
                asset: asset.to_string(),
            });
        }
        self.events.emit(GovernanceEvent::GrantGiven {
            recipient: recipient.clone(),
            amount,
            asset: asset.clone(),
        });
        Ok(())
    }

    /// Arguments were validated when the proposal was accepted and are not
    /// checked again here.
    fn apply_settings(
        &self,
        admin: &AccountId,
        config: &VotingConfig,
    ) -> Result<(), GovernanceError> {
        {
            let mut state = self.state.borrow_mut();
            state.admin = admin.clone();
            state.voting = *config;
        }
        info!(%admin, %config, "settings changed");
        self.events.emit(GovernanceEvent::SettingsChanged {
            admin: admin.clone(),
            config: *config,
        });
        Ok(())
    }
}
