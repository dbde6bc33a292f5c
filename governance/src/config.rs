//! Voting and campaign configuration, and the validator guarding them.
//!
//! Every configuration supplied by a human (genesis settings, a
//! `ChangeSettings` proposal, the voting table of a crowdfunding campaign)
//! passes through [`validate`] before it is trusted.

use crate::error::ConfigViolation;
use agora_types::{Amount, DAY_SECS, UNIT};
use agora_utils::format_duration;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters of the proposal process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VotingConfig {
    /// Minimum value that must accompany every proposal.
    pub proposal_fee: Amount,
    /// How long voting power stays locked after a ballot ends, in seconds.
    pub lock_duration_secs: u64,
    /// Share of the live token supply the ballot weight must strictly exceed.
    pub majority_percent: u8,
}

impl fmt::Display for VotingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fee {}, lock {}, majority {}%",
            self.proposal_fee,
            format_duration(self.lock_duration_secs),
            self.majority_percent
        )
    }
}

/// Inclusive bounds a [`VotingConfig`] must sit within.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VotingBounds {
    pub min_majority_percent: u8,
    pub max_majority_percent: u8,
    pub min_lock_duration_secs: u64,
    pub max_lock_duration_secs: u64,
    pub max_proposal_fee: Amount,
}

impl VotingBounds {
    pub const STANDARD: Self = Self {
        min_majority_percent: 55,
        max_majority_percent: 80,
        min_lock_duration_secs: 120 * DAY_SECS,
        max_lock_duration_secs: 730 * DAY_SECS,
        max_proposal_fee: Amount::new(2 * UNIT),
    };
}

impl Default for VotingBounds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Check a voting configuration against the standard bounds.
///
/// Checks majority, then lock duration, then fee, and stops at the first
/// violation. Returns the input unchanged on success.
pub fn validate(config: VotingConfig) -> Result<VotingConfig, ConfigViolation> {
    validate_with(config, &VotingBounds::STANDARD)
}

/// [`validate`] against explicit bounds.
pub fn validate_with(
    config: VotingConfig,
    bounds: &VotingBounds,
) -> Result<VotingConfig, ConfigViolation> {
    if config.majority_percent < bounds.min_majority_percent
        || config.majority_percent > bounds.max_majority_percent
    {
        return Err(ConfigViolation::MajorityOutOfRange {
            value: config.majority_percent,
            min: bounds.min_majority_percent,
            max: bounds.max_majority_percent,
        });
    }
    if config.lock_duration_secs < bounds.min_lock_duration_secs
        || config.lock_duration_secs > bounds.max_lock_duration_secs
    {
        return Err(ConfigViolation::LockDurationOutOfRange {
            value: config.lock_duration_secs,
            min: bounds.min_lock_duration_secs,
            max: bounds.max_lock_duration_secs,
        });
    }
    if config.proposal_fee > bounds.max_proposal_fee {
        return Err(ConfigViolation::FeeTooHigh {
            value: config.proposal_fee,
            max: bounds.max_proposal_fee,
        });
    }
    Ok(config)
}

/// Configuration of a crowdfunding campaign launched by governance.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CampaignConfig {
    pub name: String,
    /// Amount the campaign aims to raise.
    pub funding_goal: Amount,
    /// Tokens the campaign may mint for its backers; granted as its minting allowance.
    pub token_supply: Amount,
    /// Length of the pledge window in seconds.
    pub duration_secs: u64,
    /// Voting table the campaign's own governance runs with.
    pub voting: VotingConfig,
}

impl CampaignConfig {
    pub fn validate(self) -> Result<Self, ConfigViolation> {
        self.validate_with(&VotingBounds::STANDARD)
    }

    pub fn validate_with(self, bounds: &VotingBounds) -> Result<Self, ConfigViolation> {
        validate_with(self.voting, bounds)?;
        if self.funding_goal.is_zero() {
            return Err(ConfigViolation::ZeroFundingGoal);
        }
        if self.token_supply.is_zero() {
            return Err(ConfigViolation::ZeroTokenSupply);
        }
        if self.duration_secs == 0 {
            return Err(ConfigViolation::ZeroCampaignDuration);
        }
        Ok(self)
    }
}

impl fmt::Display for CampaignConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "campaign '{}' raising {} over {}, supply {} ({})",
            self.name,
            self.funding_goal,
            format_duration(self.duration_secs),
            self.token_supply,
            self.voting
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(majority: u8, lock_days: u64, fee: u128) -> VotingConfig {
        VotingConfig {
            proposal_fee: Amount::new(fee),
            lock_duration_secs: lock_days * DAY_SECS,
            majority_percent: majority,
        }
    }

    #[test]
    fn accepts_boundary_values() {
        for c in [
            config(55, 120, 0),
            config(80, 730, 2 * UNIT),
            config(55, 730, 2 * UNIT),
            config(80, 120, 1),
        ] {
            assert_eq!(validate(c), Ok(c));
        }
    }

    #[test]
    fn rejects_majority_out_of_range() {
        assert!(matches!(
            validate(config(54, 365, 0)),
            Err(ConfigViolation::MajorityOutOfRange { value: 54, .. })
        ));
        assert!(matches!(
            validate(config(81, 365, 0)),
            Err(ConfigViolation::MajorityOutOfRange { value: 81, .. })
        ));
    }

    #[test]
    fn rejects_lock_duration_out_of_range() {
        assert!(matches!(
            validate(config(60, 119, 0)),
            Err(ConfigViolation::LockDurationOutOfRange { .. })
        ));
        assert!(matches!(
            validate(config(60, 731, 0)),
            Err(ConfigViolation::LockDurationOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_fee_above_maximum() {
        assert_eq!(
            validate(config(60, 365, 2 * UNIT + 1)),
            Err(ConfigViolation::FeeTooHigh {
                value: Amount::new(2 * UNIT + 1),
                max: Amount::new(2 * UNIT),
            })
        );
    }

    #[test]
    fn reports_majority_before_other_violations() {
        assert!(matches!(
            validate(config(10, 1, u128::MAX)),
            Err(ConfigViolation::MajorityOutOfRange { .. })
        ));
        assert!(matches!(
            validate(config(60, 1, u128::MAX)),
            Err(ConfigViolation::LockDurationOutOfRange { .. })
        ));
    }

    #[test]
    fn campaign_validation_covers_voting_table() {
        let campaign = CampaignConfig {
            name: "library".into(),
            funding_goal: Amount::from_units(10),
            token_supply: Amount::from_units(1_000),
            duration_secs: 30 * DAY_SECS,
            voting: config(60, 365, UNIT),
        };
        assert!(campaign.clone().validate().is_ok());

        let bad_voting = CampaignConfig {
            voting: config(90, 365, UNIT),
            ..campaign.clone()
        };
        assert!(matches!(
            bad_voting.validate(),
            Err(ConfigViolation::MajorityOutOfRange { .. })
        ));

        let no_supply = CampaignConfig {
            token_supply: Amount::ZERO,
            ..campaign.clone()
        };
        assert_eq!(no_supply.validate(), Err(ConfigViolation::ZeroTokenSupply));

        let no_goal = CampaignConfig {
            funding_goal: Amount::ZERO,
            ..campaign
        };
        assert_eq!(no_goal.validate(), Err(ConfigViolation::ZeroFundingGoal));
    }
}
