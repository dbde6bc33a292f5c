//! Nullable crowdfunding — campaigns recorded in launch order.

use agora_governance::{CampaignConfig, Crowdfunding, HostError};
use agora_types::{AccountId, Amount};
use std::cell::RefCell;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NullCampaign {
    pub id: AccountId,
    pub admin: AccountId,
    pub beneficiary: AccountId,
    pub config: CampaignConfig,
}

#[derive(Default)]
pub struct NullCrowdfunding {
    campaigns: RefCell<Vec<NullCampaign>>,
}

impl NullCrowdfunding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn campaigns(&self) -> Vec<NullCampaign> {
        self.campaigns.borrow().clone()
    }
}

impl Crowdfunding for NullCrowdfunding {
    fn launch(
        &self,
        admin: &AccountId,
        beneficiary: &AccountId,
        config: &CampaignConfig,
    ) -> Result<AccountId, HostError> {
        let mut campaigns = self.campaigns.borrow_mut();
        let id = AccountId::new(format!("campaign-{}", campaigns.len() + 1));
        campaigns.push(NullCampaign {
            id: id.clone(),
            admin: admin.clone(),
            beneficiary: beneficiary.clone(),
            config: config.clone(),
        });
        Ok(id)
    }

    fn total_supply(&self, campaign: &AccountId) -> Amount {
        self.campaigns
            .borrow()
            .iter()
            .find(|c| c.id == *campaign)
            .map(|c| c.config.token_supply)
            .unwrap_or(Amount::ZERO)
    }
}
