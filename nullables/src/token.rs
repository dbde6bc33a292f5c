//! Nullable governance token — supply, allowances and ownership in memory.

use agora_governance::{GovernanceToken, HostError};
use agora_types::{AccountId, Amount};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

pub struct NullToken {
    id: AccountId,
    supply: Cell<Amount>,
    owner: RefCell<AccountId>,
    allowances: RefCell<HashMap<AccountId, Amount>>,
    controlled: RefCell<HashSet<AccountId>>,
    refuse_owner_change: Cell<bool>,
    refuse_allowance: Cell<bool>,
}

impl NullToken {
    pub fn new(id: impl Into<AccountId>, owner: impl Into<AccountId>, supply: Amount) -> Self {
        Self {
            id: id.into(),
            supply: Cell::new(supply),
            owner: RefCell::new(owner.into()),
            allowances: RefCell::new(HashMap::new()),
            controlled: RefCell::new(HashSet::new()),
            refuse_owner_change: Cell::new(false),
            refuse_allowance: Cell::new(false),
        }
    }

    pub fn set_total_supply(&self, supply: Amount) {
        self.supply.set(supply);
    }

    /// Grow the supply, as a minter would.
    pub fn mint(&self, amount: Amount) {
        self.supply.set(self.supply.get().saturating_add(amount));
    }

    pub fn allowance(&self, target: &AccountId) -> Amount {
        self.allowances
            .borrow()
            .get(target)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    pub fn owner(&self) -> AccountId {
        self.owner.borrow().clone()
    }

    /// Mark `other` as a token this one controls (e.g. its locked wrapper).
    pub fn control(&self, other: impl Into<AccountId>) {
        self.controlled.borrow_mut().insert(other.into());
    }

    pub fn refuse_owner_change(&self, refuse: bool) {
        self.refuse_owner_change.set(refuse);
    }

    /// Make subsequent allowance increases fail.
    pub fn refuse_allowance(&self, refuse: bool) {
        self.refuse_allowance.set(refuse);
    }
}

impl GovernanceToken for NullToken {
    fn id(&self) -> AccountId {
        self.id.clone()
    }

    fn total_supply(&self) -> Amount {
        self.supply.get()
    }

    fn can_control(&self, other: &AccountId) -> bool {
        *other == self.id || self.controlled.borrow().contains(other)
    }

    fn increase_minting_allowance(
        &self,
        target: &AccountId,
        amount: Amount,
    ) -> Result<(), HostError> {
        if self.refuse_allowance.get() {
            return Err(HostError::new("token", "allowance change refused"));
        }
        let mut allowances = self.allowances.borrow_mut();
        let current = allowances.entry(target.clone()).or_default();
        *current = current
            .checked_add(amount)
            .ok_or_else(|| HostError::new("token", "allowance overflow"))?;
        Ok(())
    }

    fn set_owner(&self, new_owner: &AccountId) -> Result<(), HostError> {
        if self.refuse_owner_change.get() {
            return Err(HostError::new("token", "owner change refused"));
        }
        *self.owner.borrow_mut() = new_owner.clone();
        Ok(())
    }
}
