//! Nullable treasury — native and token balances held in memory.
//!
//! A callback installed with [`NullTreasury::on_transfer`] runs after value
//! has moved but before the transfer returns, the way a recipient contract's
//! code runs in the middle of a payment.

use agora_governance::{HostError, Treasury};
use agora_types::{AccountId, Amount};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

type TransferHook = Box<dyn Fn()>;

pub struct NullTreasury {
    /// The account the treasury belongs to.
    owner: AccountId,
    native: RefCell<HashMap<AccountId, Amount>>,
    tokens: RefCell<HashMap<(AccountId, AccountId), Amount>>,
    refusing: RefCell<HashSet<AccountId>>,
    hook: RefCell<Option<TransferHook>>,
}

impl NullTreasury {
    pub fn new(owner: impl Into<AccountId>) -> Self {
        Self {
            owner: owner.into(),
            native: RefCell::new(HashMap::new()),
            tokens: RefCell::new(HashMap::new()),
            refusing: RefCell::new(HashSet::new()),
            hook: RefCell::new(None),
        }
    }

    /// Credit native value to any account, the treasury's owner included.
    pub fn fund_native(&self, account: &AccountId, amount: Amount) {
        let mut native = self.native.borrow_mut();
        let entry = native.entry(account.clone()).or_default();
        *entry = entry.saturating_add(amount);
    }

    /// Credit `amount` of `token` to `holder`.
    pub fn fund_token(&self, token: &AccountId, holder: &AccountId, amount: Amount) {
        let mut tokens = self.tokens.borrow_mut();
        let entry = tokens.entry((token.clone(), holder.clone())).or_default();
        *entry = entry.saturating_add(amount);
    }

    pub fn native_balance_of(&self, account: &AccountId) -> Amount {
        self.native
            .borrow()
            .get(account)
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    pub fn token_balance_of(&self, token: &AccountId, holder: &AccountId) -> Amount {
        self.tokens
            .borrow()
            .get(&(token.clone(), holder.clone()))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Make transfers of `token` report failure.
    pub fn refuse(&self, token: &AccountId) {
        self.refusing.borrow_mut().insert(token.clone());
    }

    /// Run `hook` during every successful transfer.
    pub fn on_transfer(&self, hook: TransferHook) {
        *self.hook.borrow_mut() = Some(hook);
    }

    fn run_hook(&self) {
        if let Some(hook) = self.hook.borrow().as_ref() {
            hook();
        }
    }

    fn move_native(&self, to: &AccountId, amount: Amount) -> Result<(), HostError> {
        let mut native = self.native.borrow_mut();
        let held = native.get(&self.owner).copied().unwrap_or(Amount::ZERO);
        let rest = held.checked_sub(amount).ok_or_else(|| {
            HostError::new("treasury", format!("balance {} below {}", held, amount))
        })?;
        native.insert(self.owner.clone(), rest);
        let entry = native.entry(to.clone()).or_default();
        *entry = entry.saturating_add(amount);
        Ok(())
    }
}

impl Treasury for NullTreasury {
    fn accept(&self, _from: &AccountId, amount: Amount) {
        let owner = self.owner.clone();
        self.fund_native(&owner, amount);
    }

    fn balance(&self) -> Amount {
        self.native_balance_of(&self.owner)
    }

    fn send_native(&self, to: &AccountId, amount: Amount) -> Result<(), HostError> {
        self.move_native(to, amount)?;
        self.run_hook();
        Ok(())
    }

    fn transfer_token(&self, token: &AccountId, to: &AccountId, amount: Amount) -> bool {
        if self.refusing.borrow().contains(token) {
            return false;
        }
        {
            let mut tokens = self.tokens.borrow_mut();
            let key = (token.clone(), self.owner.clone());
            let held = tokens.get(&key).copied().unwrap_or(Amount::ZERO);
            let Some(rest) = held.checked_sub(amount) else {
                return false;
            };
            tokens.insert(key, rest);
            let entry = tokens.entry((token.clone(), to.clone())).or_default();
            *entry = entry.saturating_add(amount);
        }
        self.run_hook();
        true
    }

    fn sweep(&self, to: &AccountId) -> Amount {
        let held = self.balance();
        if self.move_native(to, held).is_err() {
            return Amount::ZERO;
        }
        held
    }
}
