//! In-memory value channel.
//!
//! Credits accumulate per account. Failures can be injected per account or
//! globally, and a hook can run before each credit attempt to play the part
//! of a recipient that calls back into the service.

use crate::ports::outbound::{TransferError, ValueTransfer};
use parking_lot::RwLock;
use shared_types::{AccountId, Amount};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Called with the recipient and amount before a credit is attempted.
pub type CreditHook = Arc<dyn Fn(&AccountId, Amount) + Send + Sync>;

#[derive(Default)]
pub struct InMemoryValueChannel {
    balances: RwLock<HashMap<AccountId, Amount>>,
    failing: RwLock<HashSet<AccountId>>,
    fail_all: AtomicBool,
    hook: RwLock<Option<CreditHook>>,
}

impl InMemoryValueChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every credit to `account` until `restore` is called.
    pub fn fail_for(&self, account: AccountId) {
        self.failing.write().insert(account);
    }

    pub fn restore(&self, account: &AccountId) {
        self.failing.write().remove(account);
    }

    /// Reject every credit while `fail` is set.
    pub fn set_fail_all(&self, fail: bool) {
        self.fail_all.store(fail, Ordering::SeqCst);
    }

    pub fn set_hook(&self, hook: CreditHook) {
        *self.hook.write() = Some(hook);
    }

    pub fn clear_hook(&self) {
        *self.hook.write() = None;
    }

    /// Total credited to `account` so far.
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.read().get(account).copied().unwrap_or(0)
    }

    /// Total credited to everyone.
    pub fn total_credited(&self) -> Amount {
        self.balances
            .read()
            .values()
            .fold(0, |acc: Amount, v| acc.saturating_add(*v))
    }
}

impl ValueTransfer for InMemoryValueChannel {
    fn credit(&self, recipient: &AccountId, amount: Amount) -> Result<(), TransferError> {
        // The recipient's code runs even when it goes on to refuse the funds.
        // Cloned out so the hook runs with no channel lock held.
        let hook = self.hook.read().clone();
        if let Some(hook) = hook {
            hook(recipient, amount);
        }

        if self.fail_all.load(Ordering::SeqCst) {
            return Err(TransferError::Unavailable("channel offline".into()));
        }
        if self.failing.read().contains(recipient) {
            return Err(TransferError::Rejected {
                account: *recipient,
                reason: "recipient refuses funds".into(),
            });
        }

        let mut balances = self.balances.write();
        let balance = balances.entry(*recipient).or_insert(0);
        *balance = balance.saturating_add(amount);
        Ok(())
    }
}
