use std::collections::{BTreeMap, HashSet};

use tracing::{debug, info, warn};

use crate::domain::{AccountId, Amount, LedgerError, ValueTransfer};
use crate::ledger::Ledger;

/// In-process stand-in for the chain: records payouts, refuses transfers to
/// some recipients and lets others call back into the ledger mid-transfer.
#[derive(Debug, Default)]
pub struct SimulatedHost {
    rejecting: HashSet<AccountId>,
    reentrant: HashSet<AccountId>,
    payouts: Vec<(AccountId, Amount)>,
    reentries: Vec<(AccountId, Result<(), LedgerError>)>,
    reentering: bool,
}

impl SimulatedHost {
    pub fn new(
        rejecting: impl IntoIterator<Item = AccountId>,
        reentrant: impl IntoIterator<Item = AccountId>,
    ) -> Self {
        Self {
            rejecting: rejecting.into_iter().collect(),
            reentrant: reentrant.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn payouts(&self) -> &[(AccountId, Amount)] {
        &self.payouts
    }

    /// Outcome of every nested withdrawal attempted by a re-entrant recipient.
    pub fn reentries(&self) -> &[(AccountId, Result<(), LedgerError>)] {
        &self.reentries
    }

    pub fn paid_out(&self) -> BTreeMap<&AccountId, Amount> {
        let mut totals = BTreeMap::new();
        for (account, amount) in &self.payouts {
            let entry = totals.entry(account).or_insert(Amount::ZERO);
            *entry = Amount(entry.0.saturating_add(amount.0));
        }
        totals
    }
}

impl ValueTransfer for SimulatedHost {
    fn transfer_value(&mut self, ledger: &mut Ledger, to: &AccountId, amount: Amount) -> bool {
        // payouts made by nested calls are discarded if this transfer fails
        let mark = self.payouts.len();

        if self.reentrant.contains(to) && !self.reentering {
            self.reentering = true;
            debug!(account = %to, %amount, "recipient re-entering withdraw");
            let nested = ledger.withdraw(to, amount, self);
            self.reentering = false;
            match &nested {
                Ok(()) => info!(account = %to, %amount, "re-entrant withdrawal succeeded"),
                Err(e) => info!(account = %to, %amount, error = %e, "re-entrant withdrawal rejected"),
            }
            self.reentries.push((to.clone(), nested));
        }

        if self.rejecting.contains(to) {
            self.payouts.truncate(mark);
            warn!(account = %to, %amount, "recipient refused transfer");
            return false;
        }

        self.payouts.push((to.clone(), amount));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerConfig;

    fn acc(id: &str) -> AccountId {
        AccountId::new(id).unwrap()
    }

    fn funded(account: &AccountId, amount: u128) -> Ledger {
        let mut ledger = Ledger::new(LedgerConfig::new(Amount(100), Amount(1_000))).unwrap();
        ledger.deposit(account, Amount(amount)).unwrap();
        ledger
    }

    #[test]
    fn pays_ordinary_recipients() {
        let mut ledger = funded(&acc("alice"), 50);
        let mut host = SimulatedHost::default();
        ledger.withdraw(&acc("alice"), Amount(20), &mut host).unwrap();
        assert_eq!(host.payouts(), &[(acc("alice"), Amount(20))]);
        assert_eq!(host.paid_out()[&acc("alice")], Amount(20));
    }

    #[test]
    fn rejecting_recipient_gets_nothing() {
        let mut ledger = funded(&acc("bob"), 50);
        let mut host = SimulatedHost::new([acc("bob")], []);
        let err = ledger.withdraw(&acc("bob"), Amount(20), &mut host).unwrap_err();
        assert!(matches!(err, LedgerError::TransferFailed { .. }));
        assert!(host.payouts().is_empty());
        assert_eq!(ledger.balance_of(&acc("bob")), Amount(50));
    }

    #[test]
    fn reentrant_recipient_is_paid_once() {
        let mut ledger = funded(&acc("mallory"), 100);
        let mut host = SimulatedHost::new([], [acc("mallory")]);
        ledger
            .withdraw(&acc("mallory"), Amount(100), &mut host)
            .unwrap();

        assert_eq!(host.payouts(), &[(acc("mallory"), Amount(100))]);
        assert_eq!(
            host.reentries(),
            &[(
                acc("mallory"),
                Err(LedgerError::InsufficientBalance {
                    requested: Amount(100)
                })
            )]
        );
        assert_eq!(ledger.balance_of(&acc("mallory")), Amount::ZERO);
        assert_eq!(ledger.withdrawal_count(), 1);
    }

    #[test]
    fn rejecting_reentrant_recipient_leaves_no_trace() {
        let mut ledger = funded(&acc("eve"), 200);
        let mut host = SimulatedHost::new([acc("eve")], [acc("eve")]);
        let err = ledger.withdraw(&acc("eve"), Amount(100), &mut host).unwrap_err();

        assert!(matches!(err, LedgerError::TransferFailed { .. }));
        assert!(host.payouts().is_empty());
        assert_eq!(ledger.balance_of(&acc("eve")), Amount(200));
        assert_eq!(ledger.withdrawal_count(), 0);
    }
}
