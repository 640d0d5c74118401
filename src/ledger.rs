//! Custodial ledger: per-account balances under a total capacity, with
//! withdrawals capped per transaction.
//!
//! Capacity is checked against an explicit running total (`total_held`)
//! rather than whatever value the host reports holding, so the invariant
//! `sum(balances) == total_held <= capacity` can be checked from ledger
//! state alone. Threshold and capacity are fixed at construction.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::domain::{AccountId, Amount, LedgerError, LedgerEvent, ValueTransfer};
use crate::guards;
use crate::journal::{Checkpoint, Journal, JournalEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Largest amount a single withdrawal may move.
    pub threshold: Amount,
    /// Largest total the ledger may hold across all accounts.
    pub capacity: Amount,
    /// Whether value arriving without an instruction is booked as a deposit.
    pub accept_plain_transfers: bool,
}

impl LedgerConfig {
    pub fn new(threshold: Amount, capacity: Amount) -> Self {
        Self {
            threshold,
            capacity,
            accept_plain_transfers: true,
        }
    }
}

#[derive(Debug)]
pub struct Ledger {
    config: LedgerConfig,
    balances: HashMap<AccountId, Amount>,
    total_held: Amount,
    deposit_count: u64,
    withdrawal_count: u64,
    /// Committed events, append-only until drained
    events: Vec<LedgerEvent>,
    journal: Journal,
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Result<Self, LedgerError> {
        guards::non_zero(config.threshold)?;
        guards::non_zero(config.capacity)?;

        Ok(Self {
            config,
            balances: HashMap::new(),
            total_held: Amount::ZERO,
            deposit_count: 0,
            withdrawal_count: 0,
            events: Vec::new(),
            journal: Journal::new(),
        })
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Books `amount`, already received by the host, to `caller`.
    pub fn deposit(&mut self, caller: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        guards::non_zero(amount)?;
        guards::within_capacity(self.total_held, amount, self.config.capacity)?;

        let balance = self
            .balance_of(caller)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let total = self
            .total_held
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let count = self
            .deposit_count
            .checked_add(1)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(caller, balance);
        self.set_total_held(total);
        self.set_deposit_count(count);
        self.emit(LedgerEvent::Deposit {
            account: caller.clone(),
            amount,
        });

        info!(account = %caller, %amount, balance = %balance, "deposit booked");
        Ok(())
    }

    /// Entry point for value sent with no instruction attached.
    pub fn receive(&mut self, caller: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        if !self.config.accept_plain_transfers {
            return Err(LedgerError::PlainTransfersDisabled);
        }
        self.deposit(caller, amount)
    }

    // ───────────────────────── Withdraw ─────────────────────────

    /// Pays `amount` out to `caller` through `host`.
    ///
    /// Ledger state reaches its final value before `host` is called, so a
    /// recipient re-entering from inside the transfer sees the reduced
    /// balance. If the transfer fails every mutation since the checkpoint is
    /// undone, including those of nested calls.
    pub fn withdraw<H>(
        &mut self,
        caller: &AccountId,
        amount: Amount,
        host: &mut H,
    ) -> Result<(), LedgerError>
    where
        H: ValueTransfer + ?Sized,
    {
        guards::within_threshold(amount, self.config.threshold)?;
        guards::non_zero(amount)?;
        let balance = self.balance_of(caller);
        guards::covers(balance, amount)?;

        let remaining = balance.checked_sub(amount).ok_or(LedgerError::Overflow)?;
        let total = self
            .total_held
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        let count = self
            .withdrawal_count
            .checked_add(1)
            .ok_or(LedgerError::Overflow)?;

        let checkpoint = self.journal.begin();
        self.set_balance(caller, remaining);
        self.set_total_held(total);
        self.set_withdrawal_count(count);

        if !host.transfer_value(self, caller, amount) {
            self.rollback(checkpoint);
            warn!(account = %caller, %amount, "transfer failed, withdrawal reverted");
            return Err(LedgerError::TransferFailed {
                account: caller.clone(),
                amount,
            });
        }

        self.emit(LedgerEvent::Withdrawal {
            account: caller.clone(),
            amount,
        });
        self.journal.commit(checkpoint);

        info!(account = %caller, %amount, balance = %remaining, "withdrawal paid");
        Ok(())
    }

    // ───────────────────────── Queries ─────────────────────────

    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(Amount::ZERO)
    }

    pub fn threshold(&self) -> Amount {
        self.config.threshold
    }

    pub fn capacity(&self) -> Amount {
        self.config.capacity
    }

    pub fn accepts_plain_transfers(&self) -> bool {
        self.config.accept_plain_transfers
    }

    pub fn total_held(&self) -> Amount {
        self.total_held
    }

    pub fn deposit_count(&self) -> u64 {
        self.deposit_count
    }

    pub fn withdrawal_count(&self) -> u64 {
        self.withdrawal_count
    }

    pub fn balances(&self) -> impl Iterator<Item = (&AccountId, Amount)> {
        self.balances.iter().map(|(account, amount)| (account, *amount))
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Takes committed events. Returns nothing while a withdrawal is still in
    /// flight, since those events may yet be reverted.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        if self.journal.depth() > 0 {
            return Vec::new();
        }
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Journaled mutation ─────────────────────────

    fn set_balance(&mut self, account: &AccountId, amount: Amount) {
        let previous = self.balances.insert(account.clone(), amount);
        self.journal.record(JournalEntry::Balance {
            account: account.clone(),
            previous,
        });
    }

    fn set_total_held(&mut self, amount: Amount) {
        let previous = std::mem::replace(&mut self.total_held, amount);
        self.journal.record(JournalEntry::TotalHeld(previous));
    }

    fn set_deposit_count(&mut self, count: u64) {
        let previous = std::mem::replace(&mut self.deposit_count, count);
        self.journal.record(JournalEntry::DepositCount(previous));
    }

    fn set_withdrawal_count(&mut self, count: u64) {
        let previous = std::mem::replace(&mut self.withdrawal_count, count);
        self.journal.record(JournalEntry::WithdrawalCount(previous));
    }

    fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
        self.journal.record(JournalEntry::EventEmitted);
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        let undone = self.journal.revert(checkpoint);
        debug!(entries = undone.len(), "reverting journal");

        for entry in undone {
            match entry {
                JournalEntry::Balance {
                    account,
                    previous: Some(amount),
                } => {
                    self.balances.insert(account, amount);
                }
                JournalEntry::Balance {
                    account,
                    previous: None,
                } => {
                    self.balances.remove(&account);
                }
                JournalEntry::TotalHeld(amount) => self.total_held = amount,
                JournalEntry::DepositCount(count) => self.deposit_count = count,
                JournalEntry::WithdrawalCount(count) => self.withdrawal_count = count,
                JournalEntry::EventEmitted => {
                    self.events.pop();
                }
            }
        }
    }
}
