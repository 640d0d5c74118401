use futures::Stream;

use crate::domain::{AccountId, Amount, Error, LedgerEvent, Transaction};
use crate::ledger::Ledger;

pub trait TransactionStream {
    type TxStream: Stream<Item = Result<Transaction, Error>> + Send + Unpin + 'static;
    fn stream(&mut self) -> Self::TxStream;
}

pub trait DeadLetterQueue {
    fn report(&self, error: &Error);
}

pub trait OutputRepository {
    fn record_event(&mut self, event: &LedgerEvent) -> Result<(), Error>;

    fn flush(&mut self, ledger: &Ledger) -> Result<(), Error>;
}

/// The only outward call the ledger makes: moving native value to `to`.
///
/// The recipient may gain control before this returns, so the ledger hands
/// itself over and implementations are free to call back into it.
pub trait ValueTransfer {
    fn transfer_value(&mut self, ledger: &mut Ledger, to: &AccountId, amount: Amount) -> bool;
}
