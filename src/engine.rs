use crate::domain::{
    Error, Transaction, TransactionKind,
    traits::{DeadLetterQueue, OutputRepository, TransactionStream, ValueTransfer},
};
use crate::ledger::Ledger;

use futures::StreamExt;

/// Feeds ingested instructions into the one ledger instance, one at a time.
///
/// Each instruction runs to completion (including any re-entry from the
/// host) before the next is pulled, so mutations to an account never race.
#[derive(Debug)]
pub struct Engine<I, O, D, H>
where
    I: TransactionStream,
    O: OutputRepository,
    D: DeadLetterQueue,
    H: ValueTransfer,
{
    ingestion: I,
    output_repository: O,
    dlq: D,
    host: H,
    ledger: Ledger,
}

impl<I, O, D, H> Engine<I, O, D, H>
where
    I: TransactionStream,
    O: OutputRepository,
    D: DeadLetterQueue,
    H: ValueTransfer,
{
    pub fn new(ingestion: I, output_repository: O, dlq: D, host: H, ledger: Ledger) -> Self {
        Self {
            ingestion,
            output_repository,
            dlq,
            host,
            ledger,
        }
    }

    pub async fn process(&mut self) -> Result<(), Error> {
        let mut res = self.ingestion.stream();

        while let Some(tx) = res.next().await {
            match tx {
                Ok(tx) => match self.apply_transaction(&tx) {
                    Ok(()) => self.publish_events()?,
                    Err(e) => {
                        tracing::debug!(transaction = %tx, "instruction rejected");
                        self.dlq.report(&e)
                    }
                },
                Err(e) => self.dlq.report(&e),
            }
        }

        Ok(())
    }

    fn apply_transaction(&mut self, tx: &Transaction) -> Result<(), Error> {
        match tx.kind {
            TransactionKind::Deposit { amount } => self.ledger.deposit(&tx.account, amount)?,
            TransactionKind::Receive { amount } => self.ledger.receive(&tx.account, amount)?,
            TransactionKind::Withdrawal { amount } => {
                self.ledger.withdraw(&tx.account, amount, &mut self.host)?
            }
        }
        Ok(())
    }

    fn publish_events(&mut self) -> Result<(), Error> {
        for event in self.ledger.drain_events() {
            self.output_repository.record_event(&event)?;
        }
        Ok(())
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        self.output_repository.flush(&self.ledger)
    }
}
