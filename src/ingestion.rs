use std::io::Read;
use std::pin::Pin;

use futures::stream::{self, Stream};
use serde::Deserialize;

use crate::domain::traits::TransactionStream;
use crate::domain::{AccountId, Amount, Error, Transaction, TransactionKind};

pub struct CsvReader<R: Read> {
    reader: Option<csv::Reader<R>>,
}

impl<R: Read> CsvReader<R> {
    pub fn new(reader: R) -> Self {
        let rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        Self { reader: Some(rdr) }
    }
}

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "type")]
    kind: String,
    account: AccountId,
    amount: Amount,
}

impl TryFrom<CsvRow> for Transaction {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self, Self::Error> {
        let amount = row.amount;
        let kind = match row.kind.trim().to_ascii_lowercase().as_str() {
            "deposit" => TransactionKind::Deposit { amount },
            "receive" => TransactionKind::Receive { amount },
            "withdrawal" | "withdraw" => TransactionKind::Withdrawal { amount },
            other => {
                return Err(Error::Ingestion(format!(
                    "Invalid transaction type: {}",
                    other
                )));
            }
        };

        Ok(Transaction {
            kind,
            account: row.account,
        })
    }
}

impl<R: Read + Send + 'static> TransactionStream for CsvReader<R> {
    type TxStream = Pin<Box<dyn Stream<Item = Result<Transaction, Error>> + Send>>;

    fn stream(&mut self) -> Self::TxStream {
        // Take ownership of the reader so the iterator we build owns all data and is 'static.
        let reader = match self.reader.take() {
            Some(r) => r,
            None => {
                // Already consumed; return an empty stream.
                return Box::pin(stream::iter(Vec::<Result<Transaction, Error>>::new()));
            }
        };

        let iter = reader
            .into_deserialize::<CsvRow>()
            .map(|row_res| match row_res {
                Ok(row) => Transaction::try_from(row),
                Err(e) => Err(Error::Ingestion(format!(
                    "CSV deserialization error: {}",
                    e
                ))),
            });

        Box::pin(stream::iter(iter))
    }
}
