use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::domain::{AccountId, Amount, Error, LedgerEvent, OutputRepository};
use crate::ledger::Ledger;

/// Writes final balances as CSV to stdout and, optionally, every committed
/// event as a JSON line to a file.
#[derive(Debug, Default)]
pub struct StdOutOutput {
    events: Option<BufWriter<File>>,
}

impl StdOutOutput {
    pub fn new() -> Self {
        Self { events: None }
    }

    pub fn with_event_log(path: &Path) -> Result<Self, Error> {
        let file = File::create(path)?;
        Ok(Self {
            events: Some(BufWriter::new(file)),
        })
    }
}

impl OutputRepository for StdOutOutput {
    fn record_event(&mut self, event: &LedgerEvent) -> Result<(), Error> {
        if let Some(writer) = self.events.as_mut() {
            serde_json::to_writer(&mut *writer, event)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn flush(&mut self, ledger: &Ledger) -> Result<(), Error> {
        if let Some(writer) = self.events.as_mut() {
            writer.flush()?;
        }

        let stdout = io::stdout();
        write_balances(&mut stdout.lock(), ledger)
    }
}

pub fn write_balances<W: Write>(out: &mut W, ledger: &Ledger) -> Result<(), Error> {
    let mut rows: Vec<(&AccountId, Amount)> = ledger.balances().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    writeln!(out, "account,balance")?;
    for (account, balance) in rows {
        writeln!(out, "{},{}", account, balance)?;
    }
    out.flush()?;
    Ok(())
}
