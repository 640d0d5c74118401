use std::fs::File;

use clap::Parser;

use custody_ledger::config::Config;
use custody_ledger::dlq::StdErrDLQ;
use custody_ledger::engine::Engine;
use custody_ledger::host::SimulatedHost;
use custody_ledger::ingestion::CsvReader;
use custody_ledger::ledger::Ledger;
use custody_ledger::logging;
use custody_ledger::output_repository::StdOutOutput;

#[tokio::main] // using Tokio runtime for async
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    logging::init_logging("info", config.log_format);

    let ledger = Ledger::new(config.ledger_config()?)?;
    tracing::info!(
        threshold = %ledger.threshold(),
        capacity = %ledger.capacity(),
        plain_transfers = ledger.accepts_plain_transfers(),
        "ledger deployed"
    );

    // Set up the components
    let file = File::open(&config.input)?;
    let ingestion = CsvReader::new(file);
    let output = match &config.events_out {
        Some(path) => StdOutOutput::with_event_log(path)?,
        None => StdOutOutput::new(),
    };
    let host = SimulatedHost::new(config.rejecting.clone(), config.reentrant.clone());

    // Initialize engine with injected components
    let mut engine = Engine::new(ingestion, output, StdErrDLQ::default(), host, ledger);

    engine.process().await?;
    engine.flush()?;

    for (account, amount) in engine.host().paid_out() {
        tracing::info!(%account, %amount, "paid out");
    }
    let ledger = engine.ledger();
    tracing::info!(
        total_held = %ledger.total_held(),
        deposits = ledger.deposit_count(),
        withdrawals = ledger.withdrawal_count(),
        reentries = engine.host().reentries().len(),
        "run complete"
    );

    Ok(())
}
