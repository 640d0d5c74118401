//! Command-line configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::domain::{AccountId, Amount, Error};
use crate::ledger::LedgerConfig;

/// Replays deposit and withdrawal instructions from a CSV file against a
/// custodial ledger and prints the resulting balances.
#[derive(Parser, Debug)]
#[command(name = "custody_ledger", version)]
pub struct Config {
    /// CSV file with `type,account,amount` rows.
    pub input: PathBuf,

    /// Largest amount a single withdrawal may move (base units or e.g. "1 ether").
    #[arg(long, env = "LEDGER_THRESHOLD", value_parser = parse_amount)]
    pub threshold: Amount,

    /// Largest total the ledger may hold across all accounts.
    #[arg(long, env = "LEDGER_CAPACITY", value_parser = parse_amount)]
    pub capacity: Amount,

    /// Reject value sent without an explicit deposit instruction.
    #[arg(long)]
    pub no_plain_transfers: bool,

    /// Recipient whose incoming transfers fail. Repeatable.
    #[arg(long = "reject", value_name = "ACCOUNT")]
    pub rejecting: Vec<AccountId>,

    /// Recipient that calls withdraw again while being paid. Repeatable.
    #[arg(long = "reentrant", value_name = "ACCOUNT")]
    pub reentrant: Vec<AccountId>,

    /// Write every committed event as a JSON line to this file.
    #[arg(long, value_name = "PATH")]
    pub events_out: Option<PathBuf>,

    /// Log output format.
    #[arg(long, value_enum, env = "LEDGER_LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn ledger_config(&self) -> Result<LedgerConfig, Error> {
        if self.threshold.is_zero() {
            return Err(Error::Config("threshold must be greater than zero".into()));
        }
        if self.capacity.is_zero() {
            return Err(Error::Config("capacity must be greater than zero".into()));
        }
        Ok(LedgerConfig {
            threshold: self.threshold,
            capacity: self.capacity,
            accept_plain_transfers: !self.no_plain_transfers,
        })
    }
}

fn parse_amount(s: &str) -> Result<Amount, String> {
    Amount::from_decimal_str(s).ok_or_else(|| format!("invalid amount: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(std::iter::once("custody_ledger").chain(args.iter().copied()))
    }

    #[test]
    fn parses_full_command_line() {
        let config = parse(&[
            "ops.csv",
            "--threshold",
            "10",
            "--capacity",
            "1 gwei",
            "--reject",
            "bob",
            "--reentrant",
            "mallory",
            "--reentrant",
            "eve",
            "--no-plain-transfers",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.threshold, Amount(10));
        assert_eq!(config.capacity, Amount(1_000_000_000));
        assert_eq!(config.rejecting, vec![AccountId::new("bob").unwrap()]);
        assert_eq!(config.reentrant.len(), 2);
        assert_eq!(config.log_format, LogFormat::Json);

        let ledger = config.ledger_config().unwrap();
        assert!(!ledger.accept_plain_transfers);
    }

    #[test]
    fn zero_limits_are_configuration_errors() {
        let config = parse(&["ops.csv", "--threshold", "0", "--capacity", "5"]).unwrap();
        assert!(matches!(config.ledger_config(), Err(Error::Config(_))));
    }

    #[test]
    fn malformed_amount_is_rejected_by_parser() {
        assert!(parse(&["ops.csv", "--threshold", "ten", "--capacity", "5"]).is_err());
    }
}
