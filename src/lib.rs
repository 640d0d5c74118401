//! Custodial ledger for a native value unit.
//!
//! Callers deposit value, the ledger books a per-account balance, and
//! withdrawals pay out through an external transfer that may call back in.
//! Total holdings never exceed the configured capacity, and a single
//! withdrawal never exceeds the configured threshold.

pub mod config;
pub mod dlq;
pub mod domain;
pub mod engine;
pub mod guards;
pub mod host;
pub mod ingestion;
pub mod journal;
pub mod ledger;
pub mod logging;
pub mod output_repository;

pub use domain::{AccountId, Amount, Error, LedgerError, LedgerEvent};
pub use ledger::{Ledger, LedgerConfig};
