use crate::domain::{AccountId, Amount};

/// Rejections raised by the ledger. Every variant means the triggering call
/// left no trace in ledger state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Amount must be greater than zero")]
    ZeroValue,

    #[error("Insufficient balance: requested {requested}")]
    InsufficientBalance { requested: Amount },

    #[error("Withdrawal of {requested} exceeds the per-transaction threshold")]
    ExceedsLimit { requested: Amount },

    #[error("Insufficient capacity: requested {requested}, over capacity by {excess}")]
    InsufficientCapacity { requested: Amount, excess: Amount },

    #[error("Transfer of {amount} to {account} failed")]
    TransferFailed { account: AccountId, amount: Amount },

    #[error("Plain value transfers are not accepted by this ledger")]
    PlainTransfersDisabled,

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Ingestion failed with: {0}")]
    Ingestion(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Ledger rejected operation: {0}")]
    Ledger(#[from] LedgerError),
}
