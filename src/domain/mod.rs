pub mod account;
pub mod error;
pub mod event;
pub mod money;
pub mod traits;
pub mod transaction;

pub use account::AccountId;
pub use error::{Error, LedgerError};
pub use event::LedgerEvent;
pub use money::Amount;
pub use traits::{DeadLetterQueue, OutputRepository, TransactionStream, ValueTransfer};
pub use transaction::{Transaction, TransactionKind};
