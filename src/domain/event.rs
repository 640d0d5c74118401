//! Events emitted for external observers, one per committed operation.

use serde::{Deserialize, Serialize};

use crate::domain::{AccountId, Amount};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LedgerEvent {
    Deposit { account: AccountId, amount: Amount },
    Withdrawal { account: AccountId, amount: Amount },
}

impl LedgerEvent {
    pub fn account(&self) -> &AccountId {
        match self {
            LedgerEvent::Deposit { account, .. } | LedgerEvent::Withdrawal { account, .. } => {
                account
            }
        }
    }
}
