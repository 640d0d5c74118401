use crate::domain::{AccountId, Amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Explicit deposit call carrying value.
    Deposit { amount: Amount },
    /// Value sent with no recognised instruction.
    Receive { amount: Amount },
    Withdrawal { amount: Amount },
}

impl TransactionKind {
    pub fn amount(&self) -> Amount {
        match *self {
            TransactionKind::Deposit { amount }
            | TransactionKind::Receive { amount }
            | TransactionKind::Withdrawal { amount } => amount,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransactionKind::Deposit { .. } => "deposit",
            TransactionKind::Receive { .. } => "receive",
            TransactionKind::Withdrawal { .. } => "withdrawal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub account: AccountId,
}

impl core::fmt::Display for Transaction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{},account={},amount={}",
            self.kind.name(),
            self.account,
            self.kind.amount()
        )
    }
}
