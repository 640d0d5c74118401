//! Preconditions shared by the deposit and withdraw paths.
//!
//! All of these run before any ledger mutation.

use crate::domain::{Amount, LedgerError};

pub fn non_zero(amount: Amount) -> Result<(), LedgerError> {
    if amount.is_zero() {
        return Err(LedgerError::ZeroValue);
    }
    Ok(())
}

/// `total` must already be within `capacity`.
pub fn within_capacity(total: Amount, amount: Amount, capacity: Amount) -> Result<(), LedgerError> {
    let headroom = capacity.checked_sub(total).unwrap_or(Amount::ZERO);
    if amount > headroom {
        return Err(LedgerError::InsufficientCapacity {
            requested: amount,
            excess: Amount(amount.0 - headroom.0),
        });
    }
    Ok(())
}

pub fn within_threshold(amount: Amount, threshold: Amount) -> Result<(), LedgerError> {
    if amount > threshold {
        return Err(LedgerError::ExceedsLimit { requested: amount });
    }
    Ok(())
}

pub fn covers(balance: Amount, amount: Amount) -> Result<(), LedgerError> {
    if balance < amount {
        return Err(LedgerError::InsufficientBalance { requested: amount });
    }
    Ok(())
}
