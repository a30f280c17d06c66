pub mod bill_payment;
pub mod deposit;
pub mod interest;
pub mod transfer;
pub mod withdraw;

use crate::common::error::BankError;
use crate::domain::account::Account;

/// Money can only move on an `ACTIVE` account; the session layer should
/// never get here with anything else, but the authorizer re-checks.
fn ensure_active(acc: &Account) -> Result<(), BankError> {
    if acc.is_closed() {
        return Err(BankError::InvalidOperation(format!(
            "account {} is closed",
            acc.account_number
        )));
    }
    if acc.is_locked() {
        return Err(BankError::AccountLocked(acc.account_number.clone()));
    }
    Ok(())
}
