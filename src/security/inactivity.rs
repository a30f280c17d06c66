use chrono::NaiveDate;
use tracing::warn;

use crate::common::error::BankError;
use crate::common::limits::INACTIVITY_LOCK_DAYS;
use crate::domain::account::AccountStatus;
use crate::domain::ledger::Ledger;
use crate::io::store::Store;

/// Locks an active account whose last transaction is at least
/// `INACTIVITY_LOCK_DAYS` calendar days in the past.
///
/// Runs as a precondition of authentication. Idempotent: an already locked
/// or closed account only gets the elapsed-days re-check, no second audit
/// line and no persistence.
pub fn check_inactivity(
    ledger: &mut Ledger,
    store: &mut dyn Store,
    account_number: &str,
    today: NaiveDate,
) -> Result<(), BankError> {
    let transitioned = {
        let acc = ledger.get_mut(account_number)?;
        if acc.is_active() && acc.days_inactive(today) >= INACTIVITY_LOCK_DAYS {
            acc.status = AccountStatus::Locked;
            true
        } else {
            false
        }
    };

    if transitioned {
        warn!(account = account_number, "account locked due to inactivity");
        store.append_audit(&format!(
            "Account locked due to inactivity: {account_number}"
        ))?;
        store.persist_accounts(ledger)?;
    }
    Ok(())
}
