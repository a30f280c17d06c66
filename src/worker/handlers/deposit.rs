use chrono::NaiveDateTime;
use tracing::info;

use crate::{
    common::{
        error::BankError,
        limits::{MAX_DEPOSIT, MIN_DEPOSIT},
        money::Money,
    },
    domain::{
        ledger::Ledger,
        transaction::{TransactionRecord, TxKind},
    },
    io::store::Store,
    worker::handlers::ensure_active,
};

pub fn handle(
    ledger: &mut Ledger,
    store: &mut dyn Store,
    account_number: &str,
    amount: Money,
    now: NaiveDateTime,
) -> Result<(), BankError> {
    ensure_active(ledger.get(account_number)?)?;

    // Boundary amounts are accepted; only strictly outside fails.
    if amount < MIN_DEPOSIT {
        return Err(BankError::LimitViolation(format!(
            "deposit of {amount} is below the minimum of {MIN_DEPOSIT}"
        )));
    }
    if amount > MAX_DEPOSIT {
        return Err(BankError::LimitViolation(format!(
            "deposit of {amount} exceeds the maximum of {MAX_DEPOSIT}"
        )));
    }

    {
        let acc = ledger.get_mut(account_number)?;
        acc.balance += amount;
        acc.touch(now);
    }

    let tx = TransactionRecord::new(account_number, TxKind::Deposit, amount, now, "Cash deposit");
    store.append_transaction(&tx)?;
    store.persist_accounts(ledger)?;
    store.append_audit(&format!("Deposit of {amount} to account {account_number}"))?;
    info!(account = account_number, %amount, "deposit authorized");
    Ok(())
}
