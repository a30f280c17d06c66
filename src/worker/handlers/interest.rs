use chrono::NaiveDateTime;
use tracing::info;

use crate::{
    common::{error::BankError, limits::ANNUAL_INTEREST_RATE_BPS},
    domain::{
        ledger::Ledger,
        transaction::{TransactionRecord, TxKind},
    },
    io::store::Store,
    worker::handlers::ensure_active,
};

/// Credits one month of interest at the fixed annual rate.
pub fn handle(
    ledger: &mut Ledger,
    store: &mut dyn Store,
    account_number: &str,
    now: NaiveDateTime,
) -> Result<(), BankError> {
    ensure_active(ledger.get(account_number)?)?;

    let interest = ledger
        .get(account_number)?
        .balance
        .monthly_interest(ANNUAL_INTEREST_RATE_BPS);
    if !interest.is_positive() {
        return Err(BankError::InvalidOperation(format!(
            "no interest accrued on account {account_number}"
        )));
    }

    {
        let acc = ledger.get_mut(account_number)?;
        acc.balance += interest;
        acc.touch(now);
    }

    let tx = TransactionRecord::new(
        account_number,
        TxKind::Interest,
        interest,
        now,
        "Monthly interest credit",
    );
    store.append_transaction(&tx)?;
    store.persist_accounts(ledger)?;
    store.append_audit(&format!(
        "Interest of {interest} credited to account {account_number}"
    ))?;
    info!(account = account_number, %interest, "interest posted");
    Ok(())
}
