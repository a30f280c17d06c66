use chrono::NaiveDateTime;
use tracing::info;

use crate::{
    common::{
        error::BankError,
        limits::{DAILY_WITHDRAWAL_LIMIT, MIN_WITHDRAWAL},
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

    if amount < MIN_WITHDRAWAL {
        return Err(BankError::LimitViolation(format!(
            "withdrawal of {amount} is below the minimum of {MIN_WITHDRAWAL}"
        )));
    }

    {
        let acc = ledger.get_mut(account_number)?;
        // The daily total belongs to the current calendar day.
        acc.roll_daily_window(now.date());

        if amount > acc.balance {
            return Err(BankError::InsufficientFunds {
                balance: acc.balance.to_string_2dp(),
                requested: amount.to_string_2dp(),
            });
        }
        if acc.daily_withdrawal_total + amount > DAILY_WITHDRAWAL_LIMIT {
            return Err(BankError::LimitViolation(format!(
                "withdrawal of {amount} would exceed the daily limit of {DAILY_WITHDRAWAL_LIMIT}"
            )));
        }

        acc.balance -= amount;
        acc.daily_withdrawal_total += amount;
        acc.touch(now);
    }

    let tx = TransactionRecord::new(
        account_number,
        TxKind::Withdrawal,
        amount,
        now,
        "Cash withdrawal",
    );
    store.append_transaction(&tx)?;
    store.persist_accounts(ledger)?;
    store.append_audit(&format!(
        "Withdrawal of {amount} from account {account_number}"
    ))?;
    info!(account = account_number, %amount, "withdrawal authorized");
    Ok(())
}
