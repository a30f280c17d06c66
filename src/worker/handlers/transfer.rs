use chrono::NaiveDateTime;
use tracing::info;

use crate::{
    common::{
        error::BankError,
        limits::{DAILY_WITHDRAWAL_LIMIT, MIN_WITHDRAWAL},
        money::Money,
    },
    domain::{ledger::Ledger, transaction::TransactionRecord},
    io::store::Store,
    worker::handlers::ensure_active,
};

pub fn handle(
    ledger: &mut Ledger,
    store: &mut dyn Store,
    from: &str,
    to: &str,
    amount: Money,
    now: NaiveDateTime,
) -> Result<(), BankError> {
    if from == to {
        return Err(BankError::InvalidOperation(
            "cannot transfer to the same account".to_string(),
        ));
    }

    ensure_active(ledger.get(from)?)?;
    let destination = ledger
        .get(to)
        .map_err(|_| BankError::InvalidOperation(format!("destination account {to} not found")))?;
    if !destination.is_active() {
        return Err(BankError::InvalidOperation(format!(
            "destination account {to} is not active"
        )));
    }

    // The source side is a withdrawal and passes the same checks,
    // including the daily cap.
    if amount < MIN_WITHDRAWAL {
        return Err(BankError::LimitViolation(format!(
            "transfer of {amount} is below the minimum of {MIN_WITHDRAWAL}"
        )));
    }
    {
        let src = ledger.get_mut(from)?;
        src.roll_daily_window(now.date());
        if amount > src.balance {
            return Err(BankError::InsufficientFunds {
                balance: src.balance.to_string_2dp(),
                requested: amount.to_string_2dp(),
            });
        }
        if src.daily_withdrawal_total + amount > DAILY_WITHDRAWAL_LIMIT {
            return Err(BankError::LimitViolation(format!(
                "transfer of {amount} would exceed the daily limit of {DAILY_WITHDRAWAL_LIMIT}"
            )));
        }

        src.balance -= amount;
        src.daily_withdrawal_total += amount;
        src.touch(now);
    }
    {
        let dst = ledger.get_mut(to)?;
        dst.balance += amount;
        dst.touch(now);
    }

    let tx = TransactionRecord::transfer(from, to, amount, now, format!("Transfer to {to}"));
    store.append_transaction(&tx)?;
    store.persist_accounts(ledger)?;
    store.append_audit(&format!("Transfer of {amount} from {from} to {to}"))?;
    info!(%amount, from, to, "transfer authorized");
    Ok(())
}
