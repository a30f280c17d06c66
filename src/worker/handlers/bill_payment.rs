use chrono::NaiveDateTime;
use tracing::info;

use crate::{
    common::{error::BankError, money::Money},
    domain::{
        ledger::Ledger,
        transaction::{TransactionRecord, TxKind},
    },
    io::store::Store,
    worker::handlers::ensure_active,
};

/// Debits a bill payment. No minimum and no daily cap; only a positive
/// amount covered by the balance.
pub fn handle(
    ledger: &mut Ledger,
    store: &mut dyn Store,
    account_number: &str,
    biller: &str,
    amount: Money,
    now: NaiveDateTime,
) -> Result<(), BankError> {
    ensure_active(ledger.get(account_number)?)?;

    if !amount.is_positive() {
        return Err(BankError::LimitViolation(
            "bill amount must be positive".to_string(),
        ));
    }
    {
        let acc = ledger.get_mut(account_number)?;
        if amount > acc.balance {
            return Err(BankError::InsufficientFunds {
                balance: acc.balance.to_string_2dp(),
                requested: amount.to_string_2dp(),
            });
        }
        acc.balance -= amount;
        acc.touch(now);
    }

    let tx = TransactionRecord::new(
        account_number,
        TxKind::BillPayment,
        amount,
        now,
        format!("Bill payment to {biller}"),
    );
    store.append_transaction(&tx)?;
    store.persist_accounts(ledger)?;
    store.append_audit(&format!(
        "Bill payment of {amount} to {biller} from account {account_number}"
    ))?;
    info!(account = account_number, %amount, biller, "bill payment authorized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memory::MemoryStore;
    use crate::test_utils::{datetime, test_account};

    fn setup(balance: i64) -> (Ledger, MemoryStore, NaiveDateTime) {
        let ledger = Ledger::from_accounts(vec![test_account("A001", Money::new(balance))]);
        (ledger, MemoryStore::new(), datetime("2026-03-02T10:00:00"))
    }

    #[test]
    fn bill_payment_debits_and_names_the_biller() {
        let (mut ledger, mut store, now) = setup(1_000_00);

        handle(&mut ledger, &mut store, "A001", "City Power", Money::new(230_50), now).unwrap();

        assert_eq!(ledger.get("A001").unwrap().balance, Money::new(769_50));
        let rec = &store.transactions[0];
        assert_eq!(rec.kind, TxKind::BillPayment);
        assert_eq!(rec.description, "Bill payment to City Power");
    }

    #[test]
    fn rejects_nonpositive_and_uncovered_amounts() {
        let (mut ledger, mut store, now) = setup(100_00);

        let err =
            handle(&mut ledger, &mut store, "A001", "City Power", Money::zero(), now).unwrap_err();
        assert!(matches!(err, BankError::LimitViolation(_)));

        let err = handle(
            &mut ledger,
            &mut store,
            "A001",
            "City Power",
            Money::new(200_00),
            now,
        )
        .unwrap_err();
        assert!(matches!(err, BankError::InsufficientFunds { .. }));

        assert_eq!(ledger.get("A001").unwrap().balance, Money::new(100_00));
        assert!(store.transactions.is_empty());
    }
}
