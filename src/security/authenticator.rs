use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::common::error::BankError;
use crate::common::limits::MAX_FAILED_ATTEMPTS;
use crate::domain::account::AccountStatus;
use crate::domain::ledger::Ledger;
use crate::io::store::Store;
use crate::security::{inactivity, pin::hash_pin};

/// Validates an account-number + PIN pair, applying the lockout policy.
///
/// Checks run in order and short-circuit: existence, inactivity lock,
/// status, then the hash comparison with attempt counting. Every branch
/// that mutates `failed_attempts` or `status` persists the ledger and
/// leaves an audit line; failure is always a typed error, never a panic.
pub fn validate(
    ledger: &mut Ledger,
    store: &mut dyn Store,
    account_number: &str,
    pin: &str,
    now: NaiveDateTime,
) -> Result<(), BankError> {
    if !ledger.contains(account_number) {
        store.append_audit(&format!(
            "Failed login attempt - account not found: {account_number}"
        ))?;
        return Err(BankError::NotFound(account_number.to_string()));
    }

    inactivity::check_inactivity(ledger, store, account_number, now.date())?;

    match ledger.get(account_number)?.status {
        AccountStatus::Closed => {
            store.append_audit(&format!(
                "Attempt to access closed account: {account_number}"
            ))?;
            return Err(BankError::InvalidOperation(format!(
                "account {account_number} is closed"
            )));
        }
        AccountStatus::Locked => {
            store.append_audit(&format!(
                "Attempt to access locked account: {account_number}"
            ))?;
            return Err(BankError::AccountLocked(account_number.to_string()));
        }
        AccountStatus::Active => {}
    }

    let supplied = hash_pin(pin);
    let (matched, attempts_before) = {
        let acc = ledger.get_mut(account_number)?;
        let before = acc.failed_attempts;
        if acc.pin_hash == supplied {
            acc.failed_attempts = 0;
            (true, before)
        } else {
            acc.failed_attempts += 1;
            if acc.failed_attempts >= MAX_FAILED_ATTEMPTS {
                acc.status = AccountStatus::Locked;
            }
            (false, before)
        }
    };

    if matched {
        info!(account = account_number, "successful login");
        store.append_audit(&format!("Successful login: {account_number}"))?;
        if attempts_before > 0 {
            store.persist_accounts(ledger)?;
        }
        return Ok(());
    }

    let attempts = attempts_before + 1;
    warn!(account = account_number, attempt = attempts, "failed login");
    store.append_audit(&format!(
        "Failed login attempt for account: {account_number} (attempt {attempts})"
    ))?;

    if attempts >= MAX_FAILED_ATTEMPTS {
        store.persist_accounts(ledger)?;
        store.append_audit(&format!("Account locked: {account_number}"))?;
        Err(BankError::AccountLocked(account_number.to_string()))
    } else {
        store.persist_accounts(ledger)?;
        Err(BankError::InvalidCredential {
            remaining: MAX_FAILED_ATTEMPTS - attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::money::Money;
    use crate::io::memory::MemoryStore;
    use crate::test_utils::{datetime, test_account};

    fn setup() -> (Ledger, MemoryStore, NaiveDateTime) {
        let ledger = Ledger::from_accounts(vec![test_account("A001", Money::new(10_000_00))]);
        (ledger, MemoryStore::new(), datetime("2026-03-02T10:00:00"))
    }

    #[test]
    fn correct_pin_succeeds_and_resets_attempts() {
        let (mut ledger, mut store, now) = setup();
        ledger.get_mut("A001").unwrap().failed_attempts = 2;

        validate(&mut ledger, &mut store, "A001", "1234", now).unwrap();

        let acc = ledger.get("A001").unwrap();
        assert_eq!(acc.failed_attempts, 0);
        assert!(store.audit_contains("Successful login: A001"));
        // The counter reset is a mutation and must reach the store.
        assert_eq!(store.persist_calls, 1);
    }

    #[test]
    fn clean_success_does_not_persist() {
        let (mut ledger, mut store, now) = setup();
        validate(&mut ledger, &mut store, "A001", "1234", now).unwrap();
        assert_eq!(store.persist_calls, 0);
    }

    #[test]
    fn wrong_pin_counts_attempts_and_reports_remaining() {
        let (mut ledger, mut store, now) = setup();

        let err = validate(&mut ledger, &mut store, "A001", "9999", now).unwrap_err();
        assert!(matches!(err, BankError::InvalidCredential { remaining: 2 }));
        assert_eq!(ledger.get("A001").unwrap().failed_attempts, 1);

        let err = validate(&mut ledger, &mut store, "A001", "9999", now).unwrap_err();
        assert!(matches!(err, BankError::InvalidCredential { remaining: 1 }));
        assert_eq!(ledger.get("A001").unwrap().failed_attempts, 2);
        assert!(store.audit_contains("(attempt 2)"));
    }

    #[test]
    fn third_failure_locks_and_correct_pin_no_longer_works() {
        let (mut ledger, mut store, now) = setup();

        for _ in 0..2 {
            let _ = validate(&mut ledger, &mut store, "A001", "9999", now);
        }
        let err = validate(&mut ledger, &mut store, "A001", "9999", now).unwrap_err();
        assert!(matches!(err, BankError::AccountLocked(_)));
        assert_eq!(ledger.get("A001").unwrap().status, AccountStatus::Locked);
        assert!(store.audit_contains("Account locked: A001"));

        // Even the right PIN is refused once locked.
        let err = validate(&mut ledger, &mut store, "A001", "1234", now).unwrap_err();
        assert!(matches!(err, BankError::AccountLocked(_)));
        assert_eq!(ledger.get("A001").unwrap().failed_attempts, 3);
    }

    #[test]
    fn unknown_account_is_audited_without_mutation() {
        let (mut ledger, mut store, now) = setup();

        let err = validate(&mut ledger, &mut store, "A404", "1234", now).unwrap_err();
        assert!(matches!(err, BankError::NotFound(_)));
        assert!(store.audit_contains("account not found: A404"));
        assert_eq!(store.persist_calls, 0);
    }

    #[test]
    fn stale_account_is_locked_before_the_pin_is_checked() {
        let (mut ledger, mut store, _) = setup();
        ledger.get_mut("A001").unwrap().last_transaction_at = datetime("2025-01-01T09:00:00");

        let late = datetime("2026-03-02T10:00:00");
        let err = validate(&mut ledger, &mut store, "A001", "1234", late).unwrap_err();

        assert!(matches!(err, BankError::AccountLocked(_)));
        assert_eq!(ledger.get("A001").unwrap().status, AccountStatus::Locked);
        assert!(store.audit_contains("inactivity: A001"));
    }

    #[test]
    fn persist_failure_on_a_failed_attempt_surfaces_as_storage() {
        let (mut ledger, _, now) = setup();
        let mut store = crate::test_utils::FailingStore::new();

        let err = validate(&mut ledger, &mut store, "A001", "9999", now).unwrap_err();
        assert!(matches!(err, BankError::Storage(_)));

        // The attempt was counted and audited before the flush failed.
        assert_eq!(ledger.get("A001").unwrap().failed_attempts, 1);
        assert!(store.inner.audit_contains("(attempt 1)"));
    }

    #[test]
    fn closed_account_is_refused() {
        let (mut ledger, mut store, now) = setup();
        ledger.get_mut("A001").unwrap().status = AccountStatus::Closed;

        let err = validate(&mut ledger, &mut store, "A001", "1234", now).unwrap_err();
        assert!(matches!(err, BankError::InvalidOperation(_)));
        assert!(store.audit_contains("closed account: A001"));
    }
}
