//! Shared fixtures for unit and integration tests.

use chrono::{NaiveDate, NaiveDateTime};

use crate::common::error::BankError;
use crate::common::money::Money;
use crate::domain::account::{Account, AccountStatus, AccountType};
use crate::domain::ledger::Ledger;
use crate::domain::transaction::TransactionRecord;
use crate::io::memory::MemoryStore;
use crate::io::store::Store;
use crate::security::pin::hash_pin;

/// A plain active savings account with PIN "1234".
pub fn test_account(number: &str, balance: Money) -> Account {
    Account {
        account_number: number.to_string(),
        cif_number: format!("CIF{number}"),
        name: "Test Holder".to_string(),
        gender: "F".to_string(),
        phone_number: "9000000000".to_string(),
        email: "holder@example.com".to_string(),
        address: "12 Test Lane".to_string(),
        age: 30,
        pin_hash: hash_pin("1234"),
        failed_attempts: 0,
        account_type: AccountType::Savings,
        branch_name: "Main Branch".to_string(),
        branch_address: "1 Bank Street".to_string(),
        ifsc_code: "BRNB0000001".to_string(),
        micr_code: "560002001".to_string(),
        opening_date: "2025-01-01".parse().unwrap(),
        balance,
        status: AccountStatus::Active,
        last_transaction_at: datetime("2026-03-01T09:00:00"),
        daily_withdrawal_total: Money::zero(),
    }
}

/// A `Store` whose ledger flush always fails, for exercising the
/// persistence-failure path. Logs still reach the inner store, so tests can
/// see how far an operation got before the flush.
#[derive(Debug, Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for FailingStore {
    fn persist_accounts(&mut self, _ledger: &Ledger) -> Result<(), BankError> {
        Err(BankError::Storage("simulated disk failure".to_string()))
    }

    fn append_transaction(&mut self, tx: &TransactionRecord) -> Result<(), BankError> {
        self.inner.append_transaction(tx)
    }

    fn append_audit(&mut self, event: &str) -> Result<(), BankError> {
        self.inner.append_audit(event)
    }
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn datetime(s: &str) -> NaiveDateTime {
    s.parse().unwrap()
}
