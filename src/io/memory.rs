use crate::common::error::BankError;
use crate::domain::account::Account;
use crate::domain::ledger::Ledger;
use crate::domain::transaction::TransactionRecord;
use crate::io::store::Store;

/// A `Store` that keeps everything in memory. Backs the test suite and lets
/// assertions inspect what was persisted, logged, and audited.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub transactions: Vec<TransactionRecord>,
    pub audit_log: Vec<String>,
    pub persisted: Vec<Account>,
    pub persist_calls: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audit_contains(&self, needle: &str) -> bool {
        self.audit_log.iter().any(|l| l.contains(needle))
    }
}

impl Store for MemoryStore {
    fn persist_accounts(&mut self, ledger: &Ledger) -> Result<(), BankError> {
        self.persisted = ledger.accounts().values().cloned().collect();
        self.persist_calls += 1;
        Ok(())
    }

    fn append_transaction(&mut self, tx: &TransactionRecord) -> Result<(), BankError> {
        self.transactions.push(tx.clone());
        Ok(())
    }

    fn append_audit(&mut self, event: &str) -> Result<(), BankError> {
        self.audit_log.push(event.to_string());
        Ok(())
    }
}
