use crate::common::error::BankError;
use crate::domain::ledger::Ledger;
use crate::domain::transaction::TransactionRecord;

/// Durable side of the branch: the ledger snapshot, the append-only
/// transaction log, and the append-only audit trail.
///
/// The security and authorizer components call this after every mutation
/// that must survive a restart. A failure here means the in-memory change is
/// not durable; callers surface that rather than swallowing it.
pub trait Store {
    /// Flushes the entire current ledger, not just the changed account.
    fn persist_accounts(&mut self, ledger: &Ledger) -> Result<(), BankError>;

    /// Durably records one completed transaction.
    fn append_transaction(&mut self, tx: &TransactionRecord) -> Result<(), BankError>;

    /// Appends one human-readable line describing a security- or
    /// money-relevant event.
    fn append_audit(&mut self, event: &str) -> Result<(), BankError>;
}
