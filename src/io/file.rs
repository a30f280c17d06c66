use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::PathBuf;

use chrono::Local;

use crate::common::error::BankError;
use crate::domain::account::Account;
use crate::domain::ledger::Ledger;
use crate::domain::transaction::TransactionRecord;
use crate::io::store::Store;

const ACCOUNTS_FILE: &str = "accounts.csv";
const TRANSACTIONS_FILE: &str = "transactions.csv";
const AUDIT_LOG_FILE: &str = "audit.log";

/// Flat-file `Store`: the ledger snapshot as `accounts.csv` (rewritten in
/// full, ordered by account number), `transactions.csv` append-only, and a
/// timestamped `audit.log`.
#[derive(Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, BankError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(ACCOUNTS_FILE)
    }

    fn transactions_path(&self) -> PathBuf {
        self.data_dir.join(TRANSACTIONS_FILE)
    }

    fn audit_path(&self) -> PathBuf {
        self.data_dir.join(AUDIT_LOG_FILE)
    }

    /// Loads the last persisted ledger snapshot; an absent file is an empty
    /// branch, not an error.
    pub fn load_accounts(&self) -> Result<Vec<Account>, BankError> {
        let path = self.accounts_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)?;
        let mut accounts = Vec::new();
        for row in rdr.deserialize::<Account>() {
            accounts.push(row?);
        }
        Ok(accounts)
    }

    /// Loads the full transaction log, oldest first.
    pub fn load_transactions(&self) -> Result<Vec<TransactionRecord>, BankError> {
        let path = self.transactions_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&path)?;
        let mut txs = Vec::new();
        for row in rdr.deserialize::<TransactionRecord>() {
            txs.push(row?);
        }
        Ok(txs)
    }
}

impl Store for FileStore {
    fn persist_accounts(&mut self, ledger: &Ledger) -> Result<(), BankError> {
        let mut wtr = csv::Writer::from_path(self.accounts_path())?;
        // BTreeMap iteration keeps the file ordered by account number.
        for acc in ledger.accounts().values() {
            wtr.serialize(acc)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn append_transaction(&mut self, tx: &TransactionRecord) -> Result<(), BankError> {
        let path = self.transactions_path();
        // Empty counts as headerless: a file created but never flushed must
        // still get its header, or the first record would be read as one.
        let needs_header = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        wtr.serialize(tx)?;
        wtr.flush()?;
        Ok(())
    }

    fn append_audit(&mut self, event: &str) -> Result<(), BankError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.audit_path())?;
        writeln!(
            file,
            "[{}] {event}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        Ok(())
    }
}
