/// Failure taxonomy for authentication and money movement.
///
/// Every check runs before any mutation; an `Err` therefore always means the
/// ledger is unchanged, except `Storage`, which can follow an in-memory
/// mutation and means the change may not survive a restart.
#[derive(thiserror::Error, Debug)]
pub enum BankError {
    #[error("account {0} not found")]
    NotFound(String),
    #[error("account {0} is locked, contact customer support")]
    AccountLocked(String),
    #[error("invalid PIN, {remaining} attempts remaining")]
    InvalidCredential { remaining: u32 },
    #[error("{0}")]
    LimitViolation(String),
    #[error("insufficient funds: balance {balance} is less than {requested}")]
    InsufficientFunds { balance: String, requested: String },
    #[error("{0}")]
    InvalidOperation(String),
    #[error("weak PIN: must be exactly 4 characters and not all identical")]
    WeakPin,
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for BankError {
    fn from(e: std::io::Error) -> Self {
        BankError::Storage(e.to_string())
    }
}

impl From<csv::Error> for BankError {
    fn from(e: csv::Error) -> Self {
        BankError::Storage(e.to_string())
    }
}
