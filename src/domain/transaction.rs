use chrono::NaiveDateTime;

use crate::common::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxKind {
    Deposit,
    Withdrawal,
    Transfer,
    Interest,
    BillPayment,
}

impl std::fmt::Display for TxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TxKind::Deposit => "DEPOSIT",
            TxKind::Withdrawal => "WITHDRAWAL",
            TxKind::Transfer => "TRANSFER",
            TxKind::Interest => "INTEREST",
            TxKind::BillPayment => "BILL_PAYMENT",
        })
    }
}

/// One completed money movement. Appended by the authorizer on success,
/// never mutated or removed afterwards.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TransactionRecord {
    pub account_number: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    // Populated for transfers only.
    pub from_account: String,
    pub to_account: String,
    pub amount: Money,
    pub timestamp: NaiveDateTime,
    pub description: String,
}

impl TransactionRecord {
    pub fn new(
        account_number: &str,
        kind: TxKind,
        amount: Money,
        timestamp: NaiveDateTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_number: account_number.to_string(),
            kind,
            from_account: String::new(),
            to_account: String::new(),
            amount,
            timestamp,
            description: description.into(),
        }
    }

    pub fn transfer(
        from: &str,
        to: &str,
        amount: Money,
        timestamp: NaiveDateTime,
        description: impl Into<String>,
    ) -> Self {
        Self {
            account_number: from.to_string(),
            kind: TxKind::Transfer,
            from_account: from.to_string(),
            to_account: to.to_string(),
            amount,
            timestamp,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display_matches_the_log_file_forms() {
        assert_eq!(TxKind::Deposit.to_string(), "DEPOSIT");
        assert_eq!(TxKind::Withdrawal.to_string(), "WITHDRAWAL");
        assert_eq!(TxKind::Transfer.to_string(), "TRANSFER");
        assert_eq!(TxKind::Interest.to_string(), "INTEREST");
        assert_eq!(TxKind::BillPayment.to_string(), "BILL_PAYMENT");
    }
}

