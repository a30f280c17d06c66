use chrono::{NaiveDate, NaiveDateTime};

use crate::common::money::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountStatus {
    Active,
    /// Entered via failed-attempt lockout or inactivity; only an
    /// administrative unlock leaves it.
    Locked,
    /// Terminal.
    Closed,
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AccountStatus::Active => "ACTIVE",
            AccountStatus::Locked => "LOCKED",
            AccountStatus::Closed => "CLOSED",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    Savings,
    Current,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            AccountType::Savings => "SAVINGS",
            AccountType::Current => "CURRENT",
        })
    }
}

/// One row of the branch ledger: holder identity, stored credential, and the
/// mutable financial state the authorizer operates on.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Account {
    pub account_number: String,
    pub cif_number: String,
    pub name: String,
    pub gender: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub age: u32,
    /// Derived credential; the raw PIN is never stored.
    pub pin_hash: String,
    pub failed_attempts: u32,
    pub account_type: AccountType,
    pub branch_name: String,
    pub branch_address: String,
    pub ifsc_code: String,
    pub micr_code: String,
    pub opening_date: NaiveDate,
    pub balance: Money,
    pub status: AccountStatus,
    pub last_transaction_at: NaiveDateTime,
    pub daily_withdrawal_total: Money,
}

impl Account {
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    pub fn is_locked(&self) -> bool {
        self.status == AccountStatus::Locked
    }

    pub fn is_closed(&self) -> bool {
        self.status == AccountStatus::Closed
    }

    /// Whole calendar days since the last transaction.
    pub fn days_inactive(&self, today: NaiveDate) -> i64 {
        (today - self.last_transaction_at.date()).num_days()
    }

    /// Resets the rolling withdrawal total on calendar-day rollover. Must run
    /// before any daily-cap comparison; a no-op within the same day.
    pub fn roll_daily_window(&mut self, today: NaiveDate) {
        if self.last_transaction_at.date() != today {
            self.daily_withdrawal_total = Money::zero();
        }
    }

    pub fn touch(&mut self, now: NaiveDateTime) {
        self.last_transaction_at = now;
    }
}
