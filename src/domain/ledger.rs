use std::collections::BTreeMap;

use crate::common::error::BankError;
use crate::domain::account::Account;

/// The authoritative in-memory account map, keyed by account number.
///
/// Only account opening inserts; every other component mutates entries in
/// place. A `BTreeMap` keeps iteration (and thus persistence) ordered by
/// account number.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: BTreeMap<String, Account>,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            accounts: BTreeMap::new(),
        }
    }

    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        Self {
            accounts: accounts
                .into_iter()
                .map(|a| (a.account_number.clone(), a))
                .collect(),
        }
    }

    pub fn accounts(&self) -> &BTreeMap<String, Account> {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn contains(&self, account_number: &str) -> bool {
        self.accounts.contains_key(account_number)
    }

    pub fn get(&self, account_number: &str) -> Result<&Account, BankError> {
        self.accounts
            .get(account_number)
            .ok_or_else(|| BankError::NotFound(account_number.to_string()))
    }

    pub fn get_mut(&mut self, account_number: &str) -> Result<&mut Account, BankError> {
        self.accounts
            .get_mut(account_number)
            .ok_or_else(|| BankError::NotFound(account_number.to_string()))
    }

    /// Inserts a newly opened account; rejects a duplicate account number.
    pub fn insert_new(&mut self, account: Account) -> Result<(), BankError> {
        if self.accounts.contains_key(&account.account_number) {
            return Err(BankError::InvalidOperation(format!(
                "account {} already exists",
                account.account_number
            )));
        }
        self.accounts.insert(account.account_number.clone(), account);
        Ok(())
    }
}
