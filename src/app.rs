use std::io::{self, BufRead, Write};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::{
    common::{error::BankError, money::Money, operation::Operation},
    domain::{
        account::{Account, AccountStatus, AccountType},
        ledger::Ledger,
        transaction::TransactionRecord,
    },
    io::{file::FileStore, store::Store},
    security::{
        authenticator,
        pin::{hash_pin, is_strong_pin},
    },
    worker::processor::Authorizer,
};

const BRANCH_NAME: &str = "Main Branch";
const BRANCH_ADDRESS: &str = "1 Bank Street";
const IFSC_CODE: &str = "BRNB0000001";
const MICR_CODE: &str = "560002001";

/// Holder details collected at the counter when opening an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub gender: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
    pub age: u32,
    pub account_type: AccountType,
    pub pin: String,
}

/// Opens an account: strength-checks the PIN, derives the credential,
/// assigns the next account/CIF numbers, inserts, persists, audits.
/// Returns the new account number.
pub fn open_account(
    ledger: &mut Ledger,
    store: &mut dyn Store,
    details: NewAccount,
    now: NaiveDateTime,
) -> Result<String, BankError> {
    if !is_strong_pin(&details.pin) {
        return Err(BankError::WeakPin);
    }

    // Accounts are never deleted, so the count is a monotonic sequence.
    let seq = ledger.len() + 1;
    let account_number = format!("BB{seq:06}");
    let account = Account {
        account_number: account_number.clone(),
        cif_number: format!("C{seq:08}"),
        name: details.name,
        gender: details.gender,
        phone_number: details.phone_number,
        email: details.email,
        address: details.address,
        age: details.age,
        pin_hash: hash_pin(&details.pin),
        failed_attempts: 0,
        account_type: details.account_type,
        branch_name: BRANCH_NAME.to_string(),
        branch_address: BRANCH_ADDRESS.to_string(),
        ifsc_code: IFSC_CODE.to_string(),
        micr_code: MICR_CODE.to_string(),
        opening_date: now.date(),
        balance: Money::zero(),
        status: AccountStatus::Active,
        last_transaction_at: now,
        daily_withdrawal_total: Money::zero(),
    };

    ledger.insert_new(account)?;
    store.persist_accounts(ledger)?;
    store.append_audit(&format!("Account opened: {account_number}"))?;
    info!(account = account_number.as_str(), "account opened");
    Ok(account_number)
}

/// Replaces the PIN of an already-authenticated account.
pub fn change_pin(
    ledger: &mut Ledger,
    store: &mut dyn Store,
    account_number: &str,
    new_pin: &str,
) -> Result<(), BankError> {
    if !is_strong_pin(new_pin) {
        return Err(BankError::WeakPin);
    }
    {
        let acc = ledger.get_mut(account_number)?;
        acc.pin_hash = hash_pin(new_pin);
    }
    store.persist_accounts(ledger)?;
    store.append_audit(&format!("PIN changed for account: {account_number}"))?;
    Ok(())
}

/// Marks an account `CLOSED`. Terminal: the entry stays in the ledger but
/// refuses authentication and money movement from then on.
pub fn close_account(
    ledger: &mut Ledger,
    store: &mut dyn Store,
    account_number: &str,
) -> Result<(), BankError> {
    {
        let acc = ledger.get_mut(account_number)?;
        if acc.is_closed() {
            return Err(BankError::InvalidOperation(format!(
                "account {account_number} is already closed"
            )));
        }
        acc.status = AccountStatus::Closed;
    }
    store.persist_accounts(ledger)?;
    store.append_audit(&format!("Account closed: {account_number}"))?;
    info!(account = account_number, "account closed");
    Ok(())
}

/// Entry point of the teller binary: loads the branch from the data
/// directory (optional first argument, default `data`) and runs the menu
/// loop until the operator exits.
pub fn run<I, S>(args: I) -> Result<(), BankError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(|s| s.into()).collect();
    let data_dir = args.get(1).cloned().unwrap_or_else(|| "data".to_string());

    let mut store = FileStore::open(&data_dir)?;
    let mut ledger = Ledger::from_accounts(store.load_accounts()?);
    info!(accounts = ledger.len(), data_dir = %data_dir, "branch ledger loaded");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("\n==== BranchBank ====");
        println!("1. Open account");
        println!("2. Login");
        println!("3. Exit");
        let choice = match prompt(&mut lines, "Choice: ")? {
            Some(c) => c,
            None => return Ok(()),
        };
        match choice.as_str() {
            "1" => {
                if let Err(e) = open_account_flow(&mut ledger, &mut store, &mut lines) {
                    println!("{e}");
                }
            }
            "2" => {
                if login_flow(&mut ledger, &mut store, &mut lines)?.is_none() {
                    return Ok(());
                }
            }
            "3" => return Ok(()),
            other => println!("Unknown choice: {other}"),
        }
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn prompt<B: BufRead>(
    lines: &mut io::Lines<B>,
    label: &str,
) -> Result<Option<String>, BankError> {
    print!("{label}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn prompt_amount<B: BufRead>(
    lines: &mut io::Lines<B>,
    label: &str,
) -> Result<Option<Money>, BankError> {
    let raw = match prompt(lines, label)? {
        Some(r) => r,
        None => return Ok(None),
    };
    let amount = raw
        .parse::<Money>()
        .map_err(|e| BankError::InvalidOperation(format!("bad amount: {e}")))?;
    Ok(Some(amount))
}

fn open_account_flow<B: BufRead>(
    ledger: &mut Ledger,
    store: &mut FileStore,
    lines: &mut io::Lines<B>,
) -> Result<(), BankError> {
    macro_rules! ask {
        ($label:expr) => {
            match prompt(lines, $label)? {
                Some(v) => v,
                None => return Ok(()),
            }
        };
    }

    let name = ask!("Name: ");
    let gender = ask!("Gender: ");
    let phone_number = ask!("Phone: ");
    let email = ask!("Email: ");
    let address = ask!("Address: ");
    let age = ask!("Age: ")
        .parse::<u32>()
        .map_err(|e| BankError::InvalidOperation(format!("bad age: {e}")))?;
    let account_type = match ask!("Account type (savings/current): ").to_lowercase().as_str() {
        "current" => AccountType::Current,
        _ => AccountType::Savings,
    };
    let pin = ask!("Choose a 4-digit PIN: ");

    let number = open_account(
        ledger,
        store,
        NewAccount {
            name,
            gender,
            phone_number,
            email,
            address,
            age,
            account_type,
            pin,
        },
        now(),
    )?;
    println!("Account opened. Your account number is {number}.");
    Ok(())
}

/// Returns `Ok(None)` on end of input, `Ok(Some(()))` otherwise.
fn login_flow<B: BufRead>(
    ledger: &mut Ledger,
    store: &mut FileStore,
    lines: &mut io::Lines<B>,
) -> Result<Option<()>, BankError> {
    let account_number = match prompt(lines, "Account number: ")? {
        Some(v) => v,
        None => return Ok(None),
    };
    let pin = match prompt(lines, "PIN: ")? {
        Some(v) => v,
        None => return Ok(None),
    };

    if let Err(e) = authenticator::validate(ledger, store, &account_number, &pin, now()) {
        println!("{e}");
        return Ok(Some(()));
    }
    println!("Welcome, {}.", ledger.get(&account_number)?.name);

    session_menu(ledger, store, lines, &account_number)
}

fn session_menu<B: BufRead>(
    ledger: &mut Ledger,
    store: &mut FileStore,
    lines: &mut io::Lines<B>,
    account_number: &str,
) -> Result<Option<()>, BankError> {
    let mut authorizer = Authorizer::new();
    loop {
        println!("\n---- {account_number} ----");
        println!("1. Deposit");
        println!("2. Withdraw");
        println!("3. Transfer");
        println!("4. Post monthly interest");
        println!("5. Pay a bill");
        println!("6. Account details");
        println!("7. Transaction history");
        println!("8. Change PIN");
        println!("9. Close account");
        println!("0. Logout");
        let choice = match prompt(lines, "Choice: ")? {
            Some(c) => c,
            None => return Ok(None),
        };

        let outcome = match choice.as_str() {
            "1" => match prompt_amount(lines, "Amount: ")? {
                Some(amount) => authorizer.authorize(
                    ledger,
                    store,
                    Operation::Deposit {
                        account: account_number.to_string(),
                        amount,
                    },
                    now(),
                ),
                None => return Ok(None),
            },
            "2" => match prompt_amount(lines, "Amount: ")? {
                Some(amount) => authorizer.authorize(
                    ledger,
                    store,
                    Operation::Withdraw {
                        account: account_number.to_string(),
                        amount,
                    },
                    now(),
                ),
                None => return Ok(None),
            },
            "3" => {
                let to = match prompt(lines, "Destination account: ")? {
                    Some(v) => v,
                    None => return Ok(None),
                };
                match prompt_amount(lines, "Amount: ")? {
                    Some(amount) => authorizer.authorize(
                        ledger,
                        store,
                        Operation::Transfer {
                            from: account_number.to_string(),
                            to,
                            amount,
                        },
                        now(),
                    ),
                    None => return Ok(None),
                }
            }
            "4" => authorizer.authorize(
                ledger,
                store,
                Operation::PostInterest {
                    account: account_number.to_string(),
                },
                now(),
            ),
            "5" => {
                let biller = match prompt(lines, "Biller: ")? {
                    Some(v) => v,
                    None => return Ok(None),
                };
                match prompt_amount(lines, "Amount: ")? {
                    Some(amount) => authorizer.authorize(
                        ledger,
                        store,
                        Operation::PayBill {
                            account: account_number.to_string(),
                            biller,
                            amount,
                        },
                        now(),
                    ),
                    None => return Ok(None),
                }
            }
            "6" => {
                print_account_details(ledger.get(account_number)?);
                continue;
            }
            "7" => {
                print_history(store, account_number)?;
                continue;
            }
            "8" => {
                let new_pin = match prompt(lines, "New PIN: ")? {
                    Some(v) => v,
                    None => return Ok(None),
                };
                change_pin(ledger, store, account_number, &new_pin)
            }
            "9" => {
                close_account(ledger, store, account_number)?;
                println!("Account closed. Goodbye.");
                return Ok(Some(()));
            }
            "0" => return Ok(Some(())),
            other => {
                println!("Unknown choice: {other}");
                continue;
            }
        };

        match outcome {
            Ok(()) => {
                let balance = ledger.get(account_number)?.balance;
                println!("Done. Current balance: {balance}");
            }
            Err(e) => println!("{e}"),
        }
    }
}

fn print_account_details(acc: &Account) {
    println!("Account number : {}", acc.account_number);
    println!("CIF number     : {}", acc.cif_number);
    println!("Holder         : {} ({}, age {})", acc.name, acc.gender, acc.age);
    println!("Contact        : {} / {}", acc.phone_number, acc.email);
    println!("Address        : {}", acc.address);
    println!("Type           : {}", acc.account_type);
    println!(
        "Branch         : {} , {} (IFSC {}, MICR {})",
        acc.branch_name, acc.branch_address, acc.ifsc_code, acc.micr_code
    );
    println!("Opened on      : {}", acc.opening_date);
    println!("Status         : {}", acc.status);
    println!("Balance        : {}", acc.balance);
}

fn print_history(store: &FileStore, account_number: &str) -> Result<(), BankError> {
    let involves = |tx: &TransactionRecord| {
        tx.account_number == account_number || tx.to_account == account_number
    };
    let txs = store.load_transactions()?;
    let mut any = false;
    for tx in txs.iter().filter(|t| involves(t)) {
        any = true;
        println!(
            "{}  {:<12}  {:>12}  {}",
            tx.timestamp,
            tx.kind.to_string(),
            tx.amount.to_string_2dp(),
            tx.description
        );
    }
    if !any {
        println!("No transactions yet.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::memory::MemoryStore;
    use crate::test_utils::{datetime, test_account};

    fn details(pin: &str) -> NewAccount {
        NewAccount {
            name: "Asha Rao".to_string(),
            gender: "F".to_string(),
            phone_number: "9000000001".to_string(),
            email: "asha@example.com".to_string(),
            address: "4 Lake Road".to_string(),
            age: 41,
            account_type: AccountType::Savings,
            pin: pin.to_string(),
        }
    }

    #[test]
    fn open_account_assigns_sequential_numbers() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::new();
        let now = datetime("2026-03-02T10:00:00");

        let first = open_account(&mut ledger, &mut store, details("4821"), now).unwrap();
        let second = open_account(&mut ledger, &mut store, details("4821"), now).unwrap();

        assert_eq!(first, "BB000001");
        assert_eq!(second, "BB000002");
        assert_eq!(ledger.len(), 2);
        let acc = ledger.get("BB000001").unwrap();
        assert_eq!(acc.balance, Money::zero());
        assert_eq!(acc.status, AccountStatus::Active);
        // The credential is stored derived, never raw.
        assert_ne!(acc.pin_hash, "4821");
        assert!(store.audit_contains("Account opened: BB000001"));
        assert_eq!(store.persist_calls, 2);
    }

    #[test]
    fn open_account_rejects_weak_pins() {
        let mut ledger = Ledger::new();
        let mut store = MemoryStore::new();
        let now = datetime("2026-03-02T10:00:00");

        for pin in ["1111", "123", "12345", ""] {
            let err = open_account(&mut ledger, &mut store, details(pin), now).unwrap_err();
            assert!(matches!(err, BankError::WeakPin));
        }
        assert!(ledger.is_empty());
    }

    #[test]
    fn change_pin_rehashes_and_persists() {
        let mut ledger = Ledger::from_accounts(vec![test_account("A001", Money::zero())]);
        let mut store = MemoryStore::new();
        let old_hash = ledger.get("A001").unwrap().pin_hash.clone();

        change_pin(&mut ledger, &mut store, "A001", "8642").unwrap();

        let acc = ledger.get("A001").unwrap();
        assert_ne!(acc.pin_hash, old_hash);
        assert_eq!(acc.pin_hash, hash_pin("8642"));
        assert_eq!(store.persist_calls, 1);
        assert!(store.audit_contains("PIN changed for account: A001"));

        let err = change_pin(&mut ledger, &mut store, "A001", "7777").unwrap_err();
        assert!(matches!(err, BankError::WeakPin));
    }

    #[test]
    fn close_account_is_terminal() {
        let mut ledger = Ledger::from_accounts(vec![test_account("A001", Money::zero())]);
        let mut store = MemoryStore::new();

        close_account(&mut ledger, &mut store, "A001").unwrap();
        assert_eq!(ledger.get("A001").unwrap().status, AccountStatus::Closed);
        assert!(store.audit_contains("Account closed: A001"));

        let err = close_account(&mut ledger, &mut store, "A001").unwrap_err();
        assert!(matches!(err, BankError::InvalidOperation(_)));
    }
}
