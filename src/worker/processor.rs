use chrono::NaiveDateTime;

use crate::{
    common::{error::BankError, operation::Operation},
    domain::ledger::Ledger,
    io::store::Store,
    worker::handlers::{bill_payment, deposit, interest, transfer, withdraw},
};

/// Dispatches authorization requests to the per-operation handlers.
#[derive(Debug, Default)]
pub struct Authorizer {}

impl Authorizer {
    pub fn new() -> Self {
        Self {}
    }

    pub fn authorize(
        &mut self,
        ledger: &mut Ledger,
        store: &mut dyn Store,
        op: Operation,
        now: NaiveDateTime,
    ) -> Result<(), BankError> {
        match op {
            Operation::Deposit { account, amount } => {
                deposit::handle(ledger, store, &account, amount, now)
            }
            Operation::Withdraw { account, amount } => {
                withdraw::handle(ledger, store, &account, amount, now)
            }
            Operation::Transfer { from, to, amount } => {
                transfer::handle(ledger, store, &from, &to, amount, now)
            }
            Operation::PostInterest { account } => interest::handle(ledger, store, &account, now),
            Operation::PayBill {
                account,
                biller,
                amount,
            } => bill_payment::handle(ledger, store, &account, &biller, amount, now),
        }
    }
}
