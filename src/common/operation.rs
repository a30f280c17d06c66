use crate::common::money::Money;

/// A money-moving request handed from the session layer to the authorizer.
#[derive(Debug, Clone)]
pub enum Operation {
    Deposit {
        account: String,
        amount: Money,
    },
    Withdraw {
        account: String,
        amount: Money,
    },
    Transfer {
        from: String,
        to: String,
        amount: Money,
    },
    PostInterest {
        account: String,
    },
    PayBill {
        account: String,
        biller: String,
        amount: Money,
    },
}
