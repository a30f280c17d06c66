pub mod error;
pub mod limits;
pub mod money;
pub mod operation;
