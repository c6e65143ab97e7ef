pub mod line;
pub mod requests;
pub mod transaction;

pub use line::TransactionLine;
pub use requests::{
    CreateTransactionRequest, TransactionFilter, TransactionItemInput, UpdateTransactionRequest,
};
pub use transaction::{NewTransaction, NewTransactionLine, Transaction, TransactionStatus};
