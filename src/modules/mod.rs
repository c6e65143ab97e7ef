pub mod catalog;
pub mod documents;
pub mod store;
pub mod transactions;
