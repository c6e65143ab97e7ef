//! Notaku back-office library
//!
//! Catalog, taxed sales transactions, and printable HTML documents for a
//! single small store.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::catalog;
pub use modules::documents;
pub use modules::store;
pub use modules::transactions;
