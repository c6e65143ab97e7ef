pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Transaction, TransactionLine, TransactionStatus};
pub use repositories::TransactionRepository;
pub use services::{PricingCalculator, TaxEngine, TaxFlags, TransactionService};
