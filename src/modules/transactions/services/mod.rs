pub mod pricing;
pub mod tax_engine;
pub mod transaction_service;

pub use pricing::{PricedLine, PricingCalculator, PricingOutcome};
pub use tax_engine::{TaxBreakdown, TaxEngine, TaxFlags};
pub use transaction_service::TransactionService;
