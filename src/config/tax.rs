use crate::core::{AppError, Result};
use rust_decimal::Decimal;
use std::env;

/// Statutory tax rates and the stamp duty rule.
///
/// Every rate the pricing pipeline applies lives here. Rates can be
/// overridden per deployment through environment variables; the defaults
/// are the current Indonesian rates.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxConfig {
    /// PPN (value-added tax) rate, applied on the subtotal
    pub ppn_rate: Decimal,
    /// Regional consumption tax rate (PB1), applied on the subtotal
    pub regional_rate: Decimal,
    /// PPh 22 withholding rate, deducted from the amount due
    pub pph22_rate: Decimal,
    /// PPh 23 withholding rate, deducted from the amount due
    pub pph23_rate: Decimal,
    /// Stamp duty applies when the pre-stamp total reaches this amount
    pub stamp_duty_threshold: Decimal,
    /// Flat stamp duty amount (bea materai)
    pub stamp_duty_amount: Decimal,
}

impl Default for TaxConfig {
    fn default() -> Self {
        TaxConfig {
            ppn_rate: Decimal::new(11, 2),
            regional_rate: Decimal::new(10, 2),
            pph22_rate: Decimal::new(2, 2),
            pph23_rate: Decimal::new(2, 2),
            stamp_duty_threshold: Decimal::from(5_000_000),
            stamp_duty_amount: Decimal::from(10_000),
        }
    }
}

impl TaxConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = TaxConfig::default();
        Ok(TaxConfig {
            ppn_rate: decimal_var("TAX_PPN_RATE", defaults.ppn_rate)?,
            regional_rate: decimal_var("TAX_REGIONAL_RATE", defaults.regional_rate)?,
            pph22_rate: decimal_var("TAX_PPH22_RATE", defaults.pph22_rate)?,
            pph23_rate: decimal_var("TAX_PPH23_RATE", defaults.pph23_rate)?,
            stamp_duty_threshold: decimal_var(
                "TAX_STAMP_DUTY_THRESHOLD",
                defaults.stamp_duty_threshold,
            )?,
            stamp_duty_amount: decimal_var("TAX_STAMP_DUTY_AMOUNT", defaults.stamp_duty_amount)?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        let rates = [
            ("TAX_PPN_RATE", self.ppn_rate),
            ("TAX_REGIONAL_RATE", self.regional_rate),
            ("TAX_PPH22_RATE", self.pph22_rate),
            ("TAX_PPH23_RATE", self.pph23_rate),
        ];
        for (name, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(AppError::Configuration(format!(
                    "{} must be between 0 and 1",
                    name
                )));
            }
        }
        if self.stamp_duty_threshold < Decimal::ZERO || self.stamp_duty_amount < Decimal::ZERO {
            return Err(AppError::Configuration(
                "Stamp duty threshold and amount must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn decimal_var(name: &str, default: Decimal) -> Result<Decimal> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", name))),
        Err(_) => Ok(default),
    }
}
