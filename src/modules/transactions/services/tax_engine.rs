use rust_decimal::Decimal;

use crate::config::TaxConfig;
use crate::core::money;

/// Which taxes a transaction opts into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxFlags {
    pub ppn: bool,
    pub regional: bool,
    pub pph22: bool,
    pub pph23: bool,
}

/// Every computed tax amount plus the resulting total.
///
/// Amounts are non-negative; the withholding taxes are subtracted inside
/// `total_amount`. A disabled tax always has amount zero.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxBreakdown {
    pub ppn_amount: Decimal,
    pub regional_tax_amount: Decimal,
    pub pph22_amount: Decimal,
    pub pph23_amount: Decimal,
    pub stamp_duty_required: bool,
    pub stamp_duty_amount: Decimal,
    pub total_amount: Decimal,
}

/// Applies the configured tax stack to a subtotal
pub struct TaxEngine {
    config: TaxConfig,
}

impl TaxEngine {
    pub fn new(config: TaxConfig) -> Self {
        Self { config }
    }

    /// Compute all tax amounts for a subtotal.
    ///
    /// Stamp duty triggers when the amount due before stamping, that is
    /// subtotal plus the additive taxes minus the withheld ones, reaches
    /// the configured threshold (inclusive).
    pub fn assess(&self, subtotal: Decimal, flags: TaxFlags) -> TaxBreakdown {
        let ppn_amount = self.rated_amount(subtotal, self.config.ppn_rate, flags.ppn);
        let regional_tax_amount =
            self.rated_amount(subtotal, self.config.regional_rate, flags.regional);
        let pph22_amount = self.rated_amount(subtotal, self.config.pph22_rate, flags.pph22);
        let pph23_amount = self.rated_amount(subtotal, self.config.pph23_rate, flags.pph23);

        let before_stamp =
            subtotal + ppn_amount + regional_tax_amount - pph22_amount - pph23_amount;

        let stamp_duty_required = before_stamp >= self.config.stamp_duty_threshold;
        let stamp_duty_amount = if stamp_duty_required {
            self.config.stamp_duty_amount
        } else {
            Decimal::ZERO
        };

        TaxBreakdown {
            ppn_amount,
            regional_tax_amount,
            pph22_amount,
            pph23_amount,
            stamp_duty_required,
            stamp_duty_amount,
            total_amount: money::round(before_stamp + stamp_duty_amount),
        }
    }

    fn rated_amount(&self, subtotal: Decimal, rate: Decimal, enabled: bool) -> Decimal {
        if enabled {
            money::round(subtotal * rate)
        } else {
            Decimal::ZERO
        }
    }
}
