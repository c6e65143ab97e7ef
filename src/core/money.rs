use rust_decimal::Decimal;

use crate::core::error::{AppError, Result};

/// Decimal places carried by every monetary amount in the system.
pub const MONEY_SCALE: u32 = 2;

/// Rounds an amount to the monetary scale.
pub fn round(amount: Decimal) -> Decimal {
    amount.round_dp(MONEY_SCALE)
}

/// Formats an amount the Indonesian way: `Rp 1.234.567,89`.
///
/// Dots group the integer part in thousands, the comma separates the two
/// decimal places.
pub fn format_idr(amount: Decimal) -> String {
    let rounded = round(amount);
    let negative = rounded.is_sign_negative();
    let abs = rounded.abs();

    let plain = format!("{:.2}", abs);
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, f),
        None => (plain.as_str(), "00"),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    let digits = int_part.as_bytes();
    for (idx, digit) in digits.iter().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit as char);
    }

    if negative {
        format!("-Rp {},{}", grouped, frac_part)
    } else {
        format!("Rp {},{}", grouped, frac_part)
    }
}

/// Formats a plain quantity or percentage without trailing zeros (`2`, `1,5`).
pub fn format_plain(value: Decimal) -> String {
    value.normalize().to_string().replace('.', ",")
}

/// Parses a decimal persisted as exact text.
///
/// The schema owns these columns; a parse failure means the database was
/// edited outside the application.
pub fn parse_stored(column: &str, raw: &str) -> Result<Decimal> {
    raw.parse().map_err(|e| {
        AppError::internal(format!("Invalid decimal in column {}: {} ({})", column, raw, e))
    })
}
