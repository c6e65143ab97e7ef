// Tests for rupiah formatting as it appears on printed documents.
//
// Amounts render with dots grouping the thousands and a comma before the
// two decimal places, the way Indonesian invoices are written.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use notaku::core::money::{format_idr, format_plain, parse_stored, round};

#[test]
fn test_grouping_across_magnitudes() {
    assert_eq!(format_idr(dec!(0)), "Rp 0,00");
    assert_eq!(format_idr(dec!(100)), "Rp 100,00");
    assert_eq!(format_idr(dec!(12345.6)), "Rp 12.345,60");
    assert_eq!(format_idr(dec!(2220000)), "Rp 2.220.000,00");
    assert_eq!(format_idr(dec!(1000000000)), "Rp 1.000.000.000,00");
}

#[test]
fn test_negative_amounts_carry_the_sign_outside() {
    assert_eq!(format_idr(dec!(-0.5)), "-Rp 0,50");
    assert_eq!(format_idr(dec!(-2500000)), "-Rp 2.500.000,00");
}

#[test]
fn test_sub_cent_input_is_rounded_first() {
    assert_eq!(format_idr(dec!(1994.98005)), "Rp 1.994,98");
}

#[test]
fn test_plain_formatting_for_quantities() {
    assert_eq!(format_plain(dec!(2)), "2");
    assert_eq!(format_plain(dec!(12.50)), "12,5");
    assert_eq!(format_plain(dec!(0.25)), "0,25");
    assert_eq!(format_plain(dec!(100)), "100");
}

proptest! {
    #[test]
    fn formatted_amounts_keep_their_shape(cents in -1_000_000_000_000i64..=1_000_000_000_000i64) {
        let amount = Decimal::new(cents, 2);
        let formatted = format_idr(amount);

        let unsigned = formatted.strip_prefix('-').unwrap_or(&formatted);
        let digits = unsigned
            .strip_prefix("Rp ")
            .expect("amounts start with the currency marker");

        let (int_part, frac_part) = digits
            .split_once(',')
            .expect("amounts carry a decimal comma");
        prop_assert_eq!(frac_part.len(), 2);
        prop_assert!(frac_part.bytes().all(|b| b.is_ascii_digit()));

        // Thousands groups: the first has one to three digits, the rest
        // exactly three.
        let groups: Vec<&str> = int_part.split('.').collect();
        prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
        for group in &groups[1..] {
            prop_assert_eq!(group.len(), 3);
        }
        for group in &groups {
            prop_assert!(group.bytes().all(|b| b.is_ascii_digit()));
        }

        prop_assert_eq!(formatted.starts_with('-'), cents < 0);
    }

    #[test]
    fn formatting_preserves_the_value(cents in -1_000_000_000_000i64..=1_000_000_000_000i64) {
        let amount = Decimal::new(cents, 2);
        let formatted = format_idr(amount);

        let numeric: String = formatted
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == ',')
            .collect::<String>()
            .replace(',', ".");

        let reparsed: Decimal = numeric.parse().expect("digits parse back");
        prop_assert_eq!(reparsed, amount.abs());
    }

    #[test]
    fn stored_decimals_survive_a_roundtrip(cents in -1_000_000_000_000i64..=1_000_000_000_000i64) {
        let amount = Decimal::new(cents, 2);
        let reparsed = parse_stored("amount", &amount.to_string()).expect("own output parses");
        prop_assert_eq!(reparsed, amount);
    }
}

#[test]
fn test_round_clamps_to_two_places() {
    assert_eq!(round(dec!(1.005001)), dec!(1.01));
    assert_eq!(round(dec!(2.1)), dec!(2.1));
    assert_eq!(round(dec!(3)), dec!(3));
}

#[test]
fn test_parse_stored_names_the_bad_column() {
    let err = parse_stored("subtotal", "12,5").expect_err("comma is not a stored decimal");
    assert!(err.to_string().contains("subtotal"));
}
