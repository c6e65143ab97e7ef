// Property-based tests for the tax stack.
//
// PPN and the regional tax add to the amount due, the PPh withholdings
// deduct from it, and stamp duty applies once the pre-stamp total reaches
// the statutory threshold. The recomposition identity
//   total = subtotal + charges - deductions + stamp duty
// must hold for every flag combination.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use notaku::config::TaxConfig;
use notaku::transactions::{TaxEngine, TaxFlags};

fn flags(ppn: bool, regional: bool, pph22: bool, pph23: bool) -> TaxFlags {
    TaxFlags {
        ppn,
        regional,
        pph22,
        pph23,
    }
}

proptest! {
    #[test]
    fn total_recomposes_from_parts(
        subtotal_cents in 0i64..=1_000_000_000_000i64,
        ppn in any::<bool>(),
        regional in any::<bool>(),
        pph22 in any::<bool>(),
        pph23 in any::<bool>(),
    ) {
        let subtotal = Decimal::new(subtotal_cents, 2);
        let engine = TaxEngine::new(TaxConfig::default());

        let breakdown = engine.assess(subtotal, flags(ppn, regional, pph22, pph23));

        let recomposed = subtotal
            + breakdown.ppn_amount
            + breakdown.regional_tax_amount
            - breakdown.pph22_amount
            - breakdown.pph23_amount
            + if breakdown.stamp_duty_required {
                breakdown.stamp_duty_amount
            } else {
                Decimal::ZERO
            };

        prop_assert_eq!(breakdown.total_amount, recomposed.round_dp(2));
    }

    #[test]
    fn disabled_taxes_charge_nothing(subtotal_cents in 0i64..=1_000_000_000_000i64) {
        let subtotal = Decimal::new(subtotal_cents, 2);
        let engine = TaxEngine::new(TaxConfig::default());

        let breakdown = engine.assess(subtotal, flags(false, false, false, false));

        prop_assert_eq!(breakdown.ppn_amount, Decimal::ZERO);
        prop_assert_eq!(breakdown.regional_tax_amount, Decimal::ZERO);
        prop_assert_eq!(breakdown.pph22_amount, Decimal::ZERO);
        prop_assert_eq!(breakdown.pph23_amount, Decimal::ZERO);
    }

    #[test]
    fn enabled_charges_follow_their_rates(subtotal_cents in 0i64..=1_000_000_000_000i64) {
        let subtotal = Decimal::new(subtotal_cents, 2);
        let config = TaxConfig::default();
        let engine = TaxEngine::new(config.clone());

        let breakdown = engine.assess(subtotal, flags(true, true, true, true));

        prop_assert_eq!(breakdown.ppn_amount, (subtotal * config.ppn_rate).round_dp(2));
        prop_assert_eq!(
            breakdown.regional_tax_amount,
            (subtotal * config.regional_rate).round_dp(2)
        );
        prop_assert_eq!(breakdown.pph22_amount, (subtotal * config.pph22_rate).round_dp(2));
        prop_assert_eq!(breakdown.pph23_amount, (subtotal * config.pph23_rate).round_dp(2));
    }

    #[test]
    fn withholdings_are_stored_as_positive_deductions(
        subtotal_cents in 0i64..=1_000_000_000_000i64,
        ppn in any::<bool>(),
        regional in any::<bool>(),
    ) {
        let subtotal = Decimal::new(subtotal_cents, 2);
        let engine = TaxEngine::new(TaxConfig::default());

        let breakdown = engine.assess(subtotal, flags(ppn, regional, true, true));

        prop_assert!(breakdown.pph22_amount >= Decimal::ZERO);
        prop_assert!(breakdown.pph23_amount >= Decimal::ZERO);
        prop_assert!(breakdown.total_amount <= engine.assess(subtotal, flags(ppn, regional, false, false)).total_amount);
    }

    #[test]
    fn stamp_duty_tracks_the_threshold(
        subtotal_cents in 0i64..=1_000_000_000_000i64,
        ppn in any::<bool>(),
        regional in any::<bool>(),
        pph22 in any::<bool>(),
        pph23 in any::<bool>(),
    ) {
        let subtotal = Decimal::new(subtotal_cents, 2);
        let config = TaxConfig::default();
        let engine = TaxEngine::new(config.clone());

        let breakdown = engine.assess(subtotal, flags(ppn, regional, pph22, pph23));

        let before_stamp = subtotal
            + breakdown.ppn_amount
            + breakdown.regional_tax_amount
            - breakdown.pph22_amount
            - breakdown.pph23_amount;

        prop_assert_eq!(
            breakdown.stamp_duty_required,
            before_stamp >= config.stamp_duty_threshold
        );
        if breakdown.stamp_duty_required {
            prop_assert_eq!(breakdown.stamp_duty_amount, config.stamp_duty_amount);
        } else {
            prop_assert_eq!(breakdown.stamp_duty_amount, Decimal::ZERO);
        }
    }
}

#[test]
fn test_ppn_on_a_plain_sale() {
    let engine = TaxEngine::new(TaxConfig::default());

    let breakdown = engine.assess(dec!(2000000), flags(true, false, false, false));

    assert_eq!(breakdown.ppn_amount, dec!(220000));
    assert_eq!(breakdown.total_amount, dec!(2220000));
    assert!(!breakdown.stamp_duty_required);
}

#[test]
fn test_withholding_reduces_the_amount_due() {
    let engine = TaxEngine::new(TaxConfig::default());

    let breakdown = engine.assess(dec!(10000), flags(false, false, false, true));

    assert_eq!(breakdown.pph23_amount, dec!(200));
    assert_eq!(breakdown.total_amount, dec!(9800));
}

#[test]
fn test_every_tax_at_once() {
    let engine = TaxEngine::new(TaxConfig::default());

    let breakdown = engine.assess(dec!(100000), flags(true, true, true, true));

    assert_eq!(breakdown.ppn_amount, dec!(11000));
    assert_eq!(breakdown.regional_tax_amount, dec!(10000));
    assert_eq!(breakdown.pph22_amount, dec!(2000));
    assert_eq!(breakdown.pph23_amount, dec!(2000));
    assert_eq!(breakdown.total_amount, dec!(117000));
}

#[test]
fn test_stamp_duty_threshold_is_inclusive() {
    let engine = TaxEngine::new(TaxConfig::default());

    let at_threshold = engine.assess(dec!(5000000), flags(false, false, false, false));
    assert!(at_threshold.stamp_duty_required);
    assert_eq!(at_threshold.total_amount, dec!(5010000));

    let just_below = engine.assess(dec!(4999999.99), flags(false, false, false, false));
    assert!(!just_below.stamp_duty_required);
    assert_eq!(just_below.total_amount, dec!(4999999.99));
}

#[test]
fn test_ppn_can_push_a_sale_over_the_stamp_threshold() {
    let engine = TaxEngine::new(TaxConfig::default());

    // 4,600,000 alone stays under five million; adding 11% PPN crosses it.
    let breakdown = engine.assess(dec!(4600000), flags(true, false, false, false));

    assert!(breakdown.stamp_duty_required);
    assert_eq!(breakdown.total_amount, dec!(4600000) + dec!(506000) + dec!(10000));
}

#[test]
fn test_withholding_can_pull_a_sale_under_the_stamp_threshold() {
    let engine = TaxEngine::new(TaxConfig::default());

    // Exactly at the threshold before PPh 23; the deduction drops it below.
    let breakdown = engine.assess(dec!(5000000), flags(false, false, false, true));

    assert!(!breakdown.stamp_duty_required);
    assert_eq!(breakdown.total_amount, dec!(4900000));
}

#[test]
fn test_overridden_rates_are_honored() {
    let config = TaxConfig {
        ppn_rate: dec!(0.12),
        ..TaxConfig::default()
    };
    let engine = TaxEngine::new(config);

    let breakdown = engine.assess(dec!(1000000), flags(true, false, false, false));

    assert_eq!(breakdown.ppn_amount, dec!(120000));
    assert_eq!(breakdown.total_amount, dec!(1120000));
}
