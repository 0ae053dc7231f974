//! Gross margin calculation with a tiered volume-discount schedule.
//!
//! This is the only business logic in the crate. Everything else (catalog,
//! report formatting, TUI, exports) is presentation around `compute`.
//!
//! Design goals:
//! - **Pure**: no I/O, no shared state; identical inputs give identical output
//! - **No validation**: range enforcement lives in the input surface (CLI/TUI);
//!   out-of-range values propagate through the arithmetic unchecked
//! - **Truncation at the edge**: intermediates stay full-precision floats,
//!   each reported field is truncated toward zero only when building the result

use crate::domain::{DiscountTier, MarginResult};

/// Volume-discount brackets, ascending thresholds, first match wins.
///
/// A volume beyond the last bracket falls through to a 0% discount. There is
/// no lower bound: a zero or negative volume qualifies for the first bracket.
pub const DISCOUNT_SCHEDULE: [DiscountTier; 3] = [
    DiscountTier {
        max_volume: 10,
        rate: 0.05,
    },
    DiscountTier {
        max_volume: 20,
        rate: 0.10,
    },
    DiscountTier {
        max_volume: 50,
        rate: 0.15,
    },
];

/// Look up the volume-discount rate for a purchase volume.
pub fn volume_discount_rate(volume: i64) -> f64 {
    for tier in DISCOUNT_SCHEDULE {
        if volume <= tier.max_volume {
            return tier.rate;
        }
    }
    0.0
}

/// Compute the per-unit margin breakdown.
///
/// `price` is the unit list price, `rebate_rate` a fraction (0.10 = 10%).
/// Deductions come back as negated magnitudes so that
/// `gross_margin == price + rebate + volume_discount`.
///
/// Never fails or panics for finite numeric inputs; callers wanting stricter
/// guarantees must pre-validate.
pub fn compute(price: f64, rebate_rate: f64, volume: i64) -> MarginResult {
    let rebate_amount = price * rebate_rate;
    let volume_discount_amount = price * volume_discount_rate(volume);
    let gross_margin = price - rebate_amount - volume_discount_amount;

    // `as i64` truncates toward zero, matching the original integer cast
    // (333 * 0.1 = 33.3 reports as -33, not -34).
    MarginResult {
        price: price as i64,
        rebate: (-rebate_amount) as i64,
        volume_discount: (-volume_discount_amount) as i64,
        gross_margin: gross_margin as i64,
    }
}

/// Evaluate the breakdown across a volume range (inclusive).
///
/// Used by the TUI chart and exports to show where the discount brackets
/// step. Pure composition of `compute`.
pub fn margin_curve(
    price: f64,
    rebate_rate: f64,
    volume_min: i64,
    volume_max: i64,
) -> Vec<(i64, MarginResult)> {
    let mut out = Vec::with_capacity((volume_max - volume_min + 1).max(0) as usize);
    let mut v = volume_min;
    while v <= volume_max {
        out.push((v, compute(price, rebate_rate, v)));
        v += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_invariant_holds() {
        for (price, rebate, volume) in [
            (1200.0, 0.05, 5),
            (800.0, 0.20, 15),
            (350.0, 0.00, 25),
            (120.0, 0.10, 50),
            (400.0, 0.07, 51),
        ] {
            let r = compute(price, rebate, volume);
            assert_eq!(
                r.gross_margin,
                r.price + r.rebate + r.volume_discount,
                "invariant broken for price={price} rebate={rebate} volume={volume}: {r:?}"
            );
        }
    }

    #[test]
    fn deterministic() {
        let a = compute(987.65, 0.13, 17);
        let b = compute(987.65, 0.13, 17);
        assert_eq!(a, b);
    }

    #[test]
    fn sign_convention() {
        let r = compute(500.0, 0.10, 8);
        assert!(r.rebate <= 0, "rebate should be a deduction: {r:?}");
        assert!(
            r.volume_discount <= 0,
            "volume discount should be a deduction: {r:?}"
        );
    }

    #[test]
    fn tier_boundaries_exact() {
        // (volume, expected volume_discount at price 1000)
        let cases = [
            (10, -50),  // 5% bracket top
            (11, -100), // crosses into 10%
            (20, -100), // 10% bracket top
            (21, -150), // crosses into 15%
            (50, -150), // 15% bracket top
            (51, 0),    // falls through every bracket
        ];
        for (volume, expected) in cases {
            let r = compute(1000.0, 0.0, volume);
            assert_eq!(
                r.volume_discount, expected,
                "volume={volume}: expected {expected}, got {}",
                r.volume_discount
            );
        }
    }

    #[test]
    fn combined_scenario() {
        let r = compute(1200.0, 0.05, 5);
        assert_eq!(r.price, 1200);
        assert_eq!(r.rebate, -60);
        assert_eq!(r.volume_discount, -60);
        assert_eq!(r.gross_margin, 1080);
    }

    #[test]
    fn truncates_toward_zero_not_rounds() {
        // 333 * 0.1 = 33.3 → deduction -33, not -34.
        let r = compute(333.0, 0.1, 1);
        assert_eq!(r.rebate, -33);
    }

    #[test]
    fn zero_volume_hits_first_bracket() {
        // No lower bound in the schedule: volume 0 (and negatives) qualify
        // for the <=10 bracket. Inherited behavior, reproduced exactly.
        let r = compute(100.0, 0.0, 0);
        assert_eq!(r.volume_discount, -5);

        let r = compute(100.0, 0.0, -3);
        assert_eq!(r.volume_discount, -5);
    }

    #[test]
    fn zero_rebate_leaves_only_volume_discount() {
        let r = compute(1000.0, 0.0, 30);
        assert_eq!(r.rebate, 0);
        assert_eq!(r.gross_margin, 1000 + r.volume_discount);
    }

    #[test]
    fn margin_curve_steps_at_brackets() {
        let curve = margin_curve(1000.0, 0.0, 1, 50);
        assert_eq!(curve.len(), 50);
        assert_eq!(curve[0].0, 1);
        assert_eq!(curve[49].0, 50);

        // Flat inside a bracket, steps down when a threshold is crossed.
        assert_eq!(curve[0].1.gross_margin, curve[9].1.gross_margin);
        assert!(curve[10].1.gross_margin < curve[9].1.gross_margin);
        assert_eq!(curve[10].1.gross_margin, curve[19].1.gross_margin);
        assert!(curve[20].1.gross_margin < curve[19].1.gross_margin);
    }

    #[test]
    fn discount_rate_lookup() {
        assert_eq!(volume_discount_rate(1), 0.05);
        assert_eq!(volume_discount_rate(10), 0.05);
        assert_eq!(volume_discount_rate(11), 0.10);
        assert_eq!(volume_discount_rate(20), 0.10);
        assert_eq!(volume_discount_rate(21), 0.15);
        assert_eq!(volume_discount_rate(50), 0.15);
        assert_eq!(volume_discount_rate(51), 0.0);
        assert_eq!(volume_discount_rate(0), 0.05);
    }
}
