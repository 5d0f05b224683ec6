//! Strike ladder around spot.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Step-aligned strikes spanning `spot ± range_percent`, ascending.
///
/// Both bounds are floored to a multiple of `step`. Non-positive strikes are
/// never produced, and a zero step yields an empty ladder.
#[must_use]
pub fn generate_strikes(spot: Decimal, range_percent: Decimal, step: u32) -> Vec<i64> {
    if step == 0 || spot <= Decimal::ZERO {
        return Vec::new();
    }

    let step_dec = Decimal::from(step);
    let band = range_percent / Decimal::ONE_HUNDRED;
    let floor_to_step = |price: Decimal| -> Option<i64> {
        ((price / step_dec).floor() * step_dec).to_i64()
    };

    let (Some(lower), Some(upper)) = (
        floor_to_step(spot * (Decimal::ONE - band)),
        floor_to_step(spot * (Decimal::ONE + band)),
    ) else {
        return Vec::new();
    };

    (lower..=upper)
        .step_by(step as usize)
        .filter(|strike| *strike > 0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn twenty_thousand_spot_gives_81_strikes() {
        let strikes = generate_strikes(dec!(20000), dec!(10), 50);
        assert_eq!(strikes.len(), 81);
        assert_eq!(strikes.first(), Some(&18000));
        assert_eq!(strikes.last(), Some(&22000));
    }

    #[test]
    fn bounds_are_floored_to_step() {
        // 19876.4 × 0.9 = 17888.76 → 17850; × 1.1 = 21864.04 → 21850
        let strikes = generate_strikes(dec!(19876.4), dec!(10), 50);
        assert_eq!(strikes.first(), Some(&17850));
        assert_eq!(strikes.last(), Some(&21850));
    }

    #[test]
    fn ladder_is_strictly_increasing_and_step_aligned() {
        for spot in [dec!(1234.5), dec!(17777.77), dec!(24999.99), dec!(51234)] {
            let strikes = generate_strikes(spot, dec!(10), 50);
            assert!(strikes.windows(2).all(|w| w[1] - w[0] == 50));
            assert!(strikes.iter().all(|s| s % 50 == 0));
            // covers the band up to flooring at the edges
            let lower = Decimal::from(*strikes.first().unwrap());
            let upper = Decimal::from(*strikes.last().unwrap());
            assert!(lower <= spot * dec!(0.9));
            assert!(upper + dec!(50) > spot * dec!(1.1));
        }
    }

    #[test]
    fn custom_step_and_range() {
        let strikes = generate_strikes(dec!(45000), dec!(2), 100);
        assert_eq!(strikes.first(), Some(&44100));
        assert_eq!(strikes.last(), Some(&45900));
        assert_eq!(strikes.len(), 19);
    }

    #[test]
    fn degenerate_inputs_give_empty_ladder() {
        assert!(generate_strikes(dec!(20000), dec!(10), 0).is_empty());
        assert!(generate_strikes(Decimal::ZERO, dec!(10), 50).is_empty());
        assert!(generate_strikes(dec!(-5), dec!(10), 50).is_empty());
    }

    #[test]
    fn wide_band_drops_non_positive_strikes() {
        let strikes = generate_strikes(dec!(100), dec!(150), 50);
        assert_eq!(strikes, vec![50, 100, 150, 200, 250]);
    }
}
