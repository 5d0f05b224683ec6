//! Sell-candidate screening.

use rust_decimal::Decimal;

use crate::types::{Candidate, OptionSide, OptionsChain};

/// Rows whose `side` premium is at least `min_premium`, highest premium first.
///
/// The sort is stable, so equal premiums keep chain (ascending strike) order.
#[must_use]
pub fn select_candidates(chain: &OptionsChain, side: OptionSide, min_premium: Decimal) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = chain
        .rows
        .iter()
        .filter(|row| row.premium(side) >= min_premium)
        .map(|row| Candidate {
            strike: row.strike,
            premium: row.premium(side),
            open_interest: row.open_interest(side),
            distance: row.distance(side),
        })
        .collect();

    candidates.sort_by(|a, b| b.premium.cmp(&a.premium));
    candidates
}
