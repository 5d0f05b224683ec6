use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot quote for one instrument.
///
/// Depth fields are the top of book and are zero when the broker sent no
/// depth for that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub exchange: String,
    pub last_price: Decimal,
    pub volume: u64,
    pub open_interest: u64,
    pub best_bid: Decimal,
    pub best_ask: Decimal,
}

impl Quote {
    /// Quote carrying only a last price, as returned for indices.
    pub fn last_only(symbol: impl Into<String>, exchange: impl Into<String>, last_price: Decimal) -> Self {
        Self {
            symbol: symbol.into(),
            exchange: exchange.into(),
            last_price,
            volume: 0,
            open_interest: 0,
            best_bid: Decimal::ZERO,
            best_ask: Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn last_only_has_empty_book() {
        let quote = Quote::last_only("NIFTY 50", "NSE", dec!(20012.35));
        assert_eq!(quote.last_price, dec!(20012.35));
        assert_eq!(quote.volume, 0);
        assert_eq!(quote.best_bid, Decimal::ZERO);
        assert_eq!(quote.best_ask, Decimal::ZERO);
    }
}
