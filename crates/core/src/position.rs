use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A net position as reported by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub exchange: String,
    /// Signed; negative for short option positions.
    pub quantity: i64,
    pub buy_value: Decimal,
    pub pnl: Decimal,
    pub realised: Decimal,
    pub unrealised: Decimal,
}

impl Position {
    /// Loss as a percent of buy value, or `None` when the position is not
    /// losing or has no buy value to measure against.
    #[must_use]
    pub fn loss_percent(&self) -> Option<Decimal> {
        if self.pnl >= Decimal::ZERO || self.buy_value.is_zero() {
            return None;
        }
        Some((self.pnl / self.buy_value).abs() * Decimal::ONE_HUNDRED)
    }
}

/// Aggregate P&L over a set of positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlSummary {
    pub total_pnl: Decimal,
    pub realized_pnl: Decimal,
    pub unrealized_pnl: Decimal,
    pub positions_count: usize,
}

impl PnlSummary {
    #[must_use]
    pub fn from_positions(positions: &[Position]) -> Self {
        positions.iter().fold(
            Self {
                positions_count: positions.len(),
                ..Self::default()
            },
            |mut acc, p| {
                acc.total_pnl += p.pnl;
                acc.realized_pnl += p.realised;
                acc.unrealized_pnl += p.unrealised;
                acc
            },
        )
    }
}
