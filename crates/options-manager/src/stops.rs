//! Stop-loss rule for open positions.

use nifty_options_core::Position;
use rust_decimal::Decimal;

use crate::types::{RiskAction, RiskFlag};

/// Flag a losing position whose loss reaches `stop_loss_percent` of buy value.
///
/// Positions with zero buy value have no measurable loss percent and are
/// never flagged.
pub fn check_stop_loss(pos: &Position, stop_loss_percent: Decimal) -> Option<RiskFlag> {
    if pos.pnl >= Decimal::ZERO {
        return None;
    }

    let Some(loss_percent) = pos.loss_percent() else {
        tracing::warn!(
            symbol = pos.symbol,
            pnl = %pos.pnl,
            "Losing position has zero buy value, skipping stop-loss check"
        );
        return None;
    };

    if loss_percent >= stop_loss_percent {
        tracing::warn!(
            symbol = pos.symbol,
            loss_percent = %loss_percent.round_dp(2),
            threshold = %stop_loss_percent,
            "Stop loss triggered"
        );
        return Some(RiskFlag {
            symbol: pos.symbol.clone(),
            loss_percent,
            action: RiskAction::CloseImmediately,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_position(pnl: Decimal, buy_value: Decimal) -> Position {
        Position {
            symbol: "NIFTY25SEP2519000PE".to_string(),
            exchange: "NFO".to_string(),
            quantity: -200,
            buy_value,
            pnl,
            realised: Decimal::ZERO,
            unrealised: pnl,
        }
    }

    #[test]
    fn forty_percent_loss_flagged_at_thirty() {
        let flag = check_stop_loss(&make_position(dec!(-4000), dec!(10000)), dec!(30)).unwrap();
        assert_eq!(flag.symbol, "NIFTY25SEP2519000PE");
        assert_eq!(flag.loss_percent, dec!(40));
        assert_eq!(flag.action, RiskAction::CloseImmediately);
    }

    #[test]
    fn loss_exactly_at_threshold_is_flagged() {
        assert!(check_stop_loss(&make_position(dec!(-3000), dec!(10000)), dec!(30)).is_some());
    }

    #[test]
    fn loss_below_threshold_not_flagged() {
        assert!(check_stop_loss(&make_position(dec!(-2999), dec!(10000)), dec!(30)).is_none());
    }

    #[test]
    fn profitable_and_flat_positions_not_flagged() {
        assert!(check_stop_loss(&make_position(dec!(2500), dec!(10000)), dec!(30)).is_none());
        assert!(check_stop_loss(&make_position(Decimal::ZERO, dec!(10000)), dec!(0)).is_none());
    }

    #[test]
    fn zero_buy_value_is_skipped() {
        assert!(check_stop_loss(&make_position(dec!(-500), Decimal::ZERO), dec!(30)).is_none());
    }
}
