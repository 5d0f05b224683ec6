//! Position monitoring: P&L totals and stop-loss flags for open positions.

use nifty_options_core::{PnlSummary, Position, RiskConfig};
use rust_decimal::Decimal;
use tracing::info;

use crate::stops;
use crate::types::MonitorReport;

/// Scan `positions` against the stop-loss threshold.
///
/// Every position counts toward `total_positions` and `total_pnl`, including
/// ones that cannot be checked for lack of a buy value. The rupee cap in
/// `risk.max_loss_per_position` adds recommendation lines but never flags.
#[must_use]
pub fn monitor(positions: &[Position], risk: &RiskConfig) -> MonitorReport {
    let stop_loss_percent = risk.stop_loss_percent;
    let loss_cap = risk.max_loss_per_position;
    let mut report = MonitorReport {
        total_positions: positions.len(),
        max_loss_per_position: loss_cap,
        ..MonitorReport::default()
    };

    for pos in positions {
        report.total_pnl += pos.pnl;

        if let Some(flag) = stops::check_stop_loss(pos, stop_loss_percent) {
            report.recommendations.push(format!(
                "{}: close immediately, loss {}% at or above stop loss {}%",
                flag.symbol,
                flag.loss_percent.round_dp(2),
                stop_loss_percent
            ));
            report.positions_at_risk.push(flag);
        }

        if pos.pnl < Decimal::ZERO && -pos.pnl > loss_cap {
            report.recommendations.push(format!(
                "{}: loss {} exceeds per-position cap {}",
                pos.symbol, -pos.pnl, loss_cap
            ));
        }
    }

    info!(
        positions = report.total_positions,
        total_pnl = %report.total_pnl,
        at_risk = report.positions_at_risk.len(),
        "Positions monitored"
    );
    report
}

/// Totals of `pnl`, `realised` and `unrealised` across `positions`.
#[must_use]
pub fn pnl_summary(positions: &[Position]) -> PnlSummary {
    PnlSummary::from_positions(positions)
}
