//! Strategy run and position checks against the live account.

use anyhow::{bail, Result};
use clap::Args;
use nifty_options_core::AppConfig;
use nifty_options_manager::RunStatus;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct ExecuteArgs {
    /// Capital to deploy, defaults to `strategy.default_capital`
    #[arg(long)]
    pub capital: Option<Decimal>,

    /// Number of strikes to sell, defaults to `strategy.default_target_strikes`
    #[arg(long)]
    pub target_strikes: Option<u32>,

    /// Route orders to the paper broker
    #[arg(long)]
    pub paper: bool,
}

/// Prints the run and exits non-zero unless it completed.
pub async fn run_execute(config: AppConfig, args: &ExecuteArgs) -> Result<()> {
    let (_, service) = super::build_service(config, args.paper)?;
    let run = service.execute_strategy(args.capital, args.target_strikes).await;
    super::print_json(&run)?;

    if run.status != RunStatus::Completed {
        bail!("strategy run ended with status {:?}", run.status);
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct MonitorArgs {
    /// Stop loss percentage, overrides `risk.stop_loss_percent`
    #[arg(long)]
    pub stop_loss: Option<Decimal>,
}

pub async fn run_monitor(mut config: AppConfig, args: &MonitorArgs) -> Result<()> {
    if let Some(stop_loss) = args.stop_loss {
        config.risk.stop_loss_percent = stop_loss;
    }
    let (_, service) = super::build_service(config, false)?;
    let report = service.monitor_positions().await?;
    super::print_json(&report)
}

pub async fn run_pnl(config: AppConfig) -> Result<()> {
    let (_, service) = super::build_service(config, false)?;
    let summary = service.pnl_summary().await?;
    super::print_json(&summary)
}
