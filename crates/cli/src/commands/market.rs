//! Read-only market views.

use anyhow::Result;
use chrono::Local;
use clap::Args;
use nifty_options_core::AppConfig;
use nifty_options_manager::get_target_expiries;

#[derive(Args, Debug)]
pub struct ExpiriesArgs {
    /// Nearest expiry to include, in days from today
    #[arg(long)]
    pub min_days: Option<i64>,

    /// Furthest expiry to include, in days from today
    #[arg(long)]
    pub max_days: Option<i64>,
}

/// Needs no broker session; the calendar comes from configuration alone.
pub fn run_expiries(config: &AppConfig, args: &ExpiriesArgs) -> Result<()> {
    let strategy = &config.strategy;
    let labels = get_target_expiries(
        Local::now().date_naive(),
        args.min_days.unwrap_or(strategy.expiry_days_min),
        args.max_days.unwrap_or(strategy.expiry_days_max),
        strategy.expiry_weekday,
        strategy.lookahead_cycles,
    );
    super::print_json(&labels)
}

#[derive(Args, Debug)]
pub struct ChainArgs {
    /// Expiry label, e.g. `11SEP25`
    pub expiry: String,
}

pub async fn run_chain(config: AppConfig, args: &ChainArgs) -> Result<()> {
    let (_, service) = super::build_service(config, false)?;
    let chain = service.chain(&args.expiry.to_uppercase()).await;
    if chain.is_empty() {
        tracing::warn!(expiry = %args.expiry, "Chain is empty; spot quote unavailable or no strikes resolved");
    }
    super::print_json(&chain.rows)
}
