//! Subcommands of the `nifty-options` binary.

pub mod analytics;
pub mod market;
pub mod serve;
pub mod session;
pub mod strategy;

use std::sync::Arc;

use anyhow::Result;
use nifty_options_core::AppConfig;
use nifty_options_kite::{KiteClient, PaperBroker};
use nifty_options_manager::OptionsService;
use serde::Serialize;

pub use analytics::{run_greeks, GreeksArgs};
pub use market::{run_chain, run_expiries, ChainArgs, ExpiriesArgs};
pub use serve::{run_serve, ServeArgs};
pub use session::{run_login, LoginArgs};
pub use strategy::{run_execute, run_monitor, run_pnl, ExecuteArgs, MonitorArgs};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Live Kite client plus the service wired on top of it.
///
/// With `paper` set, orders and positions go to an in-process
/// [`PaperBroker`] while quotes still come from Kite.
fn build_service(config: AppConfig, paper: bool) -> Result<(Arc<KiteClient>, OptionsService)> {
    let kite = Arc::new(KiteClient::from_broker_config(&config.broker)?);
    let service = if paper {
        tracing::info!("Paper trading: orders will not reach the exchange");
        let broker = Arc::new(PaperBroker::new());
        OptionsService::new(kite.clone(), broker.clone(), broker, config)
    } else {
        OptionsService::with_broker(kite.clone(), config)
    };
    Ok((kite, service))
}
