//! Put-selling strategy core for NIFTY index options.
//!
//! Pipeline for one run:
//! - Pick the soonest expiry inside the configured days-to-expiry window
//! - Build the options chain from a strike ladder around spot
//! - Rank OTM puts by premium
//! - Size each candidate in whole lots against capital and dispatch market sells
//!
//! Alongside the run: Black-Scholes greeks and a stop-loss scan of open
//! positions. All rules are deterministic.

pub mod candidates;
pub mod chain;
pub mod executor;
pub mod expiry;
pub mod greeks;
pub mod monitor;
pub mod service;
pub mod stops;
pub mod strikes;
pub mod types;

pub use candidates::select_candidates;
pub use chain::ChainBuilder;
pub use executor::StrategyExecutor;
pub use expiry::{format_expiry, get_target_expiries};
pub use greeks::{calculate_all_greeks, GreeksError, GreeksParams};
pub use monitor::monitor;
pub use service::OptionsService;
pub use strikes::generate_strikes;
pub use types::{
    Candidate, ChainRow, GreeksResult, MonitorReport, OptionSide, OptionsChain, PlacedOrder,
    RiskAction, RiskFlag, RunStatus, StrategyRun,
};
