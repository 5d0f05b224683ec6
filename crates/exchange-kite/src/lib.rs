//! Zerodha Kite Connect integration for NIFTY options trading.
//!
//! Provides the REST client, quotes, order placement, positions and session
//! login, implementing the core collaborator traits. [`PaperBroker`] stands
//! in for order placement during dry runs.

pub mod account;
pub mod auth;
pub mod client;
pub mod execution;
pub mod market_data;
pub mod paper;
pub mod types;

pub use auth::checksum;
pub use client::{KiteClient, KiteConfig, KITE_API_URL};
pub use paper::PaperBroker;
pub use types::Session;
