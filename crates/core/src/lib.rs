pub mod config;
pub mod config_loader;
pub mod error;
pub mod order;
pub mod position;
pub mod position_sizing;
pub mod quote;
pub mod traits;

pub use config::{AppConfig, BrokerConfig, RiskConfig, ServerConfig, StrategyConfig};
pub use config_loader::ConfigLoader;
pub use error::{BrokerError, BrokerResult};
pub use order::{OrderRequest, OrderType, Product, TransactionType};
pub use position::{PnlSummary, Position};
pub use position_sizing::lot_quantity;
pub use quote::Quote;
pub use traits::{OrderGateway, PositionSource, QuoteSource, SessionLogin};
