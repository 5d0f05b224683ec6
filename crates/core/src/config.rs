use anyhow::{bail, Result};
use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub broker: BrokerConfig,
    pub strategy: StrategyConfig,
    pub risk: RiskConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Rejects configurations the strategy cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let s = &self.strategy;
        if s.lot_size == 0 {
            bail!("strategy.lot_size must be positive");
        }
        if s.strike_step == 0 {
            bail!("strategy.strike_step must be positive");
        }
        if s.expiry_days_min > s.expiry_days_max {
            bail!(
                "strategy.expiry_days_min ({}) exceeds expiry_days_max ({})",
                s.expiry_days_min,
                s.expiry_days_max
            );
        }
        if s.lookahead_cycles == 0 {
            bail!("strategy.lookahead_cycles must be positive");
        }
        if s.min_premium <= Decimal::ZERO {
            bail!("strategy.min_premium must be positive");
        }
        if self.risk.stop_loss_percent <= Decimal::ZERO {
            bail!("risk.stop_loss_percent must be positive");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub name: String,
    pub base_url: String,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub access_token: Option<String>,
    /// Upper bound on every broker HTTP call.
    pub timeout_secs: u64,
    pub requests_per_second: u32,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            name: "zerodha".to_string(),
            base_url: "https://api.kite.trade".to_string(),
            api_key: None,
            api_secret: None,
            access_token: None,
            timeout_secs: 10,
            requests_per_second: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Prefix of every option trading symbol (e.g. `NIFTY25SEP2520000PE`).
    pub underlying: String,
    /// Instrument used to read the spot price.
    pub spot_symbol: String,
    pub spot_exchange: String,
    pub option_exchange: String,
    pub expiry_days_min: i64,
    pub expiry_days_max: i64,
    pub expiry_weekday: Weekday,
    pub lookahead_cycles: u32,
    pub lot_size: u32,
    pub strike_step: u32,
    pub strike_range_percent: Decimal,
    pub min_premium: Decimal,
    pub product: String,
    pub default_capital: Decimal,
    pub default_target_strikes: u32,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            underlying: "NIFTY".to_string(),
            spot_symbol: "NIFTY 50".to_string(),
            spot_exchange: "NSE".to_string(),
            option_exchange: "NFO".to_string(),
            expiry_days_min: 30,
            expiry_days_max: 45,
            expiry_weekday: Weekday::Thu,
            lookahead_cycles: 8,
            lot_size: 50,
            strike_step: 50,
            strike_range_percent: Decimal::from(10),
            min_premium: Decimal::from(100),
            product: "NRML".to_string(),
            default_capital: Decimal::from(100_000),
            default_target_strikes: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Loss, as a percent of buy value, at which a position is flagged.
    pub stop_loss_percent: Decimal,
    /// Rupee loss cap per position. Reported only.
    pub max_loss_per_position: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            stop_loss_percent: Decimal::from(30),
            max_loss_per_position: Decimal::from(10_000),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
