//! Types for the put-selling strategy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option side, named by the exchange symbol suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSide {
    #[serde(rename = "CE", alias = "call")]
    Call,
    #[serde(rename = "PE", alias = "put")]
    Put,
}

impl OptionSide {
    /// Exchange suffix (`CE` / `PE`).
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Call => "CE",
            Self::Put => "PE",
        }
    }
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

impl std::str::FromStr for OptionSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CE" | "CALL" | "C" => Ok(Self::Call),
            "PE" | "PUT" | "P" => Ok(Self::Put),
            other => Err(format!("unknown option side: {other}")),
        }
    }
}

/// Trading symbol `{UNDERLYING}{EXPIRY}{STRIKE}{CE|PE}`, e.g. `NIFTY25SEP2520000PE`.
#[must_use]
pub fn option_symbol(underlying: &str, expiry: &str, strike: i64, side: OptionSide) -> String {
    format!("{underlying}{expiry}{strike}{side}")
}

/// One strike of the chain with both legs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainRow {
    pub strike: i64,
    pub ce_ltp: Decimal,
    pub ce_volume: u64,
    pub ce_oi: u64,
    pub ce_bid: Decimal,
    pub ce_ask: Decimal,
    pub pe_ltp: Decimal,
    pub pe_volume: u64,
    pub pe_oi: u64,
    pub pe_bid: Decimal,
    pub pe_ask: Decimal,
    pub spot_price: Decimal,
    pub expiry: String,
}

impl ChainRow {
    /// Last traded price of the given leg.
    #[must_use]
    pub const fn premium(&self, side: OptionSide) -> Decimal {
        match side {
            OptionSide::Call => self.ce_ltp,
            OptionSide::Put => self.pe_ltp,
        }
    }

    #[must_use]
    pub const fn open_interest(&self, side: OptionSide) -> u64 {
        match side {
            OptionSide::Call => self.ce_oi,
            OptionSide::Put => self.pe_oi,
        }
    }

    /// Signed distance from spot, positive when the leg is out of the money.
    #[must_use]
    pub fn distance(&self, side: OptionSide) -> Decimal {
        let strike = Decimal::from(self.strike);
        match side {
            OptionSide::Put => self.spot_price - strike,
            OptionSide::Call => strike - self.spot_price,
        }
    }
}

/// Options chain for one expiry, ascending by strike.
///
/// Every row shares the same spot price and expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionsChain {
    pub rows: Vec<ChainRow>,
}

impl OptionsChain {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn spot_price(&self) -> Option<Decimal> {
        self.rows.first().map(|r| r.spot_price)
    }

    #[must_use]
    pub fn expiry(&self) -> Option<&str> {
        self.rows.first().map(|r| r.expiry.as_str())
    }
}

/// A chain row viewed as a sell candidate on one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub strike: i64,
    pub premium: Decimal,
    #[serde(rename = "oi")]
    pub open_interest: u64,
    pub distance: Decimal,
}

/// Outcome of one strategy run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Initiated,
    Completed,
    Failed,
    Error,
}

/// An order the run placed successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: String,
    pub symbol: String,
    pub strike: i64,
    pub quantity: u64,
    pub premium: Decimal,
    pub expiry: String,
}

/// Result of one strategy invocation. Built and returned by a single run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyRun {
    pub status: RunStatus,
    pub orders: Vec<PlacedOrder>,
    pub errors: Vec<String>,
}

impl StrategyRun {
    #[must_use]
    pub const fn initiated() -> Self {
        Self {
            status: RunStatus::Initiated,
            orders: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.status = RunStatus::Failed;
        self.errors.push(message.into());
    }
}

impl Default for StrategyRun {
    fn default() -> Self {
        Self::initiated()
    }
}

/// Action recommended for a flagged position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskAction {
    CloseImmediately,
}

impl std::fmt::Display for RiskAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CloseImmediately => write!(f, "CLOSE_IMMEDIATELY"),
        }
    }
}

/// A position whose loss crossed the stop-loss threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub symbol: String,
    pub loss_percent: Decimal,
    pub action: RiskAction,
}

/// Stop-loss scan over open positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorReport {
    pub total_positions: usize,
    pub total_pnl: Decimal,
    pub positions_at_risk: Vec<RiskFlag>,
    pub recommendations: Vec<String>,
    /// Configured rupee loss cap per position.
    pub max_loss_per_position: Decimal,
}

/// Delta and per-day theta for one contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreeksResult {
    pub delta: f64,
    pub theta: f64,
    pub days_to_expiry: i64,
}
