//! Wire payloads of the Kite Connect REST API.
//!
//! Every numeric field is optional on the wire; absent values become zero
//! when converted to the core types.

use nifty_options_core::{Position, Quote};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `{"status": "success", "data": ...}` envelope around every response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Body Kite sends with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawQuote {
    pub last_price: Option<Decimal>,
    pub volume: Option<u64>,
    pub oi: Option<u64>,
    pub depth: Option<RawDepth>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawDepth {
    #[serde(default)]
    pub buy: Vec<RawLevel>,
    #[serde(default)]
    pub sell: Vec<RawLevel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawLevel {
    pub price: Option<Decimal>,
}

fn top_of_book(levels: &[RawLevel]) -> Decimal {
    levels.first().and_then(|l| l.price).unwrap_or_default()
}

impl RawQuote {
    pub(crate) fn into_quote(self, symbol: &str, exchange: &str) -> Quote {
        let depth = self.depth.unwrap_or_default();
        Quote {
            symbol: symbol.to_string(),
            exchange: exchange.to_string(),
            last_price: self.last_price.unwrap_or_default(),
            volume: self.volume.unwrap_or(0),
            open_interest: self.oi.unwrap_or(0),
            best_bid: top_of_book(&depth.buy),
            best_ask: top_of_book(&depth.sell),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPositions {
    #[serde(default)]
    pub net: Vec<RawPosition>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPosition {
    pub tradingsymbol: String,
    #[serde(default)]
    pub exchange: String,
    #[serde(default)]
    pub quantity: i64,
    pub buy_value: Option<Decimal>,
    pub pnl: Option<Decimal>,
    pub realised: Option<Decimal>,
    pub unrealised: Option<Decimal>,
}

impl From<RawPosition> for Position {
    fn from(raw: RawPosition) -> Self {
        Self {
            symbol: raw.tradingsymbol,
            exchange: raw.exchange,
            quantity: raw.quantity,
            buy_value: raw.buy_value.unwrap_or_default(),
            pnl: raw.pnl.unwrap_or_default(),
            realised: raw.realised.unwrap_or_default(),
            unrealised: raw.unrealised.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOrderResponse {
    pub order_id: String,
}

/// Session returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    #[serde(default)]
    pub user_name: Option<String>,
    pub access_token: String,
}
