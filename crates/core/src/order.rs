use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    #[default]
    Limit,
    Market,
}

impl OrderType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
        }
    }
}

/// Margin product the order is booked under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Product {
    /// Carry-forward, used for positional option selling.
    #[default]
    Nrml,
    /// Intraday.
    Mis,
}

impl Product {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nrml => "NRML",
            Self::Mis => "MIS",
        }
    }
}

impl std::str::FromStr for Product {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "NRML" => Ok(Self::Nrml),
            "MIS" => Ok(Self::Mis),
            other => Err(format!("unknown product: {other}")),
        }
    }
}

/// An order to hand to the order gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub exchange: String,
    pub transaction_type: TransactionType,
    pub quantity: u64,
    /// Only sent for limit orders.
    pub price: Option<Decimal>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub product: Product,
}

impl OrderRequest {
    /// A market sell, the only order the put-selling run places.
    pub fn market_sell(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        quantity: u64,
        product: Product,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            exchange: exchange.into(),
            transaction_type: TransactionType::Sell,
            quantity,
            price: None,
            order_type: OrderType::Market,
            product,
        }
    }

    /// Price to transmit, which is `None` for anything but a priced limit order.
    #[must_use]
    pub fn effective_price(&self) -> Option<Decimal> {
        match self.order_type {
            OrderType::Limit => self.price,
            OrderType::Market => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn market_sell_has_no_price() {
        let order = OrderRequest::market_sell("NIFTY25SEP2519000PE", "NFO", 200, Product::Nrml);
        assert_eq!(order.transaction_type, TransactionType::Sell);
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.effective_price(), None);
    }

    #[test]
    fn market_orders_drop_a_supplied_price() {
        let mut order = OrderRequest::market_sell("NIFTY25SEP2519000PE", "NFO", 50, Product::Nrml);
        order.price = Some(dec!(120));
        assert_eq!(order.effective_price(), None);
        order.order_type = OrderType::Limit;
        assert_eq!(order.effective_price(), Some(dec!(120)));
    }

    #[test]
    fn wire_names_are_uppercase() {
        let json = serde_json::to_value(OrderRequest::market_sell("X", "NFO", 50, Product::Nrml)).unwrap();
        assert_eq!(json["transaction_type"], "SELL");
        assert_eq!(json["order_type"], "MARKET");
        assert_eq!(json["product"], "NRML");
    }

    #[test]
    fn request_defaults_to_limit_nrml() {
        let order: OrderRequest = serde_json::from_value(serde_json::json!({
            "symbol": "NIFTY25SEP2519000PE",
            "exchange": "NFO",
            "transaction_type": "BUY",
            "quantity": 50,
            "price": "101.5"
        }))
        .unwrap();
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.product, Product::Nrml);
        assert_eq!(order.price, Some(dec!(101.5)));
    }
}
