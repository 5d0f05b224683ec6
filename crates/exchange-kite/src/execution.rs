//! Order placement via `POST /orders/regular`.

use async_trait::async_trait;
use nifty_options_core::{BrokerError, BrokerResult, OrderGateway, OrderRequest};
use tracing::{info, warn};

use crate::client::KiteClient;
use crate::types::RawOrderResponse;

/// Form fields for a regular DAY order. `price` is sent for limit orders only.
pub(crate) fn order_form(order: &OrderRequest) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("tradingsymbol", order.symbol.clone()),
        ("exchange", order.exchange.clone()),
        ("transaction_type", order.transaction_type.as_str().to_string()),
        ("order_type", order.order_type.as_str().to_string()),
        ("quantity", order.quantity.to_string()),
        ("product", order.product.as_str().to_string()),
        ("validity", "DAY".to_string()),
    ];
    if let Some(price) = order.effective_price() {
        form.push(("price", price.to_string()));
    }
    form
}

impl KiteClient {
    /// Places a regular order and returns the broker order id.
    ///
    /// A 4xx response other than an auth failure or rate limit is reported
    /// as `OrderRejected`.
    pub async fn place(&self, order: &OrderRequest) -> BrokerResult<String> {
        info!(
            symbol = order.symbol,
            side = order.transaction_type.as_str(),
            order_type = order.order_type.as_str(),
            quantity = order.quantity,
            "Placing order"
        );

        let response: RawOrderResponse = self
            .post_form("/orders/regular", &order_form(order))
            .await
            .map_err(|e| match e {
                BrokerError::Api {
                    status_code: 400..=499,
                    message,
                } => BrokerError::OrderRejected(message),
                other => other,
            })
            .inspect_err(|e| warn!(symbol = order.symbol, error = %e, "Order failed"))?;

        Ok(response.order_id)
    }
}

#[async_trait]
impl OrderGateway for KiteClient {
    async fn place_order(&self, order: &OrderRequest) -> BrokerResult<String> {
        self.place(order).await
    }
}
