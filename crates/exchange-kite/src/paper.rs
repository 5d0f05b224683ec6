//! Paper trading gateway.
//!
//! Accepts every order without touching the exchange and reports the
//! resulting net quantities as positions. Quotes still come from the live
//! client, so a paper run sees real prices.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use nifty_options_core::{BrokerResult, OrderGateway, OrderRequest, Position, PositionSource, TransactionType};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use tracing::info;

#[derive(Debug, Default)]
pub struct PaperBroker {
    next_id: AtomicU64,
    orders: Mutex<Vec<OrderRequest>>,
}

impl PaperBroker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Orders accepted so far, oldest first.
    #[must_use]
    pub fn orders(&self) -> Vec<OrderRequest> {
        self.orders.lock().clone()
    }
}

#[async_trait]
impl OrderGateway for PaperBroker {
    async fn place_order(&self, order: &OrderRequest) -> BrokerResult<String> {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let order_id = format!("PAPER-{n}");
        self.orders.lock().push(order.clone());

        info!(
            order_id,
            symbol = order.symbol,
            side = order.transaction_type.as_str(),
            quantity = order.quantity,
            "Paper order accepted"
        );
        Ok(order_id)
    }
}

#[async_trait]
impl PositionSource for PaperBroker {
    /// Net quantity per symbol in first-traded order. Paper fills carry no
    /// prices, so value and P&L fields are zero.
    async fn get_positions(&self) -> BrokerResult<Vec<Position>> {
        let orders = self.orders.lock();
        let mut positions: Vec<Position> = Vec::new();

        for order in orders.iter() {
            let signed = i64::try_from(order.quantity).unwrap_or(i64::MAX);
            let delta = match order.transaction_type {
                TransactionType::Buy => signed,
                TransactionType::Sell => -signed,
            };

            match positions.iter_mut().find(|p| p.symbol == order.symbol) {
                Some(pos) => pos.quantity = pos.quantity.saturating_add(delta),
                None => positions.push(Position {
                    symbol: order.symbol.clone(),
                    exchange: order.exchange.clone(),
                    quantity: delta,
                    buy_value: Decimal::ZERO,
                    pnl: Decimal::ZERO,
                    realised: Decimal::ZERO,
                    unrealised: Decimal::ZERO,
                }),
            }
        }
        Ok(positions)
    }
}
