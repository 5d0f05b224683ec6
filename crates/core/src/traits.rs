use crate::error::BrokerResult;
use crate::order::OrderRequest;
use crate::position::Position;
use crate::quote::Quote;
use async_trait::async_trait;

#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Snapshot quote; `BrokerError::NotFound` when the instrument is unknown.
    async fn get_quote(&self, symbol: &str, exchange: &str) -> BrokerResult<Quote>;
}

#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Places an order and returns the broker order id.
    async fn place_order(&self, order: &OrderRequest) -> BrokerResult<String>;
}

#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn get_positions(&self) -> BrokerResult<Vec<Position>>;
}

#[async_trait]
pub trait SessionLogin: Send + Sync {
    /// Exchanges a login-redirect token for a session, returning the user id.
    async fn login(&self, request_token: &str) -> BrokerResult<String>;
}
