use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use nifty_options_core::{
    OrderRequest, OrderType, PnlSummary, Position, Product, Quote, SessionLogin, TransactionType,
};
use nifty_options_manager::{
    ChainRow, GreeksParams, GreeksResult, MonitorReport, OptionSide, OptionsService, StrategyRun,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::response::{ApiError, ApiResponse, ApiResult};

/// Shared handler state.
pub struct AppState {
    pub service: OptionsService,
    pub login: Option<Arc<dyn SessionLogin>>,
}

type AppStateRef = State<Arc<AppState>>;

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub service: &'static str,
}

pub async fn health() -> ApiResult<Health> {
    Ok(ApiResponse::ok(Health {
        status: "healthy",
        service: "NIFTY Options Trader API",
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub request_token: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: String,
}

/// Exchanges the broker's login-redirect token for a session.
///
/// # Errors
/// `501` when the server runs without a broker session manager.
pub async fn login(
    State(state): AppStateRef,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let req = body(payload)?;
    let login = state
        .login
        .as_ref()
        .ok_or_else(|| ApiError::new(StatusCode::NOT_IMPLEMENTED, "broker login not configured"))?;
    let user_id = login.login(&req.request_token).await?;
    Ok(ApiResponse::ok(LoginResponse { user_id }))
}

#[derive(Debug, Deserialize)]
pub struct ExpiryQuery {
    pub min_days: Option<i64>,
    pub max_days: Option<i64>,
}

pub async fn expiries(State(state): AppStateRef, Query(q): Query<ExpiryQuery>) -> ApiResult<Vec<String>> {
    Ok(ApiResponse::ok(state.service.expiries(q.min_days, q.max_days)))
}

/// Chain rows for `expiry`; empty when spot is unavailable.
pub async fn options_chain(State(state): AppStateRef, Path(expiry): Path<String>) -> ApiResult<Vec<ChainRow>> {
    let chain = state.service.chain(&expiry.to_uppercase()).await;
    Ok(ApiResponse::ok(chain.rows))
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub exchange: Option<String>,
}

pub async fn quote(
    State(state): AppStateRef,
    Path(symbol): Path<String>,
    Query(q): Query<QuoteQuery>,
) -> ApiResult<Quote> {
    let exchange = q
        .exchange
        .unwrap_or_else(|| state.service.config().strategy.option_exchange.clone());
    let quote = state.service.quote(&symbol, &exchange).await?;
    Ok(ApiResponse::ok(quote))
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub symbol: String,
    pub exchange: Option<String>,
    pub transaction_type: TransactionType,
    pub quantity: u64,
    pub price: Option<Decimal>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct PlacedOrderResponse {
    pub order_id: String,
}

/// # Errors
/// `400` for a zero quantity or a limit order without a positive price.
pub async fn place_order(
    State(state): AppStateRef,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> ApiResult<PlacedOrderResponse> {
    let req = body(payload)?;
    if req.quantity == 0 {
        return Err(ApiError::bad_request("quantity must be positive"));
    }
    if req.order_type == OrderType::Limit && !req.price.is_some_and(|p| p > Decimal::ZERO) {
        return Err(ApiError::bad_request("limit orders require a positive price"));
    }

    let order = OrderRequest {
        exchange: req
            .exchange
            .unwrap_or_else(|| state.service.config().strategy.option_exchange.clone()),
        symbol: req.symbol,
        transaction_type: req.transaction_type,
        quantity: req.quantity,
        price: req.price,
        order_type: req.order_type,
        product: req.product,
    };
    let order_id = state.service.place_order(&order).await?;
    Ok(ApiResponse::ok(PlacedOrderResponse { order_id }))
}

pub async fn positions(State(state): AppStateRef) -> ApiResult<Vec<Position>> {
    Ok(ApiResponse::ok(state.service.positions().await?))
}

#[derive(Debug, Default, Deserialize)]
pub struct ExecuteRequest {
    pub capital: Option<Decimal>,
    pub target_strikes: Option<u32>,
}

/// Runs the strategy. The run outcome is in `data.status`; the request
/// itself succeeds whenever a run was attempted.
///
/// A request without a JSON body runs with the configured defaults.
///
/// # Errors
/// `400` for a JSON body that does not parse; no run is started.
pub async fn execute_strategy(
    State(state): AppStateRef,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> ApiResult<StrategyRun> {
    let req = match payload {
        Err(JsonRejection::MissingJsonContentType(_)) => ExecuteRequest::default(),
        other => body(other)?,
    };
    let run = state.service.execute_strategy(req.capital, req.target_strikes).await;
    Ok(ApiResponse::ok(run))
}

pub async fn monitor_positions(State(state): AppStateRef) -> ApiResult<MonitorReport> {
    Ok(ApiResponse::ok(state.service.monitor_positions().await?))
}

pub async fn pnl_summary(State(state): AppStateRef) -> ApiResult<PnlSummary> {
    Ok(ApiResponse::ok(state.service.pnl_summary().await?))
}

#[derive(Debug, Deserialize)]
pub struct GreeksRequest {
    #[serde(flatten)]
    pub params: GreeksParams,
    pub side: OptionSide,
}

pub async fn greeks(
    State(state): AppStateRef,
    payload: Result<Json<GreeksRequest>, JsonRejection>,
) -> ApiResult<GreeksResult> {
    let req = body(payload)?;
    Ok(ApiResponse::ok(state.service.greeks(&req.params, req.side)?))
}
