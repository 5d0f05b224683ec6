//! Service facade over the broker collaborators and the strategy core.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use nifty_options_core::{
    AppConfig, BrokerResult, OrderGateway, OrderRequest, PnlSummary, Position, PositionSource, Quote,
    QuoteSource,
};
use rust_decimal::Decimal;
use tracing::info;

use crate::chain::ChainBuilder;
use crate::executor::StrategyExecutor;
use crate::expiry::get_target_expiries;
use crate::greeks::{calculate_all_greeks, GreeksError, GreeksParams};
use crate::monitor;
use crate::types::{GreeksResult, MonitorReport, OptionSide, OptionsChain, StrategyRun};

/// Entry point used by the HTTP and CLI surfaces.
///
/// Holds no mutable state; every call reads fresh data from the collaborators.
#[derive(Clone)]
pub struct OptionsService {
    quotes: Arc<dyn QuoteSource>,
    orders: Arc<dyn OrderGateway>,
    positions: Arc<dyn PositionSource>,
    config: Arc<AppConfig>,
}

impl OptionsService {
    pub fn new(
        quotes: Arc<dyn QuoteSource>,
        orders: Arc<dyn OrderGateway>,
        positions: Arc<dyn PositionSource>,
        config: AppConfig,
    ) -> Self {
        info!(
            underlying = config.strategy.underlying,
            lot_size = config.strategy.lot_size,
            stop_loss = %config.risk.stop_loss_percent,
            "Options service ready"
        );
        Self {
            quotes,
            orders,
            positions,
            config: Arc::new(config),
        }
    }

    /// Service where one broker handle serves quotes, orders and positions.
    pub fn with_broker<B>(broker: Arc<B>, config: AppConfig) -> Self
    where
        B: QuoteSource + OrderGateway + PositionSource + 'static,
    {
        Self::new(broker.clone(), broker.clone(), broker, config)
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Expiry labels from today, falling back to the configured window.
    #[must_use]
    pub fn expiries(&self, min_days: Option<i64>, max_days: Option<i64>) -> Vec<String> {
        self.expiries_on(today(), min_days, max_days)
    }

    #[must_use]
    pub fn expiries_on(&self, today: NaiveDate, min_days: Option<i64>, max_days: Option<i64>) -> Vec<String> {
        let strategy = &self.config.strategy;
        get_target_expiries(
            today,
            min_days.unwrap_or(strategy.expiry_days_min),
            max_days.unwrap_or(strategy.expiry_days_max),
            strategy.expiry_weekday,
            strategy.lookahead_cycles,
        )
    }

    pub async fn chain(&self, expiry: &str) -> OptionsChain {
        ChainBuilder::new(Arc::clone(&self.quotes), &self.config.strategy)
            .build(expiry)
            .await
    }

    pub async fn quote(&self, symbol: &str, exchange: &str) -> BrokerResult<Quote> {
        self.quotes.get_quote(symbol, exchange).await
    }

    pub async fn place_order(&self, request: &OrderRequest) -> BrokerResult<String> {
        let order_id = self.orders.place_order(request).await?;
        info!(
            order_id,
            symbol = request.symbol,
            side = request.transaction_type.as_str(),
            quantity = request.quantity,
            "Order placed"
        );
        Ok(order_id)
    }

    pub async fn positions(&self) -> BrokerResult<Vec<Position>> {
        self.positions.get_positions().await
    }

    /// Strategy run with configured defaults for any argument left out.
    pub async fn execute_strategy(&self, capital: Option<Decimal>, target_strikes: Option<u32>) -> StrategyRun {
        self.execute_strategy_on(today(), capital, target_strikes).await
    }

    pub async fn execute_strategy_on(
        &self,
        today: NaiveDate,
        capital: Option<Decimal>,
        target_strikes: Option<u32>,
    ) -> StrategyRun {
        let strategy = &self.config.strategy;
        let executor = StrategyExecutor::new(
            Arc::clone(&self.quotes),
            Arc::clone(&self.orders),
            strategy.clone(),
        );
        executor
            .execute(
                capital.unwrap_or(strategy.default_capital),
                target_strikes.unwrap_or(strategy.default_target_strikes),
                today,
            )
            .await
    }

    pub async fn monitor_positions(&self) -> BrokerResult<MonitorReport> {
        let positions = self.positions().await?;
        Ok(monitor::monitor(&positions, &self.config.risk))
    }

    pub async fn pnl_summary(&self) -> BrokerResult<PnlSummary> {
        let positions = self.positions().await?;
        Ok(monitor::pnl_summary(&positions))
    }

    /// # Errors
    /// Returns [`GreeksError::InvalidInput`] for degenerate parameters.
    pub fn greeks(&self, params: &GreeksParams, side: OptionSide) -> Result<GreeksResult, GreeksError> {
        calculate_all_greeks(params, side)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
