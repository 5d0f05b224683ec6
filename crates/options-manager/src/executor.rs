//! Put-selling run: expiry, chain, candidates, sizing and order dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use nifty_options_core::{lot_quantity, OrderGateway, OrderRequest, Product, QuoteSource, StrategyConfig};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::candidates::select_candidates;
use crate::chain::ChainBuilder;
use crate::expiry::get_target_expiries;
use crate::types::{option_symbol, OptionSide, PlacedOrder, RunStatus, StrategyRun};

pub struct StrategyExecutor {
    quotes: Arc<dyn QuoteSource>,
    orders: Arc<dyn OrderGateway>,
    config: StrategyConfig,
}

impl StrategyExecutor {
    pub fn new(quotes: Arc<dyn QuoteSource>, orders: Arc<dyn OrderGateway>, config: StrategyConfig) -> Self {
        Self {
            quotes,
            orders,
            config,
        }
    }

    /// Sell up to `target_strikes` OTM puts on the soonest eligible expiry.
    ///
    /// Never returns an error: internal failures end the run with
    /// [`RunStatus::Error`] and the message in `errors`. Orders placed before
    /// such a failure stay placed.
    pub async fn execute(&self, capital: Decimal, target_strikes: u32, today: NaiveDate) -> StrategyRun {
        let mut run = StrategyRun::initiated();
        info!(%capital, target_strikes, %today, "Strategy run initiated");

        if let Err(e) = self.run(&mut run, capital, target_strikes, today).await {
            warn!(error = %e, "Strategy run aborted");
            run.status = RunStatus::Error;
            run.errors.push(e.to_string());
        }

        info!(
            status = ?run.status,
            orders = run.orders.len(),
            errors = run.errors.len(),
            "Strategy run finished"
        );
        run
    }

    async fn run(&self, run: &mut StrategyRun, capital: Decimal, target_strikes: u32, today: NaiveDate) -> Result<()> {
        if target_strikes == 0 {
            anyhow::bail!("target strikes must be positive");
        }
        if capital <= Decimal::ZERO {
            anyhow::bail!("capital must be positive, got {capital}");
        }
        let product: Product = self.config.product.parse().map_err(anyhow::Error::msg)?;

        let expiries = get_target_expiries(
            today,
            self.config.expiry_days_min,
            self.config.expiry_days_max,
            self.config.expiry_weekday,
            self.config.lookahead_cycles,
        );
        let Some(expiry) = expiries.first() else {
            run.fail("no suitable expiry found");
            return Ok(());
        };

        let chain = ChainBuilder::new(Arc::clone(&self.quotes), &self.config)
            .build(expiry)
            .await;
        if chain.is_empty() {
            run.fail("options chain not available");
            return Ok(());
        }

        let candidates = select_candidates(&chain, OptionSide::Put, self.config.min_premium);
        let capital_per_trade = capital
            .checked_div(Decimal::from(target_strikes))
            .context("capital per trade overflow")?;
        let lot_size = u64::from(self.config.lot_size);

        for candidate in candidates.into_iter().take(target_strikes as usize) {
            if candidate.premium <= Decimal::ZERO {
                debug!(strike = candidate.strike, premium = %candidate.premium, "No premium to sell, skipping strike");
                continue;
            }
            let quantity = lot_quantity(capital_per_trade, candidate.premium, self.config.lot_size)?;
            if quantity < lot_size {
                debug!(
                    strike = candidate.strike,
                    premium = %candidate.premium,
                    %capital_per_trade,
                    "Capital below one lot, skipping strike"
                );
                continue;
            }

            let symbol = option_symbol(&self.config.underlying, expiry, candidate.strike, OptionSide::Put);
            let request = OrderRequest::market_sell(&symbol, &self.config.option_exchange, quantity, product);

            match self.orders.place_order(&request).await {
                Ok(order_id) => {
                    info!(
                        order_id,
                        symbol,
                        quantity,
                        premium = %candidate.premium,
                        "Sell order placed"
                    );
                    run.orders.push(PlacedOrder {
                        order_id,
                        symbol,
                        strike: candidate.strike,
                        quantity,
                        premium: candidate.premium,
                        expiry: expiry.clone(),
                    });
                }
                Err(e) => {
                    warn!(symbol, quantity, error = %e, "Sell order failed");
                    run.errors
                        .push(format!("failed to place order for {}PE: {e}", candidate.strike));
                }
            }
        }

        run.status = if run.orders.is_empty() {
            RunStatus::Failed
        } else {
            RunStatus::Completed
        };
        Ok(())
    }
}
