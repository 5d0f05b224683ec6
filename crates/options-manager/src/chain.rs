//! Options chain assembly from per-strike quotes.

use std::sync::Arc;

use nifty_options_core::{Quote, QuoteSource, StrategyConfig};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::strikes::generate_strikes;
use crate::types::{option_symbol, ChainRow, OptionSide, OptionsChain};

/// Builds a chain for one expiry by quoting both legs of every strike on the ladder.
pub struct ChainBuilder {
    quotes: Arc<dyn QuoteSource>,
    underlying: String,
    spot_symbol: String,
    spot_exchange: String,
    option_exchange: String,
    range_percent: Decimal,
    step: u32,
}

impl ChainBuilder {
    pub fn new(quotes: Arc<dyn QuoteSource>, config: &StrategyConfig) -> Self {
        Self {
            quotes,
            underlying: config.underlying.clone(),
            spot_symbol: config.spot_symbol.clone(),
            spot_exchange: config.spot_exchange.clone(),
            option_exchange: config.option_exchange.clone(),
            range_percent: config.strike_range_percent,
            step: config.strike_step,
        }
    }

    /// Chain with the configured strike band.
    pub async fn build(&self, expiry: &str) -> OptionsChain {
        self.build_with(expiry, self.range_percent, self.step).await
    }

    /// Chain over `spot ± range_percent` in `step` increments.
    ///
    /// Returns an empty chain when the spot quote is unavailable. A strike is
    /// kept only when both its call and put resolve; otherwise it is dropped
    /// without retry.
    pub async fn build_with(&self, expiry: &str, range_percent: Decimal, step: u32) -> OptionsChain {
        let spot = match self.quotes.get_quote(&self.spot_symbol, &self.spot_exchange).await {
            Ok(quote) => quote.last_price,
            Err(e) => {
                warn!(symbol = self.spot_symbol, error = %e, "Spot quote unavailable, chain is empty");
                return OptionsChain::default();
            }
        };

        let strikes = generate_strikes(spot, range_percent, step);
        let mut rows = Vec::with_capacity(strikes.len());

        for strike in strikes {
            let ce_symbol = option_symbol(&self.underlying, expiry, strike, OptionSide::Call);
            let pe_symbol = option_symbol(&self.underlying, expiry, strike, OptionSide::Put);

            let ce = self.quotes.get_quote(&ce_symbol, &self.option_exchange).await;
            let pe = self.quotes.get_quote(&pe_symbol, &self.option_exchange).await;

            match (ce, pe) {
                (Ok(ce), Ok(pe)) => rows.push(chain_row(strike, &ce, &pe, spot, expiry)),
                (ce, pe) => {
                    debug!(
                        strike,
                        ce = ?ce.err(),
                        pe = ?pe.err(),
                        "Dropping strike with missing leg"
                    );
                }
            }
        }

        info!(expiry, %spot, strikes = rows.len(), "Options chain built");
        OptionsChain { rows }
    }
}

fn chain_row(strike: i64, ce: &Quote, pe: &Quote, spot_price: Decimal, expiry: &str) -> ChainRow {
    ChainRow {
        strike,
        ce_ltp: ce.last_price,
        ce_volume: ce.volume,
        ce_oi: ce.open_interest,
        ce_bid: ce.best_bid,
        ce_ask: ce.best_ask,
        pe_ltp: pe.last_price,
        pe_volume: pe.volume,
        pe_oi: pe.open_interest,
        pe_bid: pe.best_bid,
        pe_ask: pe.best_ask,
        spot_price,
        expiry: expiry.to_string(),
    }
}
