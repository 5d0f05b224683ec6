//! Offline pricing helpers.

use anyhow::Result;
use clap::Args;
use nifty_options_manager::{calculate_all_greeks, GreeksParams, OptionSide};

#[derive(Args, Debug)]
pub struct GreeksArgs {
    #[arg(long)]
    pub spot: f64,

    #[arg(long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(long)]
    pub years: f64,

    /// Annualized risk-free rate
    #[arg(long, default_value_t = 0.06)]
    pub rate: f64,

    /// Annualized volatility
    #[arg(long)]
    pub sigma: f64,

    /// `CE`/`call` or `PE`/`put`
    #[arg(long, default_value = "PE")]
    pub side: OptionSide,
}

pub fn run_greeks(args: &GreeksArgs) -> Result<()> {
    let params = GreeksParams {
        spot: args.spot,
        strike: args.strike,
        years: args.years,
        rate: args.rate,
        sigma: args.sigma,
    };
    let result = calculate_all_greeks(&params, args.side)?;
    super::print_json(&result)
}
