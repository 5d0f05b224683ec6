//! Black-Scholes price, delta and theta for European index options.

// Pricing formulas keep the usual S, K, T, r, sigma notation
#![allow(clippy::many_single_char_names)]

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};
use thiserror::Error;

use crate::types::{GreeksResult, OptionSide};

const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Error, PartialEq)]
pub enum GreeksError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl GreeksError {
    fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Inputs to the closed forms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreeksParams {
    /// Underlying spot price.
    pub spot: f64,
    pub strike: f64,
    /// Time to expiry in years.
    pub years: f64,
    /// Annualized risk-free rate, e.g. `0.06`.
    pub rate: f64,
    /// Annualized volatility, e.g. `0.15`.
    pub sigma: f64,
}

impl GreeksParams {
    /// Rejects inputs for which `d1` is undefined.
    ///
    /// # Errors
    /// Returns [`GreeksError::InvalidInput`] unless spot, strike, years and
    /// sigma are all finite and strictly positive.
    pub fn validate(&self) -> Result<(), GreeksError> {
        let checks = [
            ("spot", self.spot),
            ("strike", self.strike),
            ("years", self.years),
            ("sigma", self.sigma),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(GreeksError::invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !self.rate.is_finite() {
            return Err(GreeksError::invalid("rate must be finite"));
        }
        Ok(())
    }

    fn discounted_strike(&self) -> f64 {
        self.strike * (-self.rate * self.years).exp()
    }
}

/// Standard normal CDF via `Phi(x) = 0.5 * (1 + erf(x / sqrt(2)))`.
#[must_use]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + libm::erf(x / SQRT_2))
}

#[must_use]
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// `(d1, d2)` for validated parameters.
///
/// # Errors
/// See [`GreeksParams::validate`].
pub fn d1_d2(params: &GreeksParams) -> Result<(f64, f64), GreeksError> {
    params.validate()?;
    let GreeksParams {
        spot: s,
        strike: k,
        years: t,
        rate: r,
        sigma,
    } = *params;

    let vol_sqrt_t = sigma * t.sqrt();
    let d1 = ((s / k).ln() + (r + 0.5 * sigma * sigma) * t) / vol_sqrt_t;
    Ok((d1, d1 - vol_sqrt_t))
}

/// # Errors
/// See [`GreeksParams::validate`].
pub fn black_scholes_call(params: &GreeksParams) -> Result<f64, GreeksError> {
    let (d1, d2) = d1_d2(params)?;
    Ok(params.spot * norm_cdf(d1) - params.discounted_strike() * norm_cdf(d2))
}

/// # Errors
/// See [`GreeksParams::validate`].
pub fn black_scholes_put(params: &GreeksParams) -> Result<f64, GreeksError> {
    let (d1, d2) = d1_d2(params)?;
    Ok(params.discounted_strike() * norm_cdf(-d2) - params.spot * norm_cdf(-d1))
}

/// `Phi(d1)` for a call, `Phi(d1) - 1` for a put.
///
/// # Errors
/// See [`GreeksParams::validate`].
pub fn delta(params: &GreeksParams, side: OptionSide) -> Result<f64, GreeksError> {
    let (d1, _) = d1_d2(params)?;
    Ok(match side {
        OptionSide::Call => norm_cdf(d1),
        OptionSide::Put => norm_cdf(d1) - 1.0,
    })
}

/// Theta per calendar day.
///
/// The put value is the call theta plus `r * K * e^(-rT)`, a parity
/// adjustment kept as-is rather than the independently derived put theta.
///
/// # Errors
/// See [`GreeksParams::validate`].
pub fn theta(params: &GreeksParams, side: OptionSide) -> Result<f64, GreeksError> {
    let (d1, d2) = d1_d2(params)?;
    let carry = params.rate * params.discounted_strike();
    let call_annual = -params.spot * norm_pdf(d1) * params.sigma / (2.0 * params.years.sqrt())
        - carry * norm_cdf(d2);

    let annual = match side {
        OptionSide::Call => call_annual,
        OptionSide::Put => call_annual + carry,
    };
    Ok(annual / DAYS_PER_YEAR)
}

/// Delta, per-day theta and `round(T * 365)` days to expiry.
///
/// # Errors
/// Returns [`GreeksError::InvalidInput`] for non-positive spot, strike, time
/// or volatility.
pub fn calculate_all_greeks(params: &GreeksParams, side: OptionSide) -> Result<GreeksResult, GreeksError> {
    #[allow(clippy::cast_possible_truncation)]
    let days_to_expiry = (params.years * DAYS_PER_YEAR).round() as i64;
    Ok(GreeksResult {
        delta: delta(params, side)?,
        theta: theta(params, side)?,
        days_to_expiry,
    })
}
