use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Calculate how many units to sell so that whole lots fit the capital slice
///
/// # Arguments
/// * `capital_per_trade` - Capital allotted to this one strike
/// * `premium` - Option premium per unit
/// * `lot_size` - Exchange lot size (units per lot)
///
/// # Returns
/// Quantity in units, always a multiple of `lot_size`. Zero when the slice
/// cannot cover a single lot.
///
/// # Errors
/// Returns error if the premium or lot size is not positive, or on overflow
pub fn lot_quantity(capital_per_trade: Decimal, premium: Decimal, lot_size: u32) -> Result<u64> {
    if lot_size == 0 {
        anyhow::bail!("Lot size must be positive");
    }

    if premium <= Decimal::ZERO {
        anyhow::bail!("Premium must be positive, got {premium}");
    }

    // Margin to sell one lot = premium × lot size
    let margin_per_lot = premium
        .checked_mul(Decimal::from(lot_size))
        .ok_or_else(|| anyhow::anyhow!("Margin overflow for premium {premium}"))?;

    let lots = capital_per_trade
        .checked_div(margin_per_lot)
        .ok_or_else(|| anyhow::anyhow!("Lot count overflow"))?
        .floor()
        .max(Decimal::ZERO)
        .to_u64()
        .ok_or_else(|| anyhow::anyhow!("Lot count out of range"))?;

    lots.checked_mul(u64::from(lot_size))
        .ok_or_else(|| anyhow::anyhow!("Quantity overflow"))
}
