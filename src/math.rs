// src/math.rs
use alloy::primitives::utils::{format_units, parse_units, ParseUnits};
use alloy::primitives::U256;

use crate::shared::errors::PriceError;

/// Fractional digits carried by every fixed-point price
pub const PRICE_DECIMALS: u8 = 18;

/// 10^PRICE_DECIMALS, the fixed-point representation of 1
pub const PRICE_SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

const BPS_DENOMINATOR: u64 = 10_000;

/// 10^exp as U256. Token decimals past 77 do not fit.
pub fn pow10(exp: u8) -> Result<U256, PriceError> {
    U256::from(10u64)
        .checked_pow(U256::from(exp))
        .ok_or_else(|| PriceError::Overflow(format!("10^{} does not fit in 256 bits", exp)))
}

fn checked_mul(a: U256, b: U256, what: &str) -> Result<U256, PriceError> {
    a.checked_mul(b)
        .ok_or_else(|| PriceError::Overflow(format!("{} does not fit in 256 bits", what)))
}

/// Quote-per-base ratio of two reserves, adjusted for decimals and scaled by 10^PRICE_DECIMALS.
///
/// Computes `(reserve_quote / 10^quote_decimals) / (reserve_base / 10^base_decimals)`
/// entirely in integers. Callers reject empty reserves before getting here.
pub fn reserve_ratio(
    reserve_base: U256,
    base_decimals: u8,
    reserve_quote: U256,
    quote_decimals: u8,
) -> Result<U256, PriceError> {
    if reserve_base.is_zero() {
        return Err(PriceError::InvalidAmount("base reserve is zero".to_string()));
    }

    let numerator = checked_mul(reserve_quote, pow10(base_decimals)?, "quote reserve")?;
    let numerator = checked_mul(numerator, PRICE_SCALE, "scaled quote reserve")?;
    let denominator = checked_mul(reserve_base, pow10(quote_decimals)?, "base reserve")?;

    Ok(numerator / denominator)
}

/// Render a fixed-point price with `places` fractional digits, rounding half up
pub fn format_fixed(value: U256, places: u8) -> String {
    let places = places.min(PRICE_DECIMALS);
    // exponents stay within PRICE_DECIMALS
    let ten = U256::from(10u64);
    let step = ten.pow(U256::from(PRICE_DECIMALS - places));
    let half = step / U256::from(2u64);
    let rounded = (value.saturating_add(half)) / step;

    if places == 0 {
        return rounded.to_string();
    }

    let unit = ten.pow(U256::from(places));
    let whole = rounded / unit;
    let frac = rounded % unit;
    format!("{}.{:0>width$}", whole, frac.to_string(), width = places as usize)
}

/// Signed change from `before` to `after` in basis points, saturating at the i64 bounds
pub fn change_bps(before: U256, after: U256) -> Result<i64, PriceError> {
    if before.is_zero() {
        return Err(PriceError::InvalidAmount("reference price is zero".to_string()));
    }

    let (diff, negative) = if after >= before {
        (after - before, false)
    } else {
        (before - after, true)
    };
    // moves on near-empty pools can exceed both U256 and i64
    let bps = diff
        .checked_mul(U256::from(BPS_DENOMINATOR))
        .map(|scaled| scaled / before)
        .and_then(|bps| i64::try_from(bps).ok())
        .unwrap_or(i64::MAX);

    Ok(if negative { -bps } else { bps })
}

/// Convert a human amount ("40500000000000", "1.5") into base units
pub fn to_base_units(amount: &str, decimals: u8) -> Result<U256, PriceError> {
    match parse_units(amount.trim(), decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value),
        Ok(ParseUnits::I256(_)) => Err(PriceError::InvalidAmount(format!(
            "negative amount: {}",
            amount
        ))),
        Err(e) => Err(PriceError::InvalidAmount(format!("{}: {}", amount, e))),
    }
}

/// Convert base units into a human amount, trimming trailing zeros
pub fn from_base_units(value: U256, decimals: u8) -> Result<String, PriceError> {
    let formatted = format_units(value, decimals)
        .map_err(|e| PriceError::InvalidAmount(e.to_string()))?;

    if !formatted.contains('.') {
        return Ok(formatted);
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    Ok(trimmed.to_string())
}

/// Uniswap V2 output for an exact input, 0.3% fee
pub fn constant_product_out(amount_in: U256, reserve_in: U256, reserve_out: U256) -> U256 {
    if amount_in.is_zero() || reserve_in.is_zero() || reserve_out.is_zero() {
        return U256::ZERO;
    }

    let amount_in_with_fee = amount_in * U256::from(997u64);
    let numerator = amount_in_with_fee * reserve_out;
    let denominator = reserve_in * U256::from(1000u64) + amount_in_with_fee;
    numerator / denominator
}
