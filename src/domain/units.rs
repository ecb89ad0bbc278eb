//! Fixed-point unit conversion for 18-decimal token amounts.
//!
//! Amounts travel as base-unit integer strings (wei). These helpers
//! render them for humans (`1000000000000000000` → `1.0`) and parse
//! decimal config values (`0.0001`) back into base units.

use alloy::primitives::utils::{self, ParseUnits};
use thiserror::Error;

/// Decimals of POL and WPOL.
pub const NATIVE_DECIMALS: u32 = 18;

/// Unit conversion failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("not a base-unit integer: {0:?}")]
    InvalidInteger(String),
    #[error("not a decimal amount: {0:?}")]
    InvalidDecimal(String),
    #[error("{input:?} has more than {decimals} fractional digits")]
    TooPrecise { input: String, decimals: u32 },
    #[error("amount overflows 128 bits: {0:?}")]
    Overflow(String),
}

/// Format a base-unit integer string with `decimals` fractional digits.
///
/// Trailing zeros are trimmed but at least one fractional digit is kept,
/// so zero renders as `0.0` and one whole token as `1.0`.
pub fn format_units(raw: &str, decimals: u32) -> Result<String, UnitsError> {
    let trimmed = raw.trim();
    let value: u128 = trimmed
        .parse()
        .map_err(|_| UnitsError::InvalidInteger(raw.to_string()))?;
    let scale = 10u128
        .checked_pow(decimals)
        .ok_or_else(|| UnitsError::Overflow(raw.to_string()))?;

    let whole = value / scale;
    let frac = value % scale;

    let mut frac_digits = format!("{frac:0width$}", width = decimals as usize);
    while frac_digits.len() > 1 && frac_digits.ends_with('0') {
        frac_digits.pop();
    }
    if frac_digits.is_empty() {
        frac_digits.push('0');
    }

    Ok(format!("{whole}.{frac_digits}"))
}

/// Parse a decimal string (`"0.0001"`) into base units.
///
/// Only plain unsigned decimals are accepted, and excess precision is an
/// error rather than being truncated. The scaling itself is alloy's.
pub fn parse_units(amount: &str, decimals: u32) -> Result<u128, UnitsError> {
    let amount = amount.trim();
    let (whole, frac) = amount.split_once('.').unwrap_or((amount, ""));

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && frac.is_empty()) || !all_digits(whole) || !all_digits(frac) {
        return Err(UnitsError::InvalidDecimal(amount.to_string()));
    }
    if frac.len() > decimals as usize {
        return Err(UnitsError::TooPrecise {
            input: amount.to_string(),
            decimals,
        });
    }

    let overflow = || UnitsError::Overflow(amount.to_string());
    let units = u8::try_from(decimals).map_err(|_| overflow())?;
    match utils::parse_units(amount, units) {
        Ok(ParseUnits::U256(value)) => u128::try_from(value).map_err(|_| overflow()),
        Ok(ParseUnits::I256(_)) => Err(UnitsError::InvalidDecimal(amount.to_string())),
        Err(_) => Err(overflow()),
    }
}
