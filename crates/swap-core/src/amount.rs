//! Decimal amount codec.
//!
//! Converts between human decimal strings ("1.5") and on-chain integer
//! base units (1_500_000_000 at 9 decimals) using exact integer
//! arithmetic. Floats never touch an amount that ends up on chain.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("invalid amount: {0}")]
    Invalid(String),

    /// More fractional digits than the token carries. Truncating silently
    /// would move user funds, so this is always an error.
    #[error("amount has more than {0} decimal places")]
    TooManyDecimals(u8),

    #[error("amount overflows the representable range")]
    Overflow,
}

/// Parse a decimal string into smallest base units at `decimals` precision.
///
/// Accepts plain non-negative decimals: "10", "1.5", "0.000001", ".5".
/// Rejects empty strings, signs, exponents, group separators, and
/// fractional parts longer than `decimals`.
pub fn to_base_units(input: &str, decimals: u8) -> Result<u128, AmountError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Invalid("empty amount".into()));
    }

    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::Invalid(trimmed.into()));
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(AmountError::Invalid(trimmed.into()));
    }
    if frac_part.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals(decimals));
    }

    let scale = 10u128
        .checked_pow(decimals as u32)
        .ok_or(AmountError::Overflow)?;

    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| AmountError::Overflow)?
    };

    // Right-pad the fraction to `decimals` digits.
    let frac_value: u128 = if frac_part.is_empty() {
        0
    } else {
        let parsed: u128 = frac_part.parse().map_err(|_| AmountError::Overflow)?;
        let pad = decimals as u32 - frac_part.len() as u32;
        parsed
            .checked_mul(10u128.pow(pad))
            .ok_or(AmountError::Overflow)?
    };

    int_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or(AmountError::Overflow)
}

/// Format base units back into a decimal string, trimming trailing
/// fractional zeros ("1.500000000" renders as "1.5", "2.000" as "2").
pub fn from_base_units(value: u128, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }

    let scale = 10u128.pow(decimals as u32);
    let whole = value / scale;
    let frac = value % scale;

    if frac == 0 {
        return whole.to_string();
    }

    let frac_str = format!("{frac:0width$}", width = decimals as usize);
    format!("{whole}.{}", frac_str.trim_end_matches('0'))
}

/// Re-render a user-entered amount in canonical form, or error if it does
/// not parse at the given precision.
pub fn normalize(input: &str, decimals: u8) -> Result<String, AmountError> {
    to_base_units(input, decimals).map(|v| from_base_units(v, decimals))
}
