//! Fixed-point token amounts
//!
//! Amounts are `U256` integers in the token's smallest unit. Human input is parsed
//! from decimal strings without ever passing through floating point.

use ethereum_types::{U256, U512};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors from decimal amount parsing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Invalid character in amount: '{input}'")]
    InvalidDigit { input: String },

    #[error("Amount '{input}' has more than {decimals} fractional digits")]
    TooManyDecimals { input: String, decimals: u8 },

    #[error("Amount '{input}' does not fit in 256 bits")]
    Overflow { input: String },
}

/// Largest exponent whose power of ten fits in a `U256`
pub const MAX_POW10_EXP: u8 = 77;

/// `10^exp` as a `U256`, `None` past [`MAX_POW10_EXP`]
pub fn pow10(exp: u8) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(exp))
}

/// Parse a human-readable decimal string ("1.25") into smallest units
pub fn parse_units(value: &str, decimals: u8) -> Result<U256, AmountError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "." {
        return Err(AmountError::Empty);
    }

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(AmountError::InvalidDigit {
            input: value.to_string(),
        });
    }

    if fraction.len() > decimals as usize {
        // Trailing zeros beyond the token precision are harmless
        if fraction[decimals as usize..].bytes().any(|b| b != b'0') {
            return Err(AmountError::TooManyDecimals {
                input: value.to_string(),
                decimals,
            });
        }
    }

    let kept_fraction = &fraction[..fraction.len().min(decimals as usize)];
    let mut digits = String::with_capacity(whole.len() + decimals as usize);
    digits.push_str(if whole.is_empty() { "0" } else { whole });
    digits.push_str(kept_fraction);
    for _ in kept_fraction.len()..decimals as usize {
        digits.push('0');
    }

    U256::from_dec_str(&digits).map_err(|_| AmountError::Overflow {
        input: value.to_string(),
    })
}

/// Format smallest units as a trimmed decimal string ("1.5", "0.000001", "42")
pub fn format_units(amount: U256, decimals: u8) -> String {
    let raw = amount.to_string();
    let decimals = decimals as usize;
    if decimals == 0 {
        return raw;
    }

    let padded = if raw.len() <= decimals {
        format!("{}{}", "0".repeat(decimals + 1 - raw.len()), raw)
    } else {
        raw
    };

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// Lossy conversion for display-regime math
pub fn u256_to_f64(value: U256) -> f64 {
    value
        .0
        .iter()
        .rev()
        .fold(0.0, |acc, limb| acc * 18_446_744_073_709_551_616.0 + *limb as f64)
}

/// An amount tagged with its token precision, ordered by human value.
///
/// Comparison cross-scales the coarser side to the finer precision in 512-bit space,
/// so `1_000_000 @ 6` equals `10^18 @ 18` exactly. Any precision gap up to `u8::MAX`
/// is ordered without overflow.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedAmount {
    pub raw: U256,
    pub decimals: u8,
}

impl NormalizedAmount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

}

/// Orders `coarse` against `fine`, where `fine` carries at least as many decimals
fn cmp_rescaled(coarse: &NormalizedAmount, fine: &NormalizedAmount) -> Ordering {
    match pow10(fine.decimals - coarse.decimals) {
        Some(scale) => coarse.raw.full_mul(scale).cmp(&U512::from(fine.raw)),
        // 10^exp beyond 256 bits outweighs any raw value on the fine side
        None if coarse.raw.is_zero() => U256::zero().cmp(&fine.raw),
        None => Ordering::Greater,
    }
}

impl PartialEq for NormalizedAmount {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NormalizedAmount {}

impl PartialOrd for NormalizedAmount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NormalizedAmount {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.decimals <= other.decimals {
            cmp_rescaled(self, other)
        } else {
            cmp_rescaled(other, self).reverse()
        }
    }
}
