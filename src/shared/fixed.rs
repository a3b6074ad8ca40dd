//! Fixed-point codec for the exchange's on-wire numeric type.
//!
//! The exchange program stores leverage ratios, fee rates, and interest-curve
//! parameters as I80F48: a signed 128-bit integer scaled by 2^48. All
//! conversion math uses `rust_decimal::Decimal` for exact integer arithmetic.
//! No floats, no async, no network calls.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use thiserror::Error;

/// Number of fractional bits in the wire representation.
pub const FRAC_BITS: u32 = 48;

const ONE: i128 = 1i128 << FRAC_BITS;

/// Errors that can occur during fixed-point conversion.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixedError {
    #[error("invalid number: '{input}'")]
    InvalidFormat { input: String },

    #[error("value out of range: {value}")]
    OutOfRange { value: String },
}

/// A signed fixed-point number with 80 integer bits and 48 fractional bits.
///
/// Matches the exchange program's numeric type bit-for-bit: the raw `i128`
/// is what goes on the wire, little-endian. Conversions from decimals
/// truncate toward zero below the 2^-48 resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct I80F48(i128);

impl I80F48 {
    pub const ZERO: I80F48 = I80F48(0);

    /// Construct from a raw scaled value.
    pub fn from_bits(bits: i128) -> Self {
        Self(bits)
    }

    /// The raw scaled value.
    pub fn to_bits(self) -> i128 {
        self.0
    }

    /// Construct from a whole number.
    pub fn from_num(value: i64) -> Self {
        Self((value as i128) << FRAC_BITS)
    }

    /// Convert an exact decimal into the scaled representation.
    ///
    /// Fractional precision beyond 2^-48 is truncated toward zero. Fails
    /// with [`FixedError::OutOfRange`] when the integer part does not fit
    /// the 80 integer bits.
    pub fn from_decimal(value: Decimal) -> Result<Self, FixedError> {
        let out_of_range = || FixedError::OutOfRange {
            value: value.to_string(),
        };

        let int_part = value.trunc();
        let frac_part = value - int_part;

        let int = int_part.to_i128().ok_or_else(out_of_range)?;
        let frac_bits = frac_part
            .checked_mul(Decimal::from(ONE as i64))
            .ok_or_else(out_of_range)?
            .trunc()
            .to_i128()
            .ok_or_else(out_of_range)?;

        let bits = int
            .checked_mul(ONE)
            .and_then(|v| v.checked_add(frac_bits))
            .ok_or_else(out_of_range)?;

        Ok(Self(bits))
    }

    /// Convert back to a decimal.
    ///
    /// Exact for values whose fraction fits 28 decimal digits; longer
    /// dyadic fractions are rounded at `Decimal`'s precision limit.
    pub fn to_decimal(self) -> Decimal {
        let int = self.0 / ONE;
        let frac = self.0 % ONE;

        let int_dec = Decimal::from_i128_with_scale(int, 0);
        let frac_dec = Decimal::from(frac as i64) / Decimal::from(ONE as i64);
        int_dec + frac_dec
    }

    /// Parse a decimal string and scale it.
    ///
    /// Accepts plain decimal notation and scientific notation.
    pub fn parse(input: &str) -> Result<Self, FixedError> {
        let trimmed = input.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| FixedError::InvalidFormat {
                input: input.to_string(),
            })?;
        Self::from_decimal(value)
    }

    /// Parse an optional decimal string with patch semantics.
    ///
    /// `None`, the empty string, and whitespace-only input all resolve to
    /// [`PatchField::Absent`] — never to zero. `"0"` resolves to an
    /// explicit zero value.
    pub fn from_optional_str(input: Option<&str>) -> Result<PatchField<I80F48>, FixedError> {
        match input {
            None => Ok(PatchField::Absent),
            Some(s) if s.trim().is_empty() => Ok(PatchField::Absent),
            Some(s) => Ok(PatchField::Value(Self::parse(s)?)),
        }
    }

    /// The wire encoding: 16 bytes, little-endian.
    pub fn to_le_bytes(self) -> [u8; 16] {
        self.0.to_le_bytes()
    }

    /// Decode the wire encoding.
    pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
        Self(i128::from_le_bytes(bytes))
    }
}

impl fmt::Display for I80F48 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal())
    }
}

impl FromStr for I80F48 {
    type Err = FixedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<i64> for I80F48 {
    fn from(value: i64) -> Self {
        Self::from_num(value)
    }
}

// ─── PatchField ──────────────────────────────────────────────────────────────

/// A three-state optional parameter for "change" operations.
///
/// `Absent` means "leave the on-chain value untouched"; `Value(0)` means
/// "overwrite with zero". The two serialize to different wire bytes and
/// must never be conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchField<T> {
    /// Do not touch the on-chain value.
    Absent,
    /// Overwrite the on-chain value, including with an explicit zero.
    Value(T),
}

impl<T> PatchField<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, PatchField::Absent)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            PatchField::Absent => None,
            PatchField::Value(v) => Some(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PatchField<U> {
        match self {
            PatchField::Absent => PatchField::Absent,
            PatchField::Value(v) => PatchField::Value(f(v)),
        }
    }
}

impl<T> Default for PatchField<T> {
    fn default() -> Self {
        PatchField::Absent
    }
}

impl<T> From<Option<T>> for PatchField<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            None => PatchField::Absent,
            Some(v) => PatchField::Value(v),
        }
    }
}

// ─── Integer patch parsing ───────────────────────────────────────────────────

/// Parse an optional unsigned integer string with patch semantics.
pub fn optional_u64_from_str(input: Option<&str>) -> Result<PatchField<u64>, FixedError> {
    match input {
        None => Ok(PatchField::Absent),
        Some(s) if s.trim().is_empty() => Ok(PatchField::Absent),
        Some(s) => {
            let v = s.trim().parse::<u64>().map_err(|_| FixedError::InvalidFormat {
                input: s.to_string(),
            })?;
            Ok(PatchField::Value(v))
        }
    }
}

/// Parse an optional u8 string with patch semantics.
pub fn optional_u8_from_str(input: Option<&str>) -> Result<PatchField<u8>, FixedError> {
    match optional_u64_from_str(input)? {
        PatchField::Absent => Ok(PatchField::Absent),
        PatchField::Value(v) => {
            let v = u8::try_from(v).map_err(|_| FixedError::OutOfRange {
                value: v.to_string(),
            })?;
            Ok(PatchField::Value(v))
        }
    }
}

/// Convert a token amount in UI units to native units (`value * 10^decimals`).
///
/// The result is rounded half-away-from-zero at the native resolution and
/// must fit `u64`.
pub fn native_amount(value: Decimal, decimals: u8) -> Result<u64, FixedError> {
    let multiplier = Decimal::from(
        10u64
            .checked_pow(decimals as u32)
            .ok_or_else(|| FixedError::OutOfRange {
                value: format!("10^{}", decimals),
            })?,
    );

    value
        .checked_mul(multiplier)
        .ok_or_else(|| FixedError::OutOfRange {
            value: value.to_string(),
        })?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or_else(|| FixedError::OutOfRange {
            value: value.to_string(),
        })
}
