//! Exact fixed-point handling of ledger-native asset amounts.
//!
//! Asset amounts are encoded as signed 64-bit integers in the XDR
//! structures; one display unit is 10,000,000 native units. The scale is a
//! fixed, function-local property of this type rather than any ambient
//! precision setting, so parses can never interfere with each other.

use std::fmt;

/// Native units per display unit.
pub const AMOUNT_SCALE_FACTOR: i64 = 10_000_000;

/// Fractional digits implied by [`AMOUNT_SCALE_FACTOR`].
const SCALE_DIGITS: usize = 7;

/// An asset amount held as raw native units, displayed as an exact base-10
/// decimal. Never goes through a binary float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScaledAmount(i64);

impl ScaledAmount {
    /// Construct from raw native units.
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw native-unit value.
    pub const fn raw(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ScaledAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let whole = magnitude / AMOUNT_SCALE_FACTOR as u64;
        let frac = magnitude % AMOUNT_SCALE_FACTOR as u64;

        if self.0 < 0 {
            f.write_str("-")?;
        }
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:0width$}", width = SCALE_DIGITS);
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}
