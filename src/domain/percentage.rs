//! Percentage value backed by rust_decimal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PERCENT_SCALE: u32 = 2;

/// Percentage with two decimal places, serialized as a JSON number.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Percentage(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Percentage {
    pub fn zero() -> Self {
        Percentage(Decimal::ZERO)
    }

    /// Relative change from `old` to `new`, in percent.
    ///
    /// A zero `old` value has no meaningful base and yields zero.
    pub fn change(old: i64, new: i64) -> Self {
        if old == 0 {
            return Self::zero();
        }
        let old = Decimal::from(old);
        let delta = Decimal::from(new) - old;
        let pct = delta / old * Decimal::ONE_HUNDRED;
        Percentage(pct.round_dp(PERCENT_SCALE))
    }

    /// Parse from the canonical string stored in the database.
    pub fn from_str_canonical(s: &str) -> Result<Self, rust_decimal::Error> {
        Decimal::from_str(s.trim()).map(|d| Percentage(d.round_dp(PERCENT_SCALE)))
    }

    /// Format without exponent notation or trailing zeros.
    pub fn to_canonical_string(&self) -> String {
        format!("{}", self.0.normalize())
    }

    pub fn abs(&self) -> Self {
        Percentage(self.0.abs())
    }
}

impl FromStr for Percentage {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_canonical(s)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_canonical_string())
    }
}
