//! Precision-safe price type.
//!
//! Uses `rust_decimal` for exact decimal arithmetic. Exchange APIs send
//! prices as strings; parsing them into `Decimal` avoids the rounding
//! drift of going through `f64` at the wire boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// Price with exact decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Percentage difference from another price.
    ///
    /// Returns None when the reference price is zero.
    #[inline]
    pub fn pct_from(&self, other: Price) -> Option<Decimal> {
        if other.is_zero() {
            return None;
        }
        Some((self.0 - other.0) / other.0 * Decimal::from(100))
    }

    /// Lossy conversion for statistics code that works in `f64`.
    #[inline]
    pub fn to_f64(&self) -> f64 {
        use rust_decimal::prelude::ToPrimitive;
        self.0.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pct_from() {
        let open = Price::new(dec!(100));
        let close = Price::new(dec!(102));

        let pct = close.pct_from(open).unwrap();
        assert_eq!(pct, dec!(2));
    }

    #[test]
    fn test_pct_from_zero_reference() {
        let close = Price::new(dec!(102));
        assert!(close.pct_from(Price::ZERO).is_none());
    }

    #[test]
    fn test_parse_wire_string() {
        let p: Price = "50000.12".parse().unwrap();
        assert_eq!(p.inner(), dec!(50000.12));
    }

    #[test]
    fn test_to_f64() {
        let p = Price::new(dec!(1.5));
        assert!((p.to_f64() - 1.5).abs() < f64::EPSILON);
    }
}
