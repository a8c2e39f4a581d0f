//! Currency amounts held as integer cents.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised when converting a decimal amount into [`Money`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoneyError {
    /// The amount was NaN or infinite.
    #[error("amount must be a finite number")]
    NotFinite,

    /// The amount does not fit in the supported range.
    #[error("amount {0} is out of range")]
    OutOfRange(f64),
}

/// Money amount represented in cents to avoid floating point issues.
///
/// On the wire an amount is a plain JSON number in currency units
/// (`9.5` is 950 cents). Inbound values are rounded to the nearest cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Largest magnitude accepted from a decimal input, in currency units.
    ///
    /// Keeps `amount + 10%` below 2^53 cents so every total serializes
    /// through `f64` without losing a cent.
    const MAX_UNITS: f64 = 800_000_000_000.0;

    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a Money amount from a decimal currency value, rounding to the cent.
    pub fn from_decimal(amount: f64) -> Result<Self, MoneyError> {
        if !amount.is_finite() {
            return Err(MoneyError::NotFinite);
        }
        if amount.abs() > Self::MAX_UNITS {
            return Err(MoneyError::OutOfRange(amount));
        }
        Ok(Self {
            cents: (amount * 100.0).round() as i64,
        })
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the amount as a decimal currency value.
    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Returns `percent`% of this amount, rounded half away from zero to the cent.
    pub fn percentage(&self, percent: u32) -> Money {
        let scaled = i128::from(self.cents) * i128::from(percent);
        let half = if scaled < 0 { -50 } else { 50 };
        Money {
            cents: ((scaled + half) / 100) as i64,
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents += rhs.cents;
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount).map_err(serde::de::Error::custom)
    }
}
