//! Amount and currency as sent to the MoMo API.
//!
//! MoMo takes amounts as decimal strings, so [`Amount`] keeps the caller's
//! text instead of converting through a float or minor units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A positive decimal amount, serialized exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    /// Parses and validates an amount such as `"100"` or `"12.50"`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ValidationError::MissingField("amount"));
        }

        let mut parts = value.splitn(2, '.');
        let whole = parts.next().unwrap_or_default();
        let fraction = parts.next();

        let digits_ok = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        let valid = digits_ok(whole) && fraction.is_none_or(digits_ok);
        if !valid {
            return Err(ValidationError::InvalidAmount(value.to_string()));
        }

        if value.bytes().all(|b| b == b'0' || b == b'.') {
            return Err(ValidationError::InvalidAmount(format!(
                "{value} (must be greater than zero)"
            )));
        }

        Ok(Self(value.to_string()))
    }

    /// Returns the amount text as it will be sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u64> for Amount {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(ValidationError::InvalidAmount(
                "0 (must be greater than zero)".to_string(),
            ));
        }
        Ok(Self(value.to_string()))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// ISO-4217 currency code.
///
/// The sandbox only accepts `EUR`; production markets use their local code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(String);

impl Currency {
    /// Validates a three-letter code and normalises it to upper case.
    pub fn new(code: &str) -> Result<Self, ValidationError> {
        let code = code.trim();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self("EUR".to_string())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_keeps_text() {
        let amount = Amount::parse(" 12.50 ").unwrap();
        assert_eq!(amount.as_str(), "12.50");
        assert_eq!(serde_json::to_string(&amount).unwrap(), "\"12.50\"");
    }

    #[test]
    fn test_amount_rejects_garbage() {
        assert!(matches!(
            Amount::parse("12a"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::parse("1.2.3"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::parse("-5"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert!(matches!(
            Amount::parse("5."),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_amount_rejects_zero_and_empty() {
        assert!(matches!(
            Amount::parse("0.00"),
            Err(ValidationError::InvalidAmount(_))
        ));
        assert_eq!(
            Amount::parse("  "),
            Err(ValidationError::MissingField("amount"))
        );
    }

    #[test]
    fn test_amount_from_integer() {
        assert_eq!(Amount::try_from(250u64).unwrap().as_str(), "250");
        assert!(matches!(
            Amount::try_from(0u64),
            Err(ValidationError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_currency_normalised() {
        assert_eq!(Currency::new("ugx").unwrap().as_str(), "UGX");
        assert_eq!(Currency::default().as_str(), "EUR");
    }

    #[test]
    fn test_currency_invalid() {
        assert!(Currency::new("EURO").is_err());
        assert!(Currency::new("E1R").is_err());
    }
}
