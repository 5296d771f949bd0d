//! Payer/payee party identification.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// How a party is identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartyIdType {
    /// Phone number
    Msisdn,
    Email,
    PartyCode,
}

/// The account holder on the other side of a collection or disbursement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub party_id_type: PartyIdType,
    pub party_id: String,
}

impl Party {
    /// Builds an MSISDN party, normalising the number.
    ///
    /// A leading `+`, spaces and dashes are dropped; what remains must be
    /// 8 to 15 digits (country code included).
    pub fn msisdn(number: &str) -> Result<Self, ValidationError> {
        let trimmed = number.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::MissingField("msisdn"));
        }

        let digits: String = trimmed
            .strip_prefix('+')
            .unwrap_or(trimmed)
            .chars()
            .filter(|c| *c != ' ' && *c != '-')
            .collect();

        if !(8..=15).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidMsisdn(number.to_string()));
        }

        Ok(Self {
            party_id_type: PartyIdType::Msisdn,
            party_id: digits,
        })
    }
}
