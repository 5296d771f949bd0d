//! Client-generated identifiers sent as `X-Reference-Id`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Reference of a request-to-pay or transfer.
///
/// Generated by the client for every initiate call and later used to look
/// the transaction up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionRef(Uuid);

impl TransactionRef {
    /// Creates a new random TransactionRef.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TransactionRef from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TransactionRef {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::MissingField("transaction_ref"));
        }
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ValidationError::InvalidReference(s.to_string()))
    }
}

/// Identifier of an API user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiUserId(Uuid);

impl ApiUserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ApiUserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ApiUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ApiUserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}
