//! Error types for MoMo domain values.

/// Validation errors raised before any request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid currency code: {0}")]
    InvalidCurrency(String),

    #[error("Invalid MSISDN: {0}")]
    InvalidMsisdn(String),

    #[error("Invalid transaction reference: {0}")]
    InvalidReference(String),

    #[error("Unknown target environment: {0}")]
    UnknownEnvironment(String),
}
