//! Error type for client operations.

use momo_types::ValidationError;

/// Error type for client operations.
///
/// `Validation` and `Config` are raised before anything is sent; the other
/// variants come from the transport or from the provider.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(
        "API error: {status}{} - {message}",
        .code.as_deref().map(|c| format!(" {c}")).unwrap_or_default()
    )]
    Api {
        status: u16,
        /// MoMo's machine-readable error code, e.g. `PAYER_NOT_FOUND`
        code: Option<String>,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status returned by the provider, if this is an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// MoMo's error code, if the provider sent one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// True for errors caused by the caller's input rather than the network
    /// or the provider.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_) | ClientError::Config(_))
    }
}
