//! Transaction status as reported by MoMo.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a request-to-pay or transfer.
///
/// A transaction stays `Pending` until the provider settles it as
/// `Successful` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Successful,
    Failed,
}

impl TransactionStatus {
    /// True once the provider will not change the status again.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TransactionStatus::Pending)
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "PENDING"),
            TransactionStatus::Successful => write!(f, "SUCCESSFUL"),
            TransactionStatus::Failed => write!(f, "FAILED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Successful.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_deserializes_from_provider_text() {
        let status: TransactionStatus = serde_json::from_str("\"SUCCESSFUL\"").unwrap();
        assert_eq!(status, TransactionStatus::Successful);
        assert_eq!(status.to_string(), "SUCCESSFUL");
    }
}
