//! Product port trait.
//!
//! Collections and Disbursements expose the same four operations (token,
//! initiate, status, balance) under different paths. Each product is a
//! zero-sized type carrying those paths as associated constants.

/// Which side of the payment the counterparty sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    /// The counterparty pays us (collections).
    Payer,
    /// We pay the counterparty (disbursements).
    Payee,
}

/// A MoMo product line.
pub trait Product: Send + Sync + 'static {
    /// Path segment and log name, e.g. `collection`.
    const NAME: &'static str;

    /// Prefix for product-specific environment variables, e.g. `COLLECTION`.
    const ENV_PREFIX: &'static str;

    /// Bearer token endpoint.
    const TOKEN_PATH: &'static str;

    /// Endpoint that initiates a payment; `{INITIATE_PATH}/{ref}` is its status.
    const INITIATE_PATH: &'static str;

    /// Role of the counterparty in the initiate body.
    const PARTY_ROLE: PartyRole;

    /// Account balance endpoint.
    fn balance_path() -> String {
        format!("/{}/v1_0/account/balance", Self::NAME)
    }

    /// Status endpoint for a previously initiated transaction.
    fn status_path(reference: &impl std::fmt::Display) -> String {
        format!("{}/{}", Self::INITIATE_PATH, reference)
    }
}

/// Receiving payments from customers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionProduct;

impl Product for CollectionProduct {
    const NAME: &'static str = "collection";
    const ENV_PREFIX: &'static str = "COLLECTION";
    const TOKEN_PATH: &'static str = "/collection/token/";
    const INITIATE_PATH: &'static str = "/collection/v1_0/requesttopay";
    const PARTY_ROLE: PartyRole = PartyRole::Payer;
}

/// Sending payouts to customers.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisbursementProduct;

impl Product for DisbursementProduct {
    const NAME: &'static str = "disbursement";
    const ENV_PREFIX: &'static str = "DISBURSEMENT";
    const TOKEN_PATH: &'static str = "/disbursement/token/";
    const INITIATE_PATH: &'static str = "/disbursement/v1_0/transfer";
    const PARTY_ROLE: PartyRole = PartyRole::Payee;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TransactionRef;

    #[test]
    fn test_collection_paths() {
        assert_eq!(
            CollectionProduct::balance_path(),
            "/collection/v1_0/account/balance"
        );
        let r = TransactionRef::new();
        assert_eq!(
            CollectionProduct::status_path(&r),
            format!("/collection/v1_0/requesttopay/{r}")
        );
    }

    #[test]
    fn test_disbursement_paths() {
        assert_eq!(
            DisbursementProduct::balance_path(),
            "/disbursement/v1_0/account/balance"
        );
        assert_eq!(DisbursementProduct::PARTY_ROLE, PartyRole::Payee);
    }
}
