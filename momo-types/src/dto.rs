//! Data Transfer Objects (DTOs) for MoMo requests and responses.
//!
//! Field names follow the MoMo wire format (camelCase) except for the token
//! endpoint, which answers in snake_case.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Currency, Party, TargetEnvironment, TransactionRef, TransactionStatus};
use crate::error::ValidationError;
use crate::ports::PartyRole;

// ─────────────────────────────────────────────────────────────────────────────
// Provisioning DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Body of `POST /v1_0/apiuser`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUserRequest {
    /// Host that MoMo will call back; a bare host name, not a URL
    pub provider_callback_host: String,
}

/// Response of `GET /v1_0/apiuser/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUserInfo {
    pub provider_callback_host: String,
    /// Kept as sent; MoMo adds markets over time
    pub target_environment: String,
}

impl ApiUserInfo {
    /// The target environment, if it is one this crate knows.
    pub fn environment(&self) -> Option<TargetEnvironment> {
        self.target_environment.parse().ok()
    }
}

/// Response of `POST /v1_0/apiuser/{id}/apikey`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyResponse {
    pub api_key: String,
}

/// Response of `POST /{product}/token/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime in seconds
    pub expires_in: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Caller-side description of a request-to-pay or transfer.
///
/// Product clients turn this into the product's wire body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOrder {
    pub amount: Amount,
    pub party: Party,
    pub external_id: String,
    pub payer_message: String,
    pub payee_note: String,
    /// Overrides the client's configured currency
    pub currency: Option<Currency>,
    /// Overrides the client's configured `X-Callback-Url`
    pub callback_url: Option<String>,
}

impl PaymentOrder {
    pub const DEFAULT_PAYER_MESSAGE: &'static str = "Payment request";
    pub const DEFAULT_PAYEE_NOTE: &'static str = "Payment";

    /// Validates the three required inputs.
    pub fn new(amount: &str, msisdn: &str, external_id: &str) -> Result<Self, ValidationError> {
        let amount = Amount::parse(amount)?;
        let party = Party::msisdn(msisdn)?;
        if external_id.trim().is_empty() {
            return Err(ValidationError::MissingField("external_id"));
        }

        Ok(Self {
            amount,
            party,
            external_id: external_id.to_string(),
            payer_message: Self::DEFAULT_PAYER_MESSAGE.to_string(),
            payee_note: Self::DEFAULT_PAYEE_NOTE.to_string(),
            currency: None,
            callback_url: None,
        })
    }

    pub fn with_payer_message(mut self, message: impl Into<String>) -> Self {
        self.payer_message = message.into();
        self
    }

    pub fn with_payee_note(mut self, note: impl Into<String>) -> Self {
        self.payee_note = note.into();
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn with_callback_url(mut self, url: impl Into<String>) -> Self {
        self.callback_url = Some(url.into());
        self
    }

    /// Builds the wire body for a product whose counterparty has `role`.
    pub fn to_body(&self, role: PartyRole, default_currency: &Currency) -> InitiateBody {
        let currency = self
            .currency
            .clone()
            .unwrap_or_else(|| default_currency.clone());

        match role {
            PartyRole::Payer => InitiateBody::RequestToPay(RequestToPay {
                amount: self.amount.clone(),
                currency,
                external_id: self.external_id.clone(),
                payer: self.party.clone(),
                payer_message: self.payer_message.clone(),
                payee_note: self.payee_note.clone(),
            }),
            PartyRole::Payee => InitiateBody::Transfer(Transfer {
                amount: self.amount.clone(),
                currency,
                external_id: self.external_id.clone(),
                payee: self.party.clone(),
                payer_message: self.payer_message.clone(),
                payee_note: self.payee_note.clone(),
            }),
        }
    }
}

/// Body of `POST /collection/v1_0/requesttopay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestToPay {
    pub amount: Amount,
    pub currency: Currency,
    pub external_id: String,
    pub payer: Party,
    pub payer_message: String,
    pub payee_note: String,
}

/// Body of `POST /disbursement/v1_0/transfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub amount: Amount,
    pub currency: Currency,
    pub external_id: String,
    pub payee: Party,
    pub payer_message: String,
    pub payee_note: String,
}

/// Either initiate body, serialized without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InitiateBody {
    RequestToPay(RequestToPay),
    Transfer(Transfer),
}

/// What an initiate call hands back: the HTTP status and the reference to
/// poll with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub status_code: u16,
    pub transaction_ref: TransactionRef,
}

// ─────────────────────────────────────────────────────────────────────────────
// Query DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Why a transaction failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReason {
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// MoMo reports `reason` either as an object or as a bare code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FailureReason {
    Detailed(ErrorReason),
    Code(String),
}

/// Response of the `/{ref}` status endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStatusResponse {
    pub amount: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financial_transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee_note: Option<String>,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

/// Response of `/{product}/v1_0/account/balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    pub available_balance: String,
    pub currency: String,
}
