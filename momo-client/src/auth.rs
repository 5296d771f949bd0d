//! API-user provisioning and Basic-auth key derivation.
//!
//! In the sandbox every client starts from a throwaway API user:
//!
//! 1. `POST /v1_0/apiuser` registers a fresh user id with a callback host.
//! 2. `POST /v1_0/apiuser/{id}/apikey` issues its secret.
//! 3. `Basic base64(user:secret)` is the key used to fetch Bearer tokens.
//!
//! Outside the sandbox the user id and secret come from configuration and
//! only step 3 runs.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde::Serialize;

use momo_types::{ApiKeyResponse, ApiUserId, ApiUserInfo, ApiUserRequest};

use crate::ClientError;
use crate::http::{self, REFERENCE_ID, SUBSCRIPTION_KEY};

/// Value of the `Authorization` header used on token endpoints.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuthKey(String);

impl BasicAuthKey {
    /// Derives `Basic base64(user:secret)`.
    pub fn new(user_id: &str, api_secret: &str) -> Self {
        let encoded = STANDARD.encode(format!("{user_id}:{api_secret}"));
        Self(format!("Basic {encoded}"))
    }

    pub fn header_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BasicAuthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BasicAuthKey(<redacted>)")
    }
}

/// An API user together with its secret.
#[derive(Clone, Serialize)]
pub struct ApiCredentials {
    pub user_id: String,
    pub api_key: String,
}

impl ApiCredentials {
    pub fn basic_key(&self) -> BasicAuthKey {
        BasicAuthKey::new(&self.user_id, &self.api_key)
    }
}

impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("user_id", &self.user_id)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Creates API users against the sandbox provisioning endpoints.
#[derive(Debug, Clone)]
pub struct Provisioner {
    http: Client,
    base_url: String,
    subscription_key: String,
}

impl Provisioner {
    pub fn new(
        http: Client,
        base_url: impl Into<String>,
        subscription_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            subscription_key: subscription_key.into(),
        }
    }

    /// Registers `user_id` as a new API user.
    pub async fn create_api_user(
        &self,
        user_id: ApiUserId,
        callback_host: &str,
    ) -> Result<(), ClientError> {
        let body = ApiUserRequest {
            provider_callback_host: callback_host.to_string(),
        };
        tracing::debug!(%user_id, "POST /v1_0/apiuser");
        let resp = self
            .http
            .post(format!("{}/v1_0/apiuser", self.base_url))
            .header(REFERENCE_ID, user_id.to_string())
            .header(SUBSCRIPTION_KEY, &self.subscription_key)
            .json(&body)
            .send()
            .await?;
        http::ensure_success(resp).await?;
        Ok(())
    }

    /// Issues a new secret for an existing API user.
    pub async fn create_api_key(&self, user_id: ApiUserId) -> Result<String, ClientError> {
        tracing::debug!(%user_id, "POST /v1_0/apiuser/{{id}}/apikey");
        let resp = self
            .http
            .post(format!("{}/v1_0/apiuser/{}/apikey", self.base_url, user_id))
            .header(SUBSCRIPTION_KEY, &self.subscription_key)
            .send()
            .await?;
        let key: ApiKeyResponse = http::read_json(resp).await?;
        Ok(key.api_key)
    }

    /// Looks up an API user's registration.
    pub async fn get_api_user(&self, user_id: ApiUserId) -> Result<ApiUserInfo, ClientError> {
        let resp = self
            .http
            .get(format!("{}/v1_0/apiuser/{}", self.base_url, user_id))
            .header(SUBSCRIPTION_KEY, &self.subscription_key)
            .send()
            .await?;
        http::read_json(resp).await
    }

    /// Creates a fresh API user and its secret.
    pub async fn provision(&self, callback_host: &str) -> Result<ApiCredentials, ClientError> {
        let user_id = ApiUserId::new();
        self.create_api_user(user_id, callback_host).await?;
        let api_key = self.create_api_key(user_id).await?;
        tracing::info!(%user_id, "Provisioned sandbox API user");
        Ok(ApiCredentials {
            user_id: user_id.to_string(),
            api_key,
        })
    }
}
