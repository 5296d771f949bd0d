//! Product clients for Collections and Disbursements.

use std::marker::PhantomData;

use reqwest::{Client, RequestBuilder};

use momo_types::{
    AccessToken, Balance, CollectionProduct, Currency, DisbursementProduct, PaymentOrder,
    PaymentReceipt, Product, TargetEnvironment, TransactionRef, TransactionStatusResponse,
};

use crate::auth::{ApiCredentials, BasicAuthKey, Provisioner};
use crate::http::{self, CALLBACK_URL, REFERENCE_ID, SUBSCRIPTION_KEY, TARGET_ENVIRONMENT};
use crate::token::TokenCache;
use crate::{ClientError, MomoConfig};

/// Client for the Collections product (request-to-pay).
pub type CollectionClient = ProductClient<CollectionProduct>;

/// Client for the Disbursements product (transfer).
pub type DisbursementClient = ProductClient<DisbursementProduct>;

/// MoMo API client for one product line.
///
/// Generic over `P: Product` - the product's endpoints are fixed at compile
/// time. Each instance owns its API user and caches one Bearer token.
pub struct ProductClient<P: Product> {
    http: Client,
    base_url: String,
    environment: TargetEnvironment,
    currency: Currency,
    callback_url: Option<String>,
    subscription_key: String,
    user_id: String,
    basic_key: BasicAuthKey,
    tokens: TokenCache,
    _product: PhantomData<fn() -> P>,
}

impl<P: Product> ProductClient<P> {
    /// Builds a client from configuration.
    ///
    /// A configured user id and secret are always used as-is. Without them
    /// the sandbox provisions a fresh API user; other environments fail.
    pub async fn connect(config: &MomoConfig) -> Result<Self, ClientError> {
        Self::connect_with(config, Client::new()).await
    }

    /// Like [`connect`](Self::connect) but with a caller-supplied HTTP client.
    pub async fn connect_with(config: &MomoConfig, http: Client) -> Result<Self, ClientError> {
        let creds = config.credentials::<P>();
        let subscription_key = creds.subscription_key.ok_or_else(|| {
            ClientError::Config(format!("{}_PRIMARY_KEY is required", P::ENV_PREFIX))
        })?;

        let api = match (creds.user_id, creds.api_secret) {
            (Some(user_id), Some(api_key)) => ApiCredentials { user_id, api_key },
            _ if config.environment.is_sandbox() => {
                let callback_host = config.provider_callback_host()?;
                Provisioner::new(http.clone(), &config.base_url, &subscription_key)
                    .provision(&callback_host)
                    .await?
            }
            (None, _) => {
                return Err(ClientError::Config(format!(
                    "{}_USER_ID is required",
                    P::ENV_PREFIX
                )));
            }
            (Some(_), None) => {
                return Err(ClientError::Config(format!(
                    "{}_API_SECRET is required",
                    P::ENV_PREFIX
                )));
            }
        };

        tracing::info!(
            product = P::NAME,
            environment = %config.environment,
            user_id = %api.user_id,
            "MoMo client ready"
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            environment: config.environment,
            currency: config.currency.clone(),
            callback_url: config.callback_url.clone(),
            subscription_key,
            basic_key: api.basic_key(),
            user_id: api.user_id,
            tokens: TokenCache::new(),
            _product: PhantomData,
        })
    }

    /// The API user this client authenticates as.
    pub fn api_user(&self) -> &str {
        &self.user_id
    }

    pub fn environment(&self) -> TargetEnvironment {
        self.environment
    }

    /// Returns a Bearer token, fetching one if none is cached or it expired.
    pub async fn token(&self) -> Result<AccessToken, ClientError> {
        self.tokens.get_or_refresh(|| self.fetch_token()).await
    }

    /// Forgets the cached Bearer token.
    pub async fn invalidate_token(&self) {
        self.tokens.invalidate().await;
    }

    /// Gets the product account's balance.
    pub async fn balance(&self) -> Result<Balance, ClientError> {
        let path = P::balance_path();
        let resp = self.authorized_get(&path).await?.send().await?;
        http::read_json(resp).await
    }

    /// Gets the current status of a previously initiated transaction.
    pub async fn transaction_status(
        &self,
        reference: TransactionRef,
    ) -> Result<TransactionStatusResponse, ClientError> {
        let path = P::status_path(&reference);
        let resp = self.authorized_get(&path).await?.send().await?;
        let status: TransactionStatusResponse = http::read_json(resp).await?;
        tracing::debug!(product = P::NAME, %reference, status = %status.status, "Transaction status");
        Ok(status)
    }

    /// Initiates a request-to-pay or transfer, depending on `P`.
    pub(crate) async fn initiate(&self, order: &PaymentOrder) -> Result<PaymentReceipt, ClientError> {
        let reference = TransactionRef::new();
        let body = order.to_body(P::PARTY_ROLE, &self.currency);
        let bearer = self.bearer().await?;

        tracing::debug!(product = P::NAME, %reference, "POST {}", P::INITIATE_PATH);
        let mut req = self
            .http
            .post(self.url(P::INITIATE_PATH))
            .bearer_auth(bearer)
            .header(REFERENCE_ID, reference.to_string())
            .header(TARGET_ENVIRONMENT, self.environment.as_str())
            .header(SUBSCRIPTION_KEY, &self.subscription_key)
            .json(&body);
        if let Some(callback) = order.callback_url.as_ref().or(self.callback_url.as_ref()) {
            req = req.header(CALLBACK_URL, callback);
        }

        let resp = http::ensure_success(req.send().await?).await?;
        tracing::info!(
            product = P::NAME,
            %reference,
            external_id = %order.external_id,
            "Payment initiated"
        );

        Ok(PaymentReceipt {
            status_code: resp.status().as_u16(),
            transaction_ref: reference,
        })
    }

    async fn fetch_token(&self) -> Result<AccessToken, ClientError> {
        tracing::debug!(product = P::NAME, "POST {}", P::TOKEN_PATH);
        let resp = self
            .http
            .post(self.url(P::TOKEN_PATH))
            .header(reqwest::header::AUTHORIZATION, self.basic_key.header_value())
            .header(SUBSCRIPTION_KEY, &self.subscription_key)
            .send()
            .await?;
        let token: AccessToken = http::read_json(resp).await?;
        tracing::info!(
            product = P::NAME,
            expires_in = token.expires_in,
            "Fetched new access token"
        );
        Ok(token)
    }

    async fn bearer(&self) -> Result<String, ClientError> {
        Ok(self.token().await?.access_token)
    }

    async fn authorized_get(&self, path: &str) -> Result<RequestBuilder, ClientError> {
        let bearer = self.bearer().await?;
        tracing::debug!(product = P::NAME, "GET {}", path);
        Ok(self
            .http
            .get(self.url(path))
            .bearer_auth(bearer)
            .header(TARGET_ENVIRONMENT, self.environment.as_str())
            .header(SUBSCRIPTION_KEY, &self.subscription_key))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl CollectionClient {
    /// Asks the payer to approve a payment.
    ///
    /// Returns as soon as MoMo accepts the request; the outcome is read later
    /// with [`transaction_status`](Self::transaction_status).
    pub async fn request_to_pay(&self, order: &PaymentOrder) -> Result<PaymentReceipt, ClientError> {
        self.initiate(order).await
    }
}

impl DisbursementClient {
    /// Sends money to the payee.
    pub async fn transfer(&self, order: &PaymentOrder) -> Result<PaymentReceipt, ClientError> {
        self.initiate(order).await
    }
}

impl<P: Product> std::fmt::Debug for ProductClient<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductClient")
            .field("product", &P::NAME)
            .field("base_url", &self.base_url)
            .field("environment", &self.environment)
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}
