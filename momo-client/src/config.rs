//! Configuration loading from environment.

use std::collections::HashMap;
use std::env;
use std::fmt;

use momo_types::{CollectionProduct, Currency, DisbursementProduct, Product, TargetEnvironment};

use crate::ClientError;

/// Root of the developer sandbox.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.momodeveloper.mtn.com";

/// Credentials for one product line.
///
/// Every field is optional here; what is actually required depends on the
/// environment and is checked when a client for the product is built.
#[derive(Clone, Default)]
pub struct ProductCredentials {
    pub subscription_key: Option<String>,
    pub user_id: Option<String>,
    pub api_secret: Option<String>,
}

impl fmt::Debug for ProductCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("ProductCredentials")
            .field("subscription_key", &redact(&self.subscription_key))
            .field("user_id", &self.user_id)
            .field("api_secret", &redact(&self.api_secret))
            .finish()
    }
}

impl ProductCredentials {
    fn from_vars<P: Product>(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let var = |suffix: &str| lookup(&format!("{}_{}", P::ENV_PREFIX, suffix));
        Self {
            subscription_key: var("PRIMARY_KEY"),
            user_id: var("USER_ID"),
            api_secret: var("API_SECRET"),
        }
    }
}

/// Client configuration shared by all product clients.
#[derive(Debug, Clone)]
pub struct MomoConfig {
    pub environment: TargetEnvironment,
    pub base_url: String,
    pub callback_url: Option<String>,
    pub currency: Currency,
    products: HashMap<&'static str, ProductCredentials>,
}

impl Default for MomoConfig {
    fn default() -> Self {
        Self {
            environment: TargetEnvironment::Sandbox,
            base_url: SANDBOX_BASE_URL.to_string(),
            callback_url: None,
            currency: Currency::default(),
            products: HashMap::new(),
        }
    }
}

impl MomoConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match lookup("MTN_ENVIRONMENT") {
            Some(raw) => raw.parse()?,
            None => TargetEnvironment::Sandbox,
        };
        let currency = match lookup("CURRENCY") {
            Some(raw) => Currency::new(&raw)?,
            None => Currency::default(),
        };
        let base_url = lookup("BASE_URL").unwrap_or_else(|| SANDBOX_BASE_URL.to_string());

        let config = Self {
            environment,
            currency,
            callback_url: lookup("CALLBACK_URL"),
            ..Self::default()
        }
        .with_base_url(base_url)
        .with_credentials::<CollectionProduct>(ProductCredentials::from_vars::<CollectionProduct>(
            &lookup,
        ))
        .with_credentials::<DisbursementProduct>(ProductCredentials::from_vars::<
            DisbursementProduct,
        >(&lookup));

        Ok(config)
    }

    pub fn with_environment(mut self, environment: TargetEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets the API root; a trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_credentials<P: Product>(mut self, credentials: ProductCredentials) -> Self {
        self.products.insert(P::ENV_PREFIX, credentials);
        self
    }

    /// Credentials configured for `P`, empty if none were given.
    pub fn credentials<P: Product>(&self) -> ProductCredentials {
        self.products
            .get(P::ENV_PREFIX)
            .cloned()
            .unwrap_or_default()
    }

    /// Host part of the callback URL, as MoMo expects in
    /// `providerCallbackHost`.
    pub fn provider_callback_host(&self) -> Result<String, ClientError> {
        let raw = self.callback_url.as_deref().ok_or_else(|| {
            ClientError::Config("CALLBACK_URL is required to provision an API user".into())
        })?;
        let url = url::Url::parse(raw)
            .map_err(|e| ClientError::Config(format!("Invalid CALLBACK_URL {raw}: {e}")))?;
        url.host_str()
            .map(String::from)
            .ok_or_else(|| ClientError::Config(format!("CALLBACK_URL {raw} has no host")))
    }
}
