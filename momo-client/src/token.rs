//! Bearer token cache.

use std::future::Future;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use momo_types::AccessToken;

use crate::ClientError;

/// Tokens are refreshed this long before MoMo says they expire.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Upper bound on a cached token's lifetime, whatever `expires_in` claims.
const MAX_LIFETIME_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
struct CachedToken {
    token: AccessToken,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_SKEW_SECS) < self.expires_at
    }
}

/// Holds at most one Bearer token for a product client.
///
/// The lock is held while a refresh is in flight, so concurrent callers wait
/// for the single token request instead of racing their own.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token, calling `fetch` when there is none or it is
    /// about to expire.
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> Result<AccessToken, ClientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AccessToken, ClientError>>,
    {
        let mut slot = self.slot.lock().await;
        let now = Utc::now();
        if let Some(cached) = slot.as_ref()
            && cached.is_fresh(now)
        {
            return Ok(cached.token.clone());
        }

        let token = fetch().await?;
        let lifetime = i64::try_from(token.expires_in)
            .unwrap_or(MAX_LIFETIME_SECS)
            .min(MAX_LIFETIME_SECS);
        *slot = Some(CachedToken {
            token: token.clone(),
            expires_at: now + Duration::seconds(lifetime),
        });
        Ok(token)
    }

    /// Drops the cached token; the next call fetches a new one.
    pub async fn invalidate(&self) {
        self.slot.lock().await.take();
    }

    /// When the cached token expires, if one is held.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.slot.lock().await.as_ref().map(|c| c.expires_at)
    }
}
