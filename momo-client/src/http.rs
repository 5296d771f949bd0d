//! Header names and response handling shared by every endpoint.

use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::ClientError;

pub(crate) const SUBSCRIPTION_KEY: &str = "Ocp-Apim-Subscription-Key";
pub(crate) const REFERENCE_ID: &str = "X-Reference-Id";
pub(crate) const TARGET_ENVIRONMENT: &str = "X-Target-Environment";
pub(crate) const CALLBACK_URL: &str = "X-Callback-Url";

/// Turns a non-2xx response into [`ClientError::Api`].
///
/// MoMo error bodies look like `{"code": "...", "message": "..."}`; both
/// fields are kept when present, otherwise the raw body text is the message.
pub(crate) async fn ensure_success(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let (code, message) = parse_error_body(body);

    tracing::warn!(
        status = status.as_u16(),
        code = code.as_deref().unwrap_or("-"),
        %message,
        "MoMo API returned an error"
    );
    Err(ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    })
}

fn parse_error_body(body: String) -> (Option<String>, String) {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) else {
        return (None, body);
    };
    let field = |name: &str| json.get(name).and_then(|v| v.as_str()).map(String::from);
    let code = field("code");
    let message = field("message").unwrap_or(body);
    (code, message)
}

/// Checks the status and parses the JSON body.
pub(crate) async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let resp = ensure_success(resp).await?;
    let body = resp.text().await?;
    Ok(serde_json::from_str(&body)?)
}
