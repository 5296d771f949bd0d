//! In-process mock of the MoMo API.
//!
//! Every request is recorded so tests can assert on headers and bodies.
//! Routing is done by hand in a single fallback handler to keep the
//! recording in one place.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use momo_client::BasicAuthKey;
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// A request as the mock saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl Recorded {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

#[derive(Default)]
struct Inner {
    requests: Vec<Recorded>,
    /// user id -> (callback host, api key)
    api_users: HashMap<String, (String, Option<String>)>,
    issued_tokens: Vec<String>,
    /// Statuses handed out by status lookups, last one repeats
    status_script: VecDeque<String>,
    /// reference -> initiate body
    initiated: HashMap<String, Value>,
    reject_initiate: Option<(StatusCode, String)>,
}

#[derive(Clone, Default)]
pub struct MockMomo {
    inner: Arc<Mutex<Inner>>,
}

impl MockMomo {
    /// Starts the mock on an ephemeral port and returns its base URL.
    pub async fn start() -> (Self, String) {
        let mock = MockMomo::default();
        let app: Router = Router::new().fallback(handle).with_state(mock.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (mock, format!("http://{addr}"))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn requests_to(&self, path_prefix: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.path.starts_with(path_prefix))
            .collect()
    }

    pub fn tokens_issued(&self) -> usize {
        self.inner.lock().unwrap().issued_tokens.len()
    }

    /// Registers an API user as if it had been created out of band.
    pub fn add_api_user(&self, user_id: &str, api_key: &str) {
        self.inner.lock().unwrap().api_users.insert(
            user_id.to_string(),
            ("merchant.example.com".to_string(), Some(api_key.to_string())),
        );
    }

    pub fn script_statuses(&self, statuses: &[&str]) {
        self.inner.lock().unwrap().status_script = statuses.iter().map(|s| s.to_string()).collect();
    }

    pub fn reject_initiate(&self, status: u16, body: &str) {
        self.inner.lock().unwrap().reject_initiate =
            Some((StatusCode::from_u16(status).unwrap(), body.to_string()));
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "code": "RESOURCE_NOT_FOUND",
            "message": "Requested resource was not found."
        })),
    )
        .into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "login_failed", "message": "Access denied due to invalid credentials"})),
    )
        .into_response()
}

async fn handle(
    State(mock): State<MockMomo>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let json_body: Option<Value> = serde_json::from_slice(&body).ok();

    let mut inner = mock.inner.lock().unwrap();
    inner.requests.push(Recorded {
        method: method.clone(),
        path: path.clone(),
        headers: headers.clone(),
        body: json_body.clone(),
    });

    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok()).map(String::from);
    if header("Ocp-Apim-Subscription-Key").is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"statusCode": 401, "message": "Access denied due to missing subscription key."})),
        )
            .into_response();
    }

    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
    match (method, segments.as_slice()) {
        (Method::POST, ["v1_0", "apiuser"]) => {
            let Some(user_id) = header("X-Reference-Id") else {
                return StatusCode::BAD_REQUEST.into_response();
            };
            let host = json_body
                .as_ref()
                .and_then(|b| b["providerCallbackHost"].as_str())
                .unwrap_or_default()
                .to_string();
            if inner.api_users.contains_key(&user_id) {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({"code": "RESOURCE_ALREADY_EXIST", "message": "Duplicated reference id. Creation of resource failed."})),
                )
                    .into_response();
            }
            inner.api_users.insert(user_id, (host, None));
            StatusCode::CREATED.into_response()
        }

        (Method::POST, ["v1_0", "apiuser", user_id, "apikey"]) => {
            let Some(user) = inner.api_users.get_mut(*user_id) else {
                return not_found();
            };
            let key = format!("key-{}", user_id.replace('-', ""));
            user.1 = Some(key.clone());
            (StatusCode::CREATED, Json(json!({"apiKey": key}))).into_response()
        }

        (Method::GET, ["v1_0", "apiuser", user_id]) => match inner.api_users.get(*user_id) {
            Some((host, _)) => Json(json!({
                "providerCallbackHost": host,
                "targetEnvironment": "sandbox"
            }))
            .into_response(),
            None => not_found(),
        },

        (Method::POST, [_product, "token"]) => {
            let authorization = header("Authorization").unwrap_or_default();
            let known = inner.api_users.iter().any(|(user, (_, key))| {
                key.as_deref()
                    .is_some_and(|k| BasicAuthKey::new(user, k).header_value() == authorization)
            });
            if !known {
                return unauthorized();
            }
            let token = format!("token-{}", inner.issued_tokens.len() + 1);
            inner.issued_tokens.push(token.clone());
            Json(json!({
                "access_token": token,
                "token_type": "access_token",
                "expires_in": 3600
            }))
            .into_response()
        }

        (method, [product, "v1_0", rest @ ..]) => {
            let authorization = header("Authorization").unwrap_or_default();
            let bearer_ok = authorization
                .strip_prefix("Bearer ")
                .is_some_and(|t| inner.issued_tokens.iter().any(|issued| issued == t));
            if !bearer_ok {
                return unauthorized();
            }
            if header("X-Target-Environment").is_none() {
                return StatusCode::BAD_REQUEST.into_response();
            }

            match (method, *product, rest) {
                (Method::GET, _, ["account", "balance"]) => Json(json!({
                    "availableBalance": "1000",
                    "currency": "EUR"
                }))
                .into_response(),

                (Method::POST, "collection", ["requesttopay"])
                | (Method::POST, "disbursement", ["transfer"]) => {
                    if let Some((status, body)) = inner.reject_initiate.clone() {
                        return (status, body).into_response();
                    }
                    let Some(reference) = header("X-Reference-Id") else {
                        return StatusCode::BAD_REQUEST.into_response();
                    };
                    if inner.initiated.contains_key(&reference) {
                        return StatusCode::CONFLICT.into_response();
                    }
                    inner
                        .initiated
                        .insert(reference, json_body.unwrap_or(Value::Null));
                    StatusCode::ACCEPTED.into_response()
                }

                (Method::GET, "collection", ["requesttopay", reference])
                | (Method::GET, "disbursement", ["transfer", reference]) => {
                    let Some(initiated) = inner.initiated.get(*reference).cloned() else {
                        return not_found();
                    };
                    let status = if inner.status_script.len() > 1 {
                        inner.status_script.pop_front().unwrap_or_default()
                    } else {
                        inner
                            .status_script
                            .front()
                            .cloned()
                            .unwrap_or_else(|| "PENDING".to_string())
                    };

                    let mut resp = json!({
                        "amount": initiated["amount"],
                        "currency": initiated["currency"],
                        "externalId": initiated["externalId"],
                        "payerMessage": initiated["payerMessage"],
                        "payeeNote": initiated["payeeNote"],
                        "status": status,
                    });
                    for party in ["payer", "payee"] {
                        if !initiated[party].is_null() {
                            resp[party] = initiated[party].clone();
                        }
                    }
                    match status.as_str() {
                        "SUCCESSFUL" => resp["financialTransactionId"] = json!("1234567890"),
                        "FAILED" => resp["reason"] = json!("APPROVAL_REJECTED"),
                        _ => {}
                    }
                    Json(resp).into_response()
                }

                _ => not_found(),
            }
        }

        _ => not_found(),
    }
}
