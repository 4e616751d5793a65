//! HTTP client for the fleet REST backend.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response, StatusCode, multipart::Form};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::AccessToken;
use crate::domain::pagination::{Page, PageRequest};
use crate::error::AppError;

/// Errors raised while talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend responded with {status}")]
    Status { status: StatusCode, body: Value },

    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

impl BackendError {
    /// Transport failures and 5xx responses are worth retrying for idempotent calls.
    pub fn is_retryable(&self) -> bool {
        match self {
            BackendError::Transport(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            BackendError::Status { status, .. } => status.is_server_error(),
            BackendError::Url(_) => false,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            BackendError::Transport(e) => e.status(),
            BackendError::Url(_) => None,
        }
    }
}

/// Pulls a human-readable message out of a backend error body.
///
/// Understands `{"message": …}`, `{"error": "…"}` and `{"error": {"message": …}}`.
fn backend_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .or_else(|| body.pointer("/error/message").and_then(Value::as_str))
        .map(str::to_string)
}

/// Maps a non-success backend status to the matching [`AppError`].
pub fn map_status(status: StatusCode, body: Value) -> AppError {
    let message = backend_message(&body);
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => AppError::bad_request(
            message.unwrap_or_else(|| "Request rejected by backend".to_string()),
            body,
        ),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::unauthorized(
            message.unwrap_or_else(|| "Session expired or not permitted".to_string()),
            json!({ "status": status.as_u16() }),
        ),
        StatusCode::NOT_FOUND => {
            AppError::not_found(message.unwrap_or_else(|| "Not found".to_string()), body)
        }
        StatusCode::CONFLICT => {
            AppError::conflict(message.unwrap_or_else(|| "Conflict".to_string()), body)
        }
        _ => AppError::upstream(
            "Backend error",
            json!({ "status": status.as_u16(), "message": message }),
        ),
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Status { status, body } => map_status(status, body),
            BackendError::Transport(e) => {
                warn!(error = %e, "Backend unreachable");
                AppError::upstream("Backend unreachable", json!({ "timeout": e.is_timeout() }))
            }
            BackendError::Url(e) => AppError::internal("Invalid backend URL", json!({ "error": e.to_string() })),
        }
    }
}

/// Paginated list envelope returned by the backend: `{"items": [...], "total": n}`.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> ListEnvelope<T> {
    pub fn into_page(self, request: PageRequest) -> Page<T> {
        Page::new(self.items, self.total, request)
    }
}

/// Query parameters sent with list requests.
pub type QueryParams = Vec<(&'static str, String)>;

/// Standard `page`/`page_size` query parameters.
pub fn page_params(request: PageRequest) -> QueryParams {
    vec![
        ("page", request.page.to_string()),
        ("page_size", request.page_size.to_string()),
    ]
}

/// Thin wrapper around `reqwest::Client` bound to the backend base URL.
///
/// Every call forwards the caller's bearer token. GET requests are retried
/// with exponential backoff on transport errors and 5xx responses; writes are
/// sent once.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    retries: usize,
}

impl BackendClient {
    /// Builds a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or the TLS backend fails
    /// to initialize.
    pub fn new(base_url: &str, timeout: Duration, retries: usize) -> Result<Self, BackendError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("fleet-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            retries,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a backend path (with or without leading slash) against the base URL.
    pub fn url(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(
        &self,
        method: Method,
        token: Option<&AccessToken>,
        path: &str,
    ) -> Result<RequestBuilder, BackendError> {
        let url = self.url(path)?;
        debug!(%method, %url, "Backend request");
        let builder = self.http.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        })
    }

    fn retry_strategy(&self) -> impl Iterator<Item = Duration> + use<> {
        ExponentialBackoff::from_millis(2)
            .factor(50)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(self.retries)
    }

    /// GET `path` and decode the JSON body, retrying transient failures.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
        query: &QueryParams,
    ) -> Result<T, BackendError> {
        RetryIf::start(
            self.retry_strategy(),
            move || self.get_once(token, path, query),
            BackendError::is_retryable,
        )
        .await
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
        query: &QueryParams,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::GET, Some(token), path)?
            .query(query)
            .send()
            .await?;
        decode(response).await
    }

    /// Like [`BackendClient::get_json`] but maps 404 to `None`.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
    ) -> Result<Option<T>, BackendError> {
        match self.get_json(token, path, &Vec::new()).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Sends a JSON body with `method` and decodes the JSON response.
    pub async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        token: Option<&AccessToken>,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self.request(method, token, path)?.json(body).send().await?;
        decode(response).await
    }

    /// POSTs without a body, ignoring the response body.
    pub async fn post_empty(&self, token: &AccessToken, path: &str) -> Result<(), BackendError> {
        let response = self.request(Method::POST, Some(token), path)?.send().await?;
        check(response).await.map(|_| ())
    }

    /// DELETEs `path`; returns `false` if the backend reports 404.
    pub async fn delete(&self, token: &AccessToken, path: &str) -> Result<bool, BackendError> {
        let response = self.request(Method::DELETE, Some(token), path)?.send().await?;
        match check(response).await {
            Ok(_) => Ok(true),
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// POSTs a multipart form (file upload) and decodes the JSON response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
        form: Form,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::POST, Some(token), path)?
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    /// Calls the unauthenticated `GET /health` endpoint.
    pub async fn ping(&self) -> bool {
        let request = match self.request(Method::GET, None, "health") {
            Ok(request) => request,
            Err(_) => return false,
        };
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Backend health check failed");
                false
            }
        }
    }
}

async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.json::<Value>().await.unwrap_or(Value::Null);
    warn!(status = status.as_u16(), "Backend returned error status");
    Err(BackendError::Status { status, body })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let response = check(response).await?;
    Ok(response.json::<T>().await?)
}
