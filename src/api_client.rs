use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::error_chain_fmt;

/// Shown when an error response carries no usable `message`.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// HTTP/JSON client for the form API.
/// Cloning is cheap, clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is trimmed and stripped of trailing slashes. It is not parsed here,
    /// an unusable URL fails each request with `Error::UrlParsing` instead.
    /// With `timeout` set to `None` requests wait until the server answers.
    pub fn new<S: AsRef<str>>(base_url: S, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/').to_string();

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        Ok(ApiClient {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base_url}/{route}`. Plain string joining, so a stage path on the base
    /// (e.g. `/prod`) is kept.
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}/{}", self.base_url, route.trim_start_matches('/'))
    }

    /// POSTs `body` as JSON to `route` and returns the parsed JSON response.
    /// Non-2xx responses become `Error::Status` with the `message` from the error body,
    /// or `UNKNOWN_ERROR_MESSAGE` when there is none.
    pub async fn post_json<B>(&self, route: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = reqwest::Url::parse(&self.endpoint(route))
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        tracing::debug!("{:<12} - POST {url}", "post_json");

        let resp = self.http_client.post(url).json(body).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let message = resp
                .bytes()
                .await
                .ok()
                .and_then(|bytes| serde_json::from_slice::<ErrorBody>(&bytes).ok())
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string());

            return Err(Error::Status { status, message });
        }

        let bytes = resp.bytes().await?;
        let payload = serde_json::from_slice(&bytes)?;

        Ok(payload)
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Value,
}

impl ErrorBody {
    /// Scalars are rendered as text. Empty strings, `0`, `false` and `null` count as no message.
    fn into_message(self) -> Option<String> {
        match self.message {
            Value::String(message) if !message.is_empty() => Some(message),
            Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error)]
pub enum Error {
    #[error("failed to parse url: {0}")]
    UrlParsing(String),
    #[error("server responded with {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("malformed response body")]
    Body(#[from] serde_json::Error),
    #[error("request failed")]
    Reqwest(#[from] reqwest::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
