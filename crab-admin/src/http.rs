//! HTTP client for network-based API calls
//!
//! [`HttpClient`] is the request-dispatch seam: the log and statistics
//! clients only ever see decoded JSON values or a [`ClientError`]. The
//! session layer (token issue/refresh) sits outside this crate and hands a
//! bearer token in through [`ClientConfig`].

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ClientConfig, ClientError, ClientResult};

/// Request dispatch used by [`LogClient`](crate::LogClient) and
/// [`StatsClient`](crate::StatsClient)
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// `GET {base}/{path}?{query}`, returning the parsed JSON body.
    ///
    /// One attempt per call; no retry.
    async fn get_json(&self, path: &str, query: &[(&'static str, String)]) -> ClientResult<Value>;
}

/// Decode a JSON value into a response schema
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    serde_json::from_value(value).map_err(Into::into)
}

/// Error body shapes the backend uses: `{ "message": .. }` or `{ "error": .. }`
#[derive(serde::Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout_duration())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Replace the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    async fn handle_response(&self, response: reqwest::Response) -> ClientResult<Value> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                tracing::warn!("Session rejected by server (401)");
            }
            return Err(ClientError::Http {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(Into::into)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get_json(&self, path: &str, query: &[(&'static str, String)]) -> ClientResult<Value> {
        let url = self.url(path);
        tracing::debug!(%url, ?query, "GET");

        let mut req = self.client.get(&url).query(query);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = req
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        self.handle_response(response).await
    }
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(api_err) = serde_json::from_slice::<ApiErrorBody>(body)
        && let Some(message) = api_err.message.or(api_err.error)
    {
        return message;
    }
    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    } else {
        text
    }
}
