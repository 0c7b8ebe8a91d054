//! Request wrapper shared by every domain service.
//!
//! - Builds `<base_url><path>?<query>` and attaches bearer/JSON headers
//! - Issues exactly one request through the HttpTransport port
//! - Non-2xx responses become `ApiError::Http` carrying the server `detail`

use crate::domain::ApiError;
use crate::ports::{HttpMethod, HttpTransport, OutboundRequest, RawResponse};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// One API call: method, path relative to the base URL, query pairs, optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: HttpMethod,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    operation: Option<&'static str>,
}

impl ApiRequest {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            operation: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Adds the pair only when `value` is `Some`.
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Human label used in the fallback message ("Failed to <operation>").
    pub fn operation(mut self, label: &'static str) -> Self {
        self.operation = Some(label);
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn fallback_message(&self, status: u16) -> String {
        match self.operation {
            Some(label) => format!("Failed to {}", label),
            None => format!("{} {} failed with status {}", self.method, self.path, status),
        }
    }
}

/// Pulls the `detail` field out of an error body.
///
/// String details are returned as-is; structured ones (validation error lists)
/// are rendered as compact JSON. Non-JSON bodies and blank details yield `None`.
pub fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// HTTP request wrapper. Stateless apart from the injected base URL; safe to share via `Arc`.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
}

impl ApiClient {
    /// Create a client.
    ///
    /// # Arguments
    /// * `transport` - HttpTransport implementation (reqwest, mock)
    /// * `base_url` - API root, e.g. "http://localhost:8080/api/v1" (trailing slash tolerated)
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_url(&self, request: &ApiRequest) -> Result<Url, ApiError> {
        let joined = format!("{}{}", self.base_url, request.path);
        let mut url =
            Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", joined, e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }

    fn outbound(&self, token: &str, request: &ApiRequest) -> Result<OutboundRequest, ApiError> {
        let mut headers = vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), format!("Bearer {}", token)),
        ];
        if request.body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        Ok(OutboundRequest {
            method: request.method,
            url: self.build_url(request)?,
            headers,
            body: request.body.clone(),
        })
    }

    /// Perform the call and return the raw 2xx response (used for binary endpoints).
    pub async fn send(&self, token: &str, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let outbound = self.outbound(token, &request)?;
        debug!(method = %request.method, url = %outbound.url, "sending API request");

        let response = self.transport.execute(outbound).await.map_err(|e| {
            warn!(method = %request.method, path = %request.path, error = %e, "API request failed");
            e
        })?;

        if !response.is_success() {
            let detail = extract_detail(&response.body)
                .unwrap_or_else(|| request.fallback_message(response.status));
            warn!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                detail = %detail,
                "API returned error"
            );
            return Err(ApiError::Http {
                status: response.status,
                detail,
            });
        }

        Ok(response)
    }

    /// Perform the call and decode the 2xx JSON body into `T`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        token: &str,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let path = request.path.clone();
        let response = self.send(token, request).await?;
        serde_json::from_slice(&response.body).map_err(|e| {
            warn!(path = %path, error = %e, "response did not match expected shape");
            ApiError::Decode(e.to_string())
        })
    }
}
