//! reqwest adapter. Implements HttpTransport over a pooled `reqwest::Client`.

use crate::domain::ApiError;
use crate::ports::{HttpMethod, HttpTransport, OutboundRequest, RawResponse};
use reqwest::{Client, Method};
use std::collections::HashMap;
use tracing::debug;

/// Network transport. One `send()` per call; no timeout or retry is configured.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured client (proxy settings, TLS roots, ...).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Delete => Method::DELETE,
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(format!("reading response body: {}", e)))?
            .to_vec();

        debug!(status, body_len = body.len(), "response received");

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
