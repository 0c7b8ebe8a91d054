//! Scripted transport for testing without network calls.
//!
//! Replays queued responses in order and records every request it receives.

use crate::domain::ApiError;
use crate::ports::{HttpTransport, OutboundRequest, RawResponse};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::info;

/// Mock transport.
///
/// Responses are consumed FIFO; an exhausted queue yields a transport error.
/// Simulates network latency with an optional delay.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<RawResponse, ApiError>>>,
    requests: Mutex<Vec<OutboundRequest>>,
    delay_ms: u64,
}

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that sleeps before answering each request.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::default()
        }
    }

    pub fn push_response(&self, response: RawResponse) -> &Self {
        locked(&self.responses).push_back(Ok(response));
        self
    }

    /// Queue a JSON response with the given status.
    pub fn push_json(&self, status: u16, body: serde_json::Value) -> &Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        self.push_response(RawResponse {
            status,
            headers,
            body: body.to_string().into_bytes(),
        })
    }

    /// Queue a non-JSON response (e.g. a CSV export or an HTML error page).
    pub fn push_raw(&self, status: u16, content_type: &str, body: impl Into<Vec<u8>>) -> &Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), content_type.to_string());
        self.push_response(RawResponse {
            status,
            headers,
            body: body.into(),
        })
    }

    /// Queue a connection-level failure.
    pub fn push_error(&self, error: ApiError) -> &Self {
        locked(&self.responses).push_back(Err(error));
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<OutboundRequest> {
        locked(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<OutboundRequest> {
        locked(&self.requests).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        locked(&self.requests).len()
    }
}

#[async_trait::async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: OutboundRequest) -> Result<RawResponse, ApiError> {
        info!(method = %request.method, url = %request.url, "[MOCK] recording request");
        locked(&self.requests).push(request);

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        locked(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response left".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HttpMethod;
    use reqwest::Url;

    fn get(path: &str) -> OutboundRequest {
        OutboundRequest {
            method: HttpMethod::Get,
            url: Url::parse(&format!("http://test{}", path)).unwrap(),
            headers: vec![],
            body: None,
        }
    }

    #[tokio::test]
    async fn test_mock_replays_in_order_and_records() {
        let mock = MockTransport::with_delay(5);
        mock.push_json(200, serde_json::json!([1]))
            .push_raw(500, "text/plain", "boom");

        let first = mock.execute(get("/one")).await.unwrap();
        let second = mock.execute(get("/two")).await.unwrap();
        let third = mock.execute(get("/three")).await;

        assert_eq!(first.body, b"[1]");
        assert_eq!(second.status, 500);
        assert!(matches!(third, Err(ApiError::Transport(_))));
        assert_eq!(mock.request_count(), 3);
        assert_eq!(mock.last_request().unwrap().url.path(), "/three");
    }
}
