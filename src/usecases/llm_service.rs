//! LLM proxy endpoints. Every proxied message is recorded server-side as session turns.

use crate::domain::{
    ApiError, ProxyMessageRequest, ProxyMessageResponse, SessionList, SessionTurns,
};
use crate::usecases::api_client::{ApiClient, ApiRequest};
use std::sync::Arc;
use tracing::info;

/// Default page size of `GET /llm/sessions`.
pub const DEFAULT_SESSION_LIMIT: u32 = 50;

pub struct LlmService {
    api: Arc<ApiClient>,
}

impl LlmService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Send one message through the proxy. Opens a session unless `meta.session_id` is set.
    pub async fn send_proxy_message(
        &self,
        token: &str,
        request: &ProxyMessageRequest,
    ) -> Result<ProxyMessageResponse, ApiError> {
        let api_request = ApiRequest::post("/llm/proxy")
            .json(request)?
            .operation("send proxy message");
        let response: ProxyMessageResponse = self.api.send_json(token, api_request).await?;
        info!(
            session_id = %response.session_id,
            turn_id = %response.turn_id,
            model = %response.model,
            "proxy message answered"
        );
        Ok(response)
    }

    /// Caller's sessions, paginated by `skip`/`limit`.
    pub async fn get_user_sessions(
        &self,
        token: &str,
        skip: u32,
        limit: u32,
    ) -> Result<SessionList, ApiError> {
        let request = ApiRequest::get("/llm/sessions")
            .query("skip", skip)
            .query("limit", limit)
            .operation("get sessions");
        self.api.send_json(token, request).await
    }

    pub async fn get_session_turns(
        &self,
        token: &str,
        session_id: &str,
    ) -> Result<SessionTurns, ApiError> {
        let request = ApiRequest::get(format!("/llm/sessions/{}/turns", session_id))
            .operation("get session turns");
        self.api.send_json(token, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::MockTransport;
    use crate::domain::{SessionMode, TurnRole};
    use serde_json::json;

    fn setup() -> (Arc<MockTransport>, LlmService) {
        let mock = Arc::new(MockTransport::new());
        let api = Arc::new(ApiClient::new(mock.clone(), "http://localhost:8080/api/v1"));
        (mock, LlmService::new(api))
    }

    fn session_json() -> serde_json::Value {
        json!({
            "id": "sess-1",
            "user_id": "u1",
            "assignment_id": null,
            "mode": "chat",
            "started_at": 1_700_000_000,
            "ended_at": null,
            "policy_snapshot": {"model": "gpt-5", "mode": "chat"},
            "meta": {}
        })
    }

    #[tokio::test]
    async fn test_send_proxy_message() {
        let (mock, svc) = setup();
        mock.push_json(
            200,
            json!({
                "turn_id": "t2",
                "session_id": "sess-1",
                "content": "Here is a hint",
                "model": "gpt-5",
                "meta": {"session_id": "sess-1", "mode": "homework", "user_turn_id": "t1"}
            }),
        );

        let req = ProxyMessageRequest::new("help with question 3").with_mode(SessionMode::Homework);
        let resp = svc.send_proxy_message("tok", &req).await.unwrap();
        assert_eq!(resp.session_id, "sess-1");
        assert_eq!(resp.meta["user_turn_id"], "t1");

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.url.path(), "/api/v1/llm/proxy");
        assert_eq!(sent.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_slice(sent.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, json!({"message": "help with question 3", "mode": "homework"}));
    }

    #[tokio::test]
    async fn test_proxy_error_detail() {
        let (mock, svc) = setup();
        mock.push_json(403, json!({"detail": "Unauthorized session access"}));

        let err = svc
            .send_proxy_message("tok", &ProxyMessageRequest::new("hi").in_session("other"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized session access");
    }

    #[tokio::test]
    async fn test_get_user_sessions_pagination() {
        let (mock, svc) = setup();
        mock.push_json(200, json!({"sessions": [session_json()]}));

        let list = svc
            .get_user_sessions("tok", 0, DEFAULT_SESSION_LIMIT)
            .await
            .unwrap();
        assert_eq!(list.sessions.len(), 1);
        assert!(list.sessions[0].is_open());

        let req = mock.last_request().unwrap();
        assert_eq!(req.url.path(), "/api/v1/llm/sessions");
        assert_eq!(req.url.query(), Some("skip=0&limit=50"));
        assert_eq!(req.header("content-type"), None);
    }

    #[tokio::test]
    async fn test_get_session_turns() {
        let (mock, svc) = setup();
        mock.push_json(
            200,
            json!({
                "session": session_json(),
                "turns": [{
                    "id": "t1", "session_id": "sess-1", "role": "user", "content": "hi",
                    "tool_calls": [], "model": null, "tokens_in": 2, "tokens_out": 0,
                    "cost": 0, "created_at": 1_700_000_001, "meta": {}
                }]
            }),
        );

        let st = svc.get_session_turns("tok", "sess-1").await.unwrap();
        assert_eq!(st.turns[0].role, TurnRole::User);
        assert_eq!(
            mock.last_request().unwrap().url.path(),
            "/api/v1/llm/sessions/sess-1/turns"
        );
    }

    #[tokio::test]
    async fn test_session_not_found() {
        let (mock, svc) = setup();
        mock.push_json(404, json!({"detail": "Session not found"}));

        let err = svc.get_session_turns("tok", "nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Session not found");
    }
}
