//! Nightly learner-profile analysis and long-term memory endpoints.

use crate::domain::{
    ApiError, LatestProfile, MemoryList, NightlyAnalysisRequest, ProfileAnalysisResult,
};
use crate::usecases::api_client::{ApiClient, ApiRequest};
use std::sync::Arc;

pub struct AnalysisService {
    api: Arc<ApiClient>,
}

impl AnalysisService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Trigger profile analysis for one user and day (admin only).
    pub async fn run_nightly_analysis(
        &self,
        token: &str,
        request: &NightlyAnalysisRequest,
    ) -> Result<ProfileAnalysisResult, ApiError> {
        let api_request = ApiRequest::post("/nightly-analysis/run")
            .json(request)?
            .operation("run nightly analysis");
        self.api.send_json(token, api_request).await
    }

    /// Most recent learner profile. 404 when none has been generated yet.
    pub async fn get_latest_profile(
        &self,
        token: &str,
        user_id: &str,
    ) -> Result<LatestProfile, ApiError> {
        let request = ApiRequest::get(format!("/nightly-analysis/profile/latest/{}", user_id))
            .operation("get latest profile");
        self.api.send_json(token, request).await
    }

    /// Memories of a user. Without `namespace` the server lists the user's profiles.
    pub async fn get_user_memories(
        &self,
        token: &str,
        user_id: &str,
        namespace: Option<&str>,
        skip: u32,
        limit: u32,
    ) -> Result<MemoryList, ApiError> {
        let request = ApiRequest::get(format!("/nightly-analysis/memories/{}", user_id))
            .query_opt("namespace", namespace)
            .query("skip", skip)
            .query("limit", limit)
            .operation("get user memories");
        self.api.send_json(token, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::MockTransport;
    use serde_json::json;

    fn setup() -> (Arc<MockTransport>, AnalysisService) {
        let mock = Arc::new(MockTransport::new());
        let api = Arc::new(ApiClient::new(mock.clone(), "http://localhost:8080/api/v1"));
        (mock, AnalysisService::new(api))
    }

    #[tokio::test]
    async fn test_run_nightly_analysis() {
        let (mock, svc) = setup();
        mock.push_json(
            200,
            json!({
                "user_id": "u1",
                "date": "2025-01-30",
                "total_turns": 14,
                "summary": "Practised fractions.",
                "weak_skills": ["fractions"],
                "strong_skills": ["geometry"],
                "evidence": [{"turn_id": "t3"}],
                "recommendations": ["More fraction drills"],
                "profile_memory_id": "m1"
            }),
        );

        let req = NightlyAnalysisRequest {
            user_id: "u1".to_string(),
            date: None,
        };
        let result = svc.run_nightly_analysis("tok", &req).await.unwrap();
        assert_eq!(result.weak_skills, ["fractions"]);

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.url.path(), "/api/v1/nightly-analysis/run");
        assert_eq!(sent.body.as_deref(), Some(br#"{"user_id":"u1"}"#.as_slice()));
    }

    #[tokio::test]
    async fn test_latest_profile_missing() {
        let (mock, svc) = setup();
        mock.push_json(404, json!({"detail": "No profile found"}));

        let err = svc.get_latest_profile("tok", "u1").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            mock.last_request().unwrap().url.path(),
            "/api/v1/nightly-analysis/profile/latest/u1"
        );
    }

    #[tokio::test]
    async fn test_user_memories_query() {
        let (mock, svc) = setup();
        let body = json!({"user_id": "u1", "memories": [], "total": 0});
        mock.push_json(200, body.clone()).push_json(200, body);

        svc.get_user_memories("tok", "u1", None, 0, 50).await.unwrap();
        svc.get_user_memories("tok", "u1", Some("skills:u1"), 10, 5)
            .await
            .unwrap();

        let reqs = mock.requests();
        assert_eq!(reqs[0].url.query(), Some("skip=0&limit=50"));
        assert_eq!(
            reqs[1].url.query(),
            Some("namespace=skills%3Au1&skip=10&limit=5")
        );
    }
}
