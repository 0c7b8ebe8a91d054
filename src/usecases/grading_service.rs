//! AI grading endpoints: per-submission AI grade draft and rubric generation.

use crate::domain::{AiGradeResponse, ApiError, GenerateRubricRequest, GenerateRubricResponse};
use crate::usecases::api_client::{ApiClient, ApiRequest};
use std::sync::Arc;
use tracing::info;

pub struct GradingService {
    api: Arc<ApiClient>,
}

impl GradingService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Ask the server to draft rubric scores and feedback for a submission.
    /// The draft is stored on the submission; the final grade is still set by a teacher.
    pub async fn request_ai_grading(
        &self,
        token: &str,
        submission_id: &str,
    ) -> Result<AiGradeResponse, ApiError> {
        let request = ApiRequest::post(format!("/ai-grading/{}/ai-grade", submission_id))
            .operation("request AI grading");
        let response: AiGradeResponse = self.api.send_json(token, request).await?;
        info!(
            submission_id,
            criteria = response.rubric_scores.len(),
            total_score = ?response.total_score,
            "AI grading draft received"
        );
        Ok(response)
    }

    pub async fn generate_rubric(
        &self,
        token: &str,
        request: &GenerateRubricRequest,
    ) -> Result<GenerateRubricResponse, ApiError> {
        let api_request = ApiRequest::post("/ai-grading/generate-rubric")
            .json(request)?
            .operation("generate rubric");
        self.api.send_json(token, api_request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::MockTransport;
    use crate::ports::HttpMethod;
    use serde_json::json;

    fn setup() -> (Arc<MockTransport>, GradingService) {
        let mock = Arc::new(MockTransport::new());
        let api = Arc::new(ApiClient::new(mock.clone(), "http://localhost:8080/api/v1"));
        (mock, GradingService::new(api))
    }

    #[tokio::test]
    async fn test_request_ai_grading() {
        let (mock, svc) = setup();
        mock.push_json(
            200,
            json!({
                "rubric_scores": {"logic": 4.0, "accuracy": 3.5},
                "feedback_draft": "Logic: clear.\nAccuracy: minor slips.",
                "total_score": 75.0,
                "confidence": "medium"
            }),
        );

        let resp = svc.request_ai_grading("tok", "s1").await.unwrap();
        assert_eq!(resp.rubric_scores.len(), 2);
        assert_eq!(resp.total_score, Some(75.0));
        assert_eq!(resp.confidence.as_deref(), Some("medium"));

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url.path(), "/api/v1/ai-grading/s1/ai-grade");
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn test_ai_grading_not_enabled() {
        let (mock, svc) = setup();
        mock.push_json(400, json!({"detail": "AI grading not enabled for this assignment"}));

        let err = svc.request_ai_grading("tok", "s1").await.unwrap_err();
        assert_eq!(err.to_string(), "AI grading not enabled for this assignment");
    }

    #[tokio::test]
    async fn test_generate_rubric() {
        let (mock, svc) = setup();
        mock.push_json(
            200,
            json!({
                "explanation": "Weighted towards reasoning.",
                "rubric_json": {"criteria": [{"id": "logic", "title": "Logic", "weight": 0.6}]}
            }),
        );

        let req = GenerateRubricRequest {
            assignment_title: "Essay".to_string(),
            assignment_description: None,
            user_requirements: "focus on argument".to_string(),
            chat_history: vec![],
        };
        let resp = svc.generate_rubric("tok", &req).await.unwrap();
        assert_eq!(resp.criteria().len(), 1);

        let sent = mock.last_request().unwrap();
        assert_eq!(sent.url.path(), "/api/v1/ai-grading/generate-rubric");
        let body: serde_json::Value = serde_json::from_slice(sent.body.as_ref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"assignment_title": "Essay", "user_requirements": "focus on argument"})
        );
    }
}
