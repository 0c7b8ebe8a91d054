//! Teacher AI endpoints: questions about a student, visible student list.

use crate::domain::{ApiError, StudentInfo, TeacherAiRequest, TeacherAiResponse};
use crate::usecases::api_client::{ApiClient, ApiRequest};
use std::sync::Arc;

pub struct TeacherService {
    api: Arc<ApiClient>,
}

impl TeacherService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn ask_teacher_ai(
        &self,
        token: &str,
        request: &TeacherAiRequest,
    ) -> Result<TeacherAiResponse, ApiError> {
        let api_request = ApiRequest::post("/teacher/ask-ai")
            .json(request)?
            .operation("ask teacher AI");
        self.api.send_json(token, api_request).await
    }

    /// Students visible to the caller (teachers and admins only).
    pub async fn get_student_list(&self, token: &str) -> Result<Vec<StudentInfo>, ApiError> {
        let request = ApiRequest::get("/teacher/students").operation("get student list");
        self.api.send_json(token, request).await
    }
}
