//! Submission endpoints: create, read, update, submit, grade, delete.

use crate::domain::{ApiError, GradeForm, Submission, SubmissionForm, SubmissionUpdate};
use crate::usecases::api_client::{ApiClient, ApiRequest};
use std::sync::Arc;

pub struct SubmissionService {
    api: Arc<ApiClient>,
}

impl SubmissionService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn create_submission(
        &self,
        token: &str,
        form: &SubmissionForm,
    ) -> Result<Submission, ApiError> {
        let request = ApiRequest::post("/submissions/create")
            .json(form)?
            .operation("create submission");
        self.api.send_json(token, request).await
    }

    /// Students get their own submissions; teachers get those for their assignments.
    pub async fn get_submissions(&self, token: &str) -> Result<Vec<Submission>, ApiError> {
        let request = ApiRequest::get("/submissions/").operation("get submissions");
        self.api.send_json(token, request).await
    }

    pub async fn get_submissions_by_assignment_id(
        &self,
        token: &str,
        assignment_id: &str,
    ) -> Result<Vec<Submission>, ApiError> {
        let request = ApiRequest::get(format!("/submissions/assignment/{}", assignment_id))
            .operation("get submissions for assignment");
        self.api.send_json(token, request).await
    }

    pub async fn get_submission_by_id(&self, token: &str, id: &str) -> Result<Submission, ApiError> {
        let request = ApiRequest::get(format!("/submissions/{}", id)).operation("get submission");
        self.api.send_json(token, request).await
    }

    pub async fn update_submission_by_id(
        &self,
        token: &str,
        id: &str,
        update: &SubmissionUpdate,
    ) -> Result<Submission, ApiError> {
        let request = ApiRequest::post(format!("/submissions/{}/update", id))
            .json(update)?
            .operation("update submission");
        self.api.send_json(token, request).await
    }

    /// Moves a draft to `submitted`.
    pub async fn submit_submission(&self, token: &str, id: &str) -> Result<Submission, ApiError> {
        let request =
            ApiRequest::post(format!("/submissions/{}/submit", id)).operation("submit submission");
        self.api.send_json(token, request).await
    }

    pub async fn grade_submission(
        &self,
        token: &str,
        id: &str,
        grade: &GradeForm,
    ) -> Result<Submission, ApiError> {
        let request = ApiRequest::post(format!("/submissions/{}/grade", id))
            .json(grade)?
            .operation("grade submission");
        self.api.send_json(token, request).await
    }

    pub async fn delete_submission_by_id(&self, token: &str, id: &str) -> Result<bool, ApiError> {
        let request =
            ApiRequest::delete(format!("/submissions/{}/delete", id)).operation("delete submission");
        self.api.send_json(token, request).await
    }
}
