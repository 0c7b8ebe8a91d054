//! School leader dashboard endpoints. Leaders and admins only; others get 403.

use crate::domain::{
    ApiError, AssignmentsOverview, SchoolStatistics, StudentsOverview, TeacherPerformance,
};
use crate::usecases::api_client::{ApiClient, ApiRequest};
use std::sync::Arc;

pub struct DashboardService {
    api: Arc<ApiClient>,
}

impl DashboardService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn get_school_statistics(&self, token: &str) -> Result<SchoolStatistics, ApiError> {
        let request = ApiRequest::get("/leader/statistics").operation("get school statistics");
        self.api.send_json(token, request).await
    }

    pub async fn get_teachers_performance(
        &self,
        token: &str,
    ) -> Result<Vec<TeacherPerformance>, ApiError> {
        let request =
            ApiRequest::get("/leader/teachers/performance").operation("get teacher performance");
        self.api.send_json(token, request).await
    }

    pub async fn get_students_overview(&self, token: &str) -> Result<StudentsOverview, ApiError> {
        let request =
            ApiRequest::get("/leader/students/overview").operation("get students overview");
        self.api.send_json(token, request).await
    }

    pub async fn get_assignments_overview(
        &self,
        token: &str,
    ) -> Result<AssignmentsOverview, ApiError> {
        let request =
            ApiRequest::get("/leader/assignments/overview").operation("get assignments overview");
        self.api.send_json(token, request).await
    }
}
