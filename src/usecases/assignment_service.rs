//! Assignment endpoints: CRUD, submit, statistics, grade export.

use crate::domain::{
    ApiError, Assignment, AssignmentForm, AssignmentStatistics, AssignmentSummary,
    AssignmentUpdate, GradeExport,
};
use crate::usecases::api_client::{ApiClient, ApiRequest};
use reqwest::Url;
use std::sync::Arc;
use tracing::info;

pub struct AssignmentService {
    api: Arc<ApiClient>,
}

/// Decodes an RFC 5987 ext-value (`UTF-8'lang'percent%20encoded`). Other charsets yield `None`.
fn decode_ext_value(value: &str) -> Option<String> {
    let mut parts = value.trim_matches('"').splitn(3, '\'');
    let charset = parts.next()?;
    let _language = parts.next()?;
    let encoded = parts.next()?;
    if !charset.eq_ignore_ascii_case("utf-8") {
        return None;
    }
    // '+' is a literal in ext-values but a space in query strings.
    let escaped = encoded
        .replace('+', "%2B")
        .replace('&', "%26")
        .replace('#', "%23");
    let url = Url::parse(&format!("http://localhost/?f={}", escaped)).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "f")
        .map(|(_, v)| v.into_owned())
}

/// Extracts the file name from a `Content-Disposition` header value.
/// Parameter names are case-insensitive; `filename*` wins over `filename`.
fn disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;
    for part in header.split(';') {
        let Some((name, value)) = part.split_once('=') else {
            continue;
        };
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "filename*" => extended = decode_ext_value(value).filter(|n| !n.is_empty()),
            "filename" => {
                plain = Some(value.trim_matches('"').to_string()).filter(|n| !n.is_empty())
            }
            _ => {}
        }
    }
    extended.or(plain)
}

impl AssignmentService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn create_assignment(
        &self,
        token: &str,
        form: &AssignmentForm,
    ) -> Result<Assignment, ApiError> {
        let request = ApiRequest::post("/assignments/create")
            .json(form)?
            .operation("create assignment");
        self.api.send_json(token, request).await
    }

    /// All assignments readable by the caller.
    pub async fn get_assignments(&self, token: &str) -> Result<Vec<Assignment>, ApiError> {
        let request = ApiRequest::get("/assignments/").operation("get assignments");
        self.api.send_json(token, request).await
    }

    /// Title/id listing. `page` is sent only when given.
    pub async fn get_assignment_list(
        &self,
        token: &str,
        page: Option<u32>,
    ) -> Result<Vec<AssignmentSummary>, ApiError> {
        let request = ApiRequest::get("/assignments/list")
            .query_opt("page", page)
            .operation("get assignment list");
        self.api.send_json(token, request).await
    }

    pub async fn get_assignment_by_id(&self, token: &str, id: &str) -> Result<Assignment, ApiError> {
        let request = ApiRequest::get(format!("/assignments/{}", id)).operation("get assignment");
        self.api.send_json(token, request).await
    }

    pub async fn update_assignment_by_id(
        &self,
        token: &str,
        id: &str,
        update: &AssignmentUpdate,
    ) -> Result<Assignment, ApiError> {
        let request = ApiRequest::post(format!("/assignments/{}/update", id))
            .json(update)?
            .operation("update assignment");
        self.api.send_json(token, request).await
    }

    pub async fn submit_assignment(&self, token: &str, id: &str) -> Result<Assignment, ApiError> {
        let request =
            ApiRequest::post(format!("/assignments/{}/submit", id)).operation("submit assignment");
        self.api.send_json(token, request).await
    }

    /// Returns the server's acknowledgement (`true` on success).
    pub async fn delete_assignment_by_id(&self, token: &str, id: &str) -> Result<bool, ApiError> {
        let request =
            ApiRequest::delete(format!("/assignments/{}/delete", id)).operation("delete assignment");
        self.api.send_json(token, request).await
    }

    pub async fn get_assignment_statistics(
        &self,
        token: &str,
        id: &str,
    ) -> Result<AssignmentStatistics, ApiError> {
        let request = ApiRequest::get(format!("/assignments/{}/statistics", id))
            .operation("get assignment statistics");
        self.api.send_json(token, request).await
    }

    /// Grade export. The body is CSV and is returned untouched.
    pub async fn export_assignment_grades(
        &self,
        token: &str,
        id: &str,
    ) -> Result<GradeExport, ApiError> {
        let request = ApiRequest::get(format!("/assignments/{}/export", id))
            .operation("export assignment grades");
        let response = self.api.send(token, request).await?;

        let export = GradeExport {
            content_type: response.header("content-type").map(str::to_string),
            filename: response
                .header("content-disposition")
                .and_then(disposition_filename),
            data: response.body,
        };
        info!(assignment_id = id, bytes = export.len(), "grade export downloaded");
        Ok(export)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::MockTransport;
    use crate::ports::{HttpMethod, RawResponse};
    use serde_json::json;
    use std::collections::HashMap;

    fn setup() -> (Arc<MockTransport>, AssignmentService) {
        let mock = Arc::new(MockTransport::new());
        let api = Arc::new(ApiClient::new(mock.clone(), "http://localhost:8080/api/v1"));
        (mock, AssignmentService::new(api))
    }

    fn assignment_json(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "user_id": "teacher-1",
            "title": "Essay",
            "description": null,
            "due_date": "2025-01-31",
            "status": "pending",
            "submitted_at": null,
            "access_control": null,
            "created_at": 1_700_000_000,
            "updated_at": 1_700_000_100
        })
    }

    #[test]
    fn test_disposition_filename() {
        assert_eq!(
            disposition_filename("attachment; filename=assignment_a1_grades.csv").as_deref(),
            Some("assignment_a1_grades.csv")
        );
        assert_eq!(
            disposition_filename(r#"attachment; filename="grades.csv""#).as_deref(),
            Some("grades.csv")
        );
        assert_eq!(disposition_filename("inline"), None);
    }

    #[test]
    fn test_disposition_filename_param_forms() {
        assert_eq!(
            disposition_filename("attachment; Filename=grades.csv").as_deref(),
            Some("grades.csv")
        );
        assert_eq!(
            disposition_filename(r#"attachment; filename = "a b.csv""#).as_deref(),
            Some("a b.csv")
        );
        assert_eq!(
            disposition_filename(
                "attachment; filename=\"fallback.csv\"; filename*=UTF-8''%E6%88%90%E7%BB%A9.csv"
            )
            .as_deref(),
            Some("成绩.csv")
        );
        assert_eq!(
            disposition_filename("attachment; FILENAME*=utf-8''a+b%20c.csv").as_deref(),
            Some("a+b c.csv")
        );
        // Unsupported charset falls back to the plain parameter.
        assert_eq!(
            disposition_filename("attachment; filename*=ISO-8859-1''x.csv; filename=y.csv")
                .as_deref(),
            Some("y.csv")
        );
    }

    #[tokio::test]
    async fn test_export_prefers_extended_filename() {
        let (mock, svc) = setup();
        let mut headers = HashMap::new();
        headers.insert(
            "content-disposition".to_string(),
            "attachment; filename=grades.csv; filename*=UTF-8''assignment_%C3%A9_grades.csv"
                .to_string(),
        );
        mock.push_response(RawResponse {
            status: 200,
            headers,
            body: b"name\r\n".to_vec(),
        });

        let export = svc.export_assignment_grades("tok", "a1").await.unwrap();
        assert_eq!(export.filename.as_deref(), Some("assignment_é_grades.csv"));
    }

    #[tokio::test]
    async fn test_create_assignment() {
        let (mock, svc) = setup();
        mock.push_json(200, assignment_json("a1"));

        let form = AssignmentForm::new("Essay", "2025-01-31").with_description("500 words");
        let created = svc.create_assignment("tok", &form).await.unwrap();
        assert_eq!(created.id, "a1");
        assert_eq!(created.status, "pending");

        let req = mock.last_request().unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url.path(), "/api/v1/assignments/create");
        let body: serde_json::Value = serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"title": "Essay", "description": "500 words", "due_date": "2025-01-31"})
        );
    }

    #[tokio::test]
    async fn test_get_assignments_returns_body_unchanged() {
        let (mock, svc) = setup();
        mock.push_json(200, json!([assignment_json("a1"), assignment_json("a2")]));

        let all = svc.get_assignments("tok").await.unwrap();
        let ids: Vec<&str> = all.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2"]);
        assert_eq!(mock.last_request().unwrap().url.path(), "/api/v1/assignments/");
    }

    #[tokio::test]
    async fn test_assignment_list_page_param() {
        let (mock, svc) = setup();
        let page = json!([{
            "id": "a1", "title": "Essay", "due_date": "2025-01-31",
            "status": "pending", "updated_at": 2, "created_at": 1
        }]);
        mock.push_json(200, page.clone()).push_json(200, page);

        let first = svc.get_assignment_list("tok", None).await.unwrap();
        svc.get_assignment_list("tok", Some(2)).await.unwrap();
        assert_eq!(first[0].title, "Essay");

        let reqs = mock.requests();
        assert_eq!(reqs[0].url.path(), "/api/v1/assignments/list");
        assert_eq!(reqs[0].url.query(), None);
        assert_eq!(reqs[1].url.query(), Some("page=2"));
    }

    #[tokio::test]
    async fn test_update_submit_delete_paths() {
        let (mock, svc) = setup();
        mock.push_json(200, assignment_json("a1"))
            .push_json(200, assignment_json("a1"))
            .push_json(200, json!(true));

        let update = AssignmentUpdate {
            title: Some("Essay v2".to_string()),
            ..Default::default()
        };
        svc.update_assignment_by_id("tok", "a1", &update).await.unwrap();
        svc.submit_assignment("tok", "a1").await.unwrap();
        assert!(svc.delete_assignment_by_id("tok", "a1").await.unwrap());

        let reqs = mock.requests();
        assert_eq!(reqs[0].url.path(), "/api/v1/assignments/a1/update");
        assert_eq!(reqs[0].body.as_deref(), Some(br#"{"title":"Essay v2"}"#.as_slice()));
        assert_eq!(reqs[1].url.path(), "/api/v1/assignments/a1/submit");
        assert!(reqs[1].body.is_none());
        assert_eq!(reqs[2].method, HttpMethod::Delete);
        assert_eq!(reqs[2].url.path(), "/api/v1/assignments/a1/delete");
    }

    #[tokio::test]
    async fn test_get_assignment_not_found() {
        let (mock, svc) = setup();
        mock.push_json(404, json!({"detail": "We could not find what you're looking for :/"}));

        let err = svc.get_assignment_by_id("tok", "missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "We could not find what you're looking for :/");
    }

    #[tokio::test]
    async fn test_statistics_distribution() {
        let (mock, svc) = setup();
        mock.push_json(
            200,
            json!({
                "assignment_id": "a1",
                "total_students": 30,
                "submitted_count": 24,
                "graded_count": 20,
                "submission_rate": 80.0,
                "avg_score": 82.4,
                "max_score": 98,
                "min_score": 51,
                "grade_distribution": {"A": 6, "B": 8, "C": 4, "D": 1, "F": 1}
            }),
        );

        let stats = svc.get_assignment_statistics("tok", "a1").await.unwrap();
        assert_eq!(stats.grade_distribution.total(), 20);
        let keys: Vec<String> = stats
            .grade_distribution
            .iter()
            .map(|(g, _)| g.to_string())
            .collect();
        assert_eq!(keys, ["A", "B", "C", "D", "F"]);
        assert_eq!(stats.max_score, 98.0);
        assert_eq!(
            mock.last_request().unwrap().url.path(),
            "/api/v1/assignments/a1/statistics"
        );
    }

    #[tokio::test]
    async fn test_export_returns_bytes() {
        let (mock, svc) = setup();
        let csv = "name,email\r\nAda,ada@example.com\r\n";
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "text/csv; charset=utf-8".to_string());
        headers.insert(
            "content-disposition".to_string(),
            "attachment; filename=assignment_a1_grades.csv".to_string(),
        );
        mock.push_response(RawResponse {
            status: 200,
            headers,
            body: csv.as_bytes().to_vec(),
        });

        let export = svc.export_assignment_grades("tok", "a1").await.unwrap();
        assert_eq!(export.data, csv.as_bytes());
        assert_eq!(export.filename.as_deref(), Some("assignment_a1_grades.csv"));
        assert_eq!(export.content_type.as_deref(), Some("text/csv; charset=utf-8"));
    }

    #[tokio::test]
    async fn test_export_error_uses_detail() {
        let (mock, svc) = setup();
        mock.push_json(403, json!({"detail": "Forbidden"}));

        let err = svc.export_assignment_grades("tok", "a1").await.unwrap_err();
        assert_eq!(err.to_string(), "Forbidden");
    }
}
