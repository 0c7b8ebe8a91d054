//! Teacher AI shapes.

use serde::{Deserialize, Serialize};

/// Body of `POST /teacher/ask-ai`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherAiRequest {
    pub student_id: String,
    pub question: String,
    /// Extra context, e.g. an assignment id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// What the answer was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub conversation_count: u32,
    pub assignment_count: u32,
    #[serde(default)]
    pub profile_date: Option<i64>,
    pub date_range: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherAiResponse {
    pub answer: String,
    pub data_sources: DataSource,
    pub student_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub last_active_at: Option<i64>,
    pub role: String,
}
