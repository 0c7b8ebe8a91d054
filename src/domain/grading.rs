//! AI grading shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Response of `POST /ai-grading/{id}/ai-grade`. Per-criterion scores are on a 0–5 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiGradeResponse {
    pub rubric_scores: BTreeMap<String, f64>,
    pub feedback_draft: String,
    #[serde(default)]
    pub total_score: Option<f64>,
    #[serde(default)]
    pub confidence: Option<String>,
}

/// Body of `POST /ai-grading/generate-rubric`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRubricRequest {
    pub assignment_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_description: Option<String>,
    pub user_requirements: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chat_history: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRubricResponse {
    pub explanation: String,
    pub rubric_json: Value,
}

impl GenerateRubricResponse {
    /// Criteria array of the generated rubric, empty when the rubric has none.
    pub fn criteria(&self) -> &[Value] {
        self.rubric_json
            .get("criteria")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
