//! Submission shapes: create/update/grade forms and the server record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::entities::UserSummary;

/// Body of `POST /submissions/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionForm {
    pub assignment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Value>>,
}

impl SubmissionForm {
    pub fn new(assignment_id: impl Into<String>) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            content: None,
            attachments: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }
}

/// Body of `POST /submissions/{id}/update`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric_scores_json: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_feedback_draft: Option<String>,
}

/// Body of `POST /submissions/{id}/grade`.
///
/// When `score` is absent and `rubric_scores` is present the server derives the
/// total from the rubric (0–5 scale per criterion).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradeForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric_scores: Option<BTreeMap<String, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adopt_ai_draft: Option<bool>,
}

impl GradeForm {
    pub fn new(score: f64) -> Self {
        Self {
            score: Some(score),
            ..Default::default()
        }
    }

    pub fn from_rubric(rubric_scores: BTreeMap<String, f64>) -> Self {
        Self {
            rubric_scores: Some(rubric_scores),
            ..Default::default()
        }
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }
}

/// Submission record as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub assignment_id: String,
    pub student_id: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub attachments: Option<Vec<Value>>,
    /// draft, submitted, ai_reviewed, graded, released
    #[serde(default = "default_submission_status")]
    pub status: String,
    #[serde(default)]
    pub submitted_at: Option<i64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub rubric_scores_json: Option<Value>,
    #[serde(default)]
    pub ai_analysis: Option<Value>,
    #[serde(default)]
    pub ai_feedback_draft: Option<String>,
    #[serde(default)]
    pub grader_id: Option<String>,
    #[serde(default)]
    pub graded_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,

    #[serde(default)]
    pub student: Option<UserSummary>,
    #[serde(default)]
    pub grader: Option<UserSummary>,
}

fn default_submission_status() -> String {
    "draft".to_string()
}

impl Submission {
    pub fn is_graded(&self) -> bool {
        self.status == "graded"
    }
}
