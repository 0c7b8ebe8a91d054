//! Assignment shapes: create/update forms, server records, statistics, grade export.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entities::UserSummary;

/// Body of `POST /assignments/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentForm {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<Value>,
}

impl AssignmentForm {
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: due_date.into(),
            status: None,
            access_control: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update body for `POST /assignments/{id}/update`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_control: Option<Value>,
}

/// Assignment record as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub due_date: String,
    #[serde(default = "default_assignment_status")]
    pub status: String,
    #[serde(default)]
    pub submitted_at: Option<i64>,
    #[serde(default)]
    pub access_control: Option<Value>,
    pub created_at: i64,
    pub updated_at: i64,

    #[serde(default)]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub ai_assist: Option<bool>,
    #[serde(default)]
    pub rubric_json: Option<Value>,

    /// Owner, present on list responses.
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub teacher: Option<UserSummary>,
}

fn default_assignment_status() -> String {
    "pending".to_string()
}

/// Entry of `GET /assignments/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentSummary {
    pub id: String,
    pub title: String,
    pub due_date: String,
    pub status: String,
    pub updated_at: i64,
    pub created_at: i64,
}

/// Letter grade bucket used by statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub const ALL: [LetterGrade; 5] = [
        LetterGrade::A,
        LetterGrade::B,
        LetterGrade::C,
        LetterGrade::D,
        LetterGrade::F,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count of graded submissions per letter. Always exactly the five buckets A–F.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDistribution {
    #[serde(rename = "A", default)]
    pub a: u32,
    #[serde(rename = "B", default)]
    pub b: u32,
    #[serde(rename = "C", default)]
    pub c: u32,
    #[serde(rename = "D", default)]
    pub d: u32,
    #[serde(rename = "F", default)]
    pub f: u32,
}

impl GradeDistribution {
    pub fn count(&self, grade: LetterGrade) -> u32 {
        match grade {
            LetterGrade::A => self.a,
            LetterGrade::B => self.b,
            LetterGrade::C => self.c,
            LetterGrade::D => self.d,
            LetterGrade::F => self.f,
        }
    }

    /// Buckets in A..F order.
    pub fn iter(&self) -> impl Iterator<Item = (LetterGrade, u32)> + '_ {
        LetterGrade::ALL.into_iter().map(|g| (g, self.count(g)))
    }

    pub fn total(&self) -> u32 {
        self.a + self.b + self.c + self.d + self.f
    }
}

/// Aggregates from `GET /assignments/{id}/statistics`. Computed server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStatistics {
    pub assignment_id: String,
    pub total_students: u32,
    pub submitted_count: u32,
    pub graded_count: u32,
    /// Percentage, one decimal.
    pub submission_rate: f64,
    pub avg_score: f64,
    pub max_score: f64,
    pub min_score: f64,
    pub grade_distribution: GradeDistribution,
}

/// Binary payload of `GET /assignments/{id}/export` (CSV, not JSON).
#[derive(Debug, Clone, PartialEq)]
pub struct GradeExport {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
    /// From `Content-Disposition`, when the server provides one.
    pub filename: Option<String>,
}

impl GradeExport {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Server-provided filename, or the server's own naming scheme.
    /// Only the last path component of the server value is kept.
    pub fn filename_or_default(&self, assignment_id: &str) -> String {
        self.filename
            .as_deref()
            .and_then(|name| std::path::Path::new(name).file_name())
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("assignment_{}_grades.csv", assignment_id))
    }
}
