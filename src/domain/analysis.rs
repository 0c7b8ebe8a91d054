//! Nightly learner-profile analysis and long-term memory shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /nightly-analysis/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightlyAnalysisRequest {
    pub user_id: String,
    /// `YYYY-MM-DD`; the server defaults to yesterday.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileAnalysisResult {
    pub user_id: String,
    pub date: String,
    pub total_turns: u32,
    pub summary: String,
    #[serde(default)]
    pub weak_skills: Vec<String>,
    #[serde(default)]
    pub strong_skills: Vec<String>,
    #[serde(default)]
    pub evidence: Vec<Value>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub profile_memory_id: Option<String>,
}

/// Response of `GET /nightly-analysis/profile/latest/{user_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestProfile {
    pub memory_id: String,
    pub user_id: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub profile: Value,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongtermMemory {
    pub id: String,
    pub user_id: String,
    pub namespace: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub text: String,
    #[serde(default)]
    pub metadata_json: Map<String, Value>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Response of `GET /nightly-analysis/memories/{user_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryList {
    pub user_id: String,
    #[serde(default)]
    pub memories: Vec<LongtermMemory>,
    pub total: u32,
}
