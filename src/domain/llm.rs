//! LLM proxy shapes. Sessions and turns are read-only projections of server state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entities::epoch_to_utc;

/// Conversation mode; the server picks token limits from it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    #[default]
    Chat,
    Homework,
    DeepThink,
}

/// Body of `POST /llm/proxy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyMessageRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<SessionMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Passing `session_id` here continues an existing session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl ProxyMessageRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            chat_id: None,
            assignment_id: None,
            mode: None,
            model: None,
            meta: None,
        }
    }

    pub fn with_mode(mut self, mode: SessionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Continue the given session instead of opening a new one.
    pub fn in_session(mut self, session_id: impl Into<String>) -> Self {
        self.meta
            .get_or_insert_with(Map::new)
            .insert("session_id".to_string(), Value::String(session_id.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyMessageResponse {
    pub turn_id: String,
    pub session_id: String,
    pub content: String,
    pub model: String,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionModel {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub assignment_id: Option<String>,
    pub mode: String,
    pub started_at: i64,
    #[serde(default)]
    pub ended_at: Option<i64>,
    #[serde(default)]
    pub policy_snapshot: Map<String, Value>,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl SessionModel {
    pub fn started(&self) -> Option<DateTime<Utc>> {
        epoch_to_utc(self.started_at)
    }

    pub fn is_open(&self) -> bool {
        self.ended_at.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
    System,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnModel {
    pub id: String,
    pub session_id: String,
    pub role: TurnRole,
    pub content: String,
    #[serde(default)]
    pub tool_calls: Vec<Value>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tokens_in: i64,
    #[serde(default)]
    pub tokens_out: i64,
    #[serde(default)]
    pub cost: f64,
    pub created_at: i64,
    #[serde(default)]
    pub meta: Map<String, Value>,
}

/// Response of `GET /llm/sessions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionList {
    #[serde(default)]
    pub sessions: Vec<SessionModel>,
}

/// Response of `GET /llm/sessions/{id}/turns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTurns {
    pub session: SessionModel,
    #[serde(default)]
    pub turns: Vec<TurnModel>,
}

impl SessionTurns {
    /// Sum of input and output tokens across all turns.
    pub fn total_tokens(&self) -> i64 {
        self.turns.iter().map(|t| t.tokens_in + t.tokens_out).sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.turns.iter().map(|t| t.cost).sum()
    }
}
