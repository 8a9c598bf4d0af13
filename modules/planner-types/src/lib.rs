//! Shared types for the planner HTTP API and its clients.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /tasks/{date}` and `PUT /tasks/{date}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub task: Option<String>,
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `PUT /schedule`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub schedule: Option<String>,
}

// =====================================================
// Response Types
// =====================================================

/// Response of `GET /tasks/month/{year}/{month}`: ISO date -> plan text.
pub type MonthTasks = BTreeMap<String, String>;

/// Response of `GET /tasks/{date}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task: String,
}

/// Response of `GET /schedule`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub schedule: String,
}

/// Plain acknowledgement for writes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub role: String,
    pub text: String,
}

impl ChatReply {
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            text: text.into(),
        }
    }
}

/// Error body returned with every 4xx/5xx
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
