//! Wire types of the `/tasks` resource.

use jiff::civil::DateTime;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Responses
// ============================================================================

/// A task as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    /// Local wall-clock time of the backend, without offset
    #[serde(default)]
    pub created_at: Option<DateTime>,
    #[serde(default)]
    pub updated_at: Option<DateTime>,
}

/// One page of tasks together with the number of matching tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    pub tasks: Vec<Task>,
    pub total: i64,
}

// ============================================================================
// Requests
// ============================================================================

/// Request to create a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewTask {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    /// Title (1-255 characters, not blank)
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub is_completed: bool,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            is_completed: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }

    /// Trims the title and description; an all-whitespace description is dropped
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: normalize_description(self.description),
            is_completed: self.is_completed,
        }
    }
}

/// Partial update of a task; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.is_completed.is_none()
    }

    /// Trims a new title. A blank description is kept as an empty string,
    /// which clears the stored description.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.map(|title| title.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            is_completed: self.is_completed,
        }
    }
}

fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

fn default_limit() -> u32 {
    100
}

/// Pagination and filter for listing tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TaskQuery {
    #[serde(default)]
    pub skip: u32,

    #[validate(range(min = 1, max = 1000, message = "Limit must be between 1 and 1000"))]
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Only completed (`true`) or only pending (`false`) tasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: default_limit(),
            completed: None,
        }
    }
}

impl TaskQuery {
    /// Writes `skip`, `limit` and, when set, `completed` as query parameters
    pub fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        pairs
            .append_pair("skip", &self.skip.to_string())
            .append_pair("limit", &self.limit.to_string());
        if let Some(completed) = self.completed {
            pairs.append_pair("completed", if completed { "true" } else { "false" });
        }
    }
}
