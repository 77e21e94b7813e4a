//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.
//!
//! Field names are camelCase on the wire (`dueDate`, `doneDate`,
//! `creationDate`, `totalItems`); priorities are the uppercase enumeration
//! names; timestamps are ISO-8601-like (`2025-06-01T00:00:00`).

use serde::{Deserialize, Serialize};
use tasklet_core::{Page, Priority, StatusFilter, Timestamp, Todo, TodoDraft, TodoFilter};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// TODO JSON
// =============================================================================

/// Wire representation of a stored todo.
///
/// Absent timestamps serialize as `null`, matching the original interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoJson {
    pub id: u64,
    pub text: String,
    pub due_date: Option<Timestamp>,
    pub done: bool,
    pub done_date: Option<Timestamp>,
    pub priority: Priority,
    pub creation_date: Timestamp,
}

impl From<Todo> for TodoJson {
    fn from(todo: Todo) -> Self {
        Self {
            // Stored todos always carry an assigned id.
            id: todo.id.map_or(0, |id| id.0),
            text: todo.text,
            due_date: todo.due_date,
            done: todo.done,
            done_date: todo.done_date,
            priority: todo.priority,
            creation_date: todo.creation_date,
        }
    }
}

// =============================================================================
// PAGE RESPONSE
// =============================================================================

/// Page payload: the paginated slice plus the total count of items matching
/// the filters before pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub data: Vec<TodoJson>,
    pub total_items: u64,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        Self {
            data: page.data.into_iter().map(TodoJson::from).collect(),
            total_items: page.total_items,
        }
    }
}

// =============================================================================
// LIST PARAMETERS
// =============================================================================

fn default_page_size() -> usize {
    10
}

/// Query parameters of `GET /todos`.
#[derive(Debug, Clone, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_page_size")]
    pub size: usize,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub status: Option<String>,
    pub text: Option<String>,
    pub priority: Option<Priority>,
}

impl ListParams {
    /// Build the store filter from the raw parameters.
    #[must_use]
    pub fn filter(&self) -> TodoFilter {
        TodoFilter {
            status: self.status.as_deref().map(StatusFilter::parse),
            text: self.text.clone(),
            priority: self.priority,
        }
    }
}

// =============================================================================
// CREATE / UPDATE REQUESTS
// =============================================================================

/// Body of `POST /todos`. Text and priority are required; validation
/// happens in the core service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodoRequest {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<Timestamp>,
}

impl CreateTodoRequest {
    #[must_use]
    pub fn into_draft(self) -> TodoDraft {
        TodoDraft {
            text: self.text,
            priority: self.priority,
            due_date: self.due_date,
        }
    }
}

/// Body of `PUT /todos/{id}`.
///
/// Absent `text`/`priority` leave the stored values unchanged; `dueDate` is
/// always written through, so omitting it clears the deadline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodoRequest {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<Timestamp>,
}

impl UpdateTodoRequest {
    #[must_use]
    pub fn into_draft(self) -> TodoDraft {
        TodoDraft {
            text: self.text,
            priority: self.priority,
            due_date: self.due_date,
        }
    }
}

// =============================================================================
// ERROR RESPONSE
// =============================================================================

/// Error payload for 4xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

// =============================================================================
// TESTS
// =============================================================================
