//! # Core Type Definitions
//!
//! This module contains all core types for the Tasklet engine:
//! - The todo identifier (`TodoId`)
//! - The priority enumeration (`Priority`)
//! - Timestamps (`Timestamp`)
//! - The todo record itself (`Todo`) and its partial form (`TodoDraft`)
//! - Error types (`TaskletError`)
//!
//! ## Invariants
//!
//! - A stored `Todo` always has an assigned, stable id
//! - `done_date` is present if and only if `done` is true
//! - `text` and `priority` are always valid after construction

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Maximum length of a todo's text, in characters.
pub const MAX_TEXT_LENGTH: usize = 120;

// =============================================================================
// TODO IDENTIFIER
// =============================================================================

/// Unique identifier for a todo record.
///
/// Ids are assigned by the store from a monotonic counter starting at 1
/// and never change once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub u64);

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// PRIORITY
// =============================================================================

/// Priority of a todo.
///
/// Serialized as the uppercase enumeration name (`"HIGH"`, `"MEDIUM"`,
/// `"LOW"`). Used both for display and as a sort key via [`Priority::weight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ordinal weight used for sorting: HIGH=3, MEDIUM=2, LOW=1.
    #[must_use]
    pub const fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

// =============================================================================
// TIMESTAMP
// =============================================================================

/// A wall-clock timestamp without timezone.
///
/// Serializes to the ISO-8601-like form `2025-06-01T00:00:00`, matching the
/// wire format of the HTTP interface.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(pub NaiveDateTime);

impl Timestamp {
    /// Current time (UTC, naive).
    #[must_use]
    pub fn now() -> Self {
        Self(chrono::Utc::now().naive_utc())
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::from_str(s).map(Self)
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}

// =============================================================================
// TODO
// =============================================================================

/// A single task record tracked by the system.
///
/// `id` is `None` until the store assigns one on first save. Every record
/// returned by the store has `Some(id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Store-assigned identifier. Immutable once set.
    pub id: Option<TodoId>,
    /// Task description. Non-empty, at most [`MAX_TEXT_LENGTH`] characters.
    pub text: String,
    /// Optional deadline.
    pub due_date: Option<Timestamp>,
    /// Completion flag.
    pub done: bool,
    /// Stamped when `done` flips to true, cleared when it flips to false.
    /// Never set directly by a caller.
    pub done_date: Option<Timestamp>,
    /// Priority of the task.
    pub priority: Priority,
    /// Fixed at construction time, immutable thereafter.
    pub creation_date: Timestamp,
}

impl Todo {
    /// Create a new, not-yet-stored todo.
    #[must_use]
    pub fn new(text: impl Into<String>, priority: Priority, due_date: Option<Timestamp>) -> Self {
        Self {
            id: None,
            text: text.into(),
            due_date,
            done: false,
            done_date: None,
            priority,
            creation_date: Timestamp::now(),
        }
    }

    /// Flip the completion flag, keeping `done_date` in sync:
    /// stamped with the current time on completion, cleared on reopening.
    pub fn set_done(&mut self, done: bool) {
        self.done = done;
        self.done_date = if done { Some(Timestamp::now()) } else { None };
    }
}

// =============================================================================
// TODO DRAFT
// =============================================================================

/// Caller-supplied fields for creating or updating a todo.
///
/// On create, `text` and `priority` are required and validated by the
/// service. On update, absent `text`/`priority` mean "leave unchanged",
/// while `due_date` is always written through — `None` clears the deadline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    pub text: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Timestamp>,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors raised by the Tasklet engine.
///
/// All errors are per-request and recoverable: validation failures and
/// missing ids are expected conditions surfaced to the caller, never
/// process-fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskletError {
    /// Text is missing, empty, or longer than [`MAX_TEXT_LENGTH`] characters.
    #[error("text is required and must not exceed {MAX_TEXT_LENGTH} characters")]
    InvalidText,

    /// No priority was supplied where one is required.
    #[error("priority is required")]
    MissingPriority,

    /// Page size must be a positive integer.
    #[error("page size must be a positive integer")]
    InvalidPageSize,

    /// The operation referenced an id with no stored record.
    #[error("todo not found with id: {0}")]
    NotFound(TodoId),
}

// =============================================================================
// TESTS
// =============================================================================
