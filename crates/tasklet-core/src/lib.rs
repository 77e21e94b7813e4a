//! # tasklet-core
//!
//! The task-tracking engine for Tasklet - THE LOGIC.
//!
//! This crate owns everything the HTTP layer delegates to:
//! - The data model (`Todo`, `Priority`, timestamps, errors)
//! - The in-memory store with id-indexed lookup and insertion-order scans
//! - The query pipeline (sort-spec parsing, stable multi-key sort,
//!   pagination)
//! - The validating service facade
//!
//! ## Architectural Constraints
//!
//! - Is the ONLY place where todo state exists (stateful)
//! - Has NO async, NO network dependencies (pure Rust)
//! - All operations are synchronous, CPU-bound, linear in collection size
//! - Never panics; every fallible operation returns `Result<_, TaskletError>`

// =============================================================================
// MODULES
// =============================================================================

pub mod query;
pub mod service;
pub mod store;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{MAX_TEXT_LENGTH, Priority, TaskletError, Timestamp, Todo, TodoDraft, TodoId};

// =============================================================================
// RE-EXPORTS: Store
// =============================================================================

pub use store::{InMemoryStore, StatusFilter, TodoFilter, TodoStore};

// =============================================================================
// RE-EXPORTS: Query Engine
// =============================================================================

pub use query::{Page, SortCriterion, SortDirection, SortField, parse_sort_spec};

// =============================================================================
// RE-EXPORTS: Service Facade
// =============================================================================

pub use service::TodoService;
