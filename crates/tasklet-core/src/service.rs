//! # Service Module
//!
//! The validating facade in front of the store and the query engine — the
//! only component callers interact with.
//!
//! Every mutation is a full read-modify-write through the store; nothing
//! mutates a stored todo in place. All operations are synchronous and
//! CPU-bound; callers embedding the service behind a concurrent server must
//! serialize access (the HTTP layer wraps it in a read/write lock).

use crate::query::{Page, paginate, parse_sort_spec, sort_todos};
use crate::store::{InMemoryStore, TodoFilter, TodoStore};
use crate::types::{MAX_TEXT_LENGTH, TaskletError, Todo, TodoDraft, TodoId};

// =============================================================================
// VALIDATION
// =============================================================================

/// Validate a caller-supplied text field.
fn validate_text(text: &str) -> Result<(), TaskletError> {
    if text.is_empty() || text.chars().count() > MAX_TEXT_LENGTH {
        return Err(TaskletError::InvalidText);
    }
    Ok(())
}

// =============================================================================
// SERVICE
// =============================================================================

/// The todo service facade.
///
/// Generic over the store capability so alternative backing stores can be
/// substituted; defaults to the in-memory store.
#[derive(Debug, Default)]
pub struct TodoService<S: TodoStore = InMemoryStore> {
    store: S,
}

impl TodoService<InMemoryStore> {
    /// Create a service over a fresh in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: InMemoryStore::new(),
        }
    }
}

impl<S: TodoStore> TodoService<S> {
    /// Create a service over an existing store.
    #[must_use]
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// List todos: filter via the store, then sort and paginate via the
    /// query engine. `total_items` counts the filtered set before
    /// pagination.
    ///
    /// Rejects `size == 0` rather than propagating undefined slicing.
    pub fn list(
        &self,
        page: usize,
        size: usize,
        sort_spec: Option<&str>,
        filter: &TodoFilter,
    ) -> Result<Page, TaskletError> {
        if size == 0 {
            return Err(TaskletError::InvalidPageSize);
        }

        let mut matching = self.store.find_all(filter);
        let total_items = matching.len() as u64;

        let criteria = parse_sort_spec(sort_spec.unwrap_or(""));
        sort_todos(&mut matching, &criteria);

        Ok(Page {
            data: paginate(matching, page, size),
            total_items,
        })
    }

    /// Create a todo from a draft. Text and priority are required; the
    /// store assigns the id.
    pub fn create(&mut self, draft: TodoDraft) -> Result<Todo, TaskletError> {
        let text = draft.text.ok_or(TaskletError::InvalidText)?;
        validate_text(&text)?;
        let priority = draft.priority.ok_or(TaskletError::MissingPriority)?;

        let todo = Todo::new(text, priority, draft.due_date);
        Ok(self.store.save(todo))
    }

    /// Apply a partial update.
    ///
    /// Absent `text`/`priority` leave the stored values unchanged; the due
    /// date is always overwritten with the draft's value, so an absent
    /// `due_date` clears the deadline. `done`, `done_date` and
    /// `creation_date` are never touched here.
    pub fn update(&mut self, id: TodoId, draft: TodoDraft) -> Result<Todo, TaskletError> {
        let mut todo = self
            .store
            .find_by_id(id)
            .ok_or(TaskletError::NotFound(id))?;

        if let Some(text) = draft.text {
            validate_text(&text)?;
            todo.text = text;
        }
        if let Some(priority) = draft.priority {
            todo.priority = priority;
        }
        todo.due_date = draft.due_date;

        Ok(self.store.save(todo))
    }

    /// Mark a todo done, stamping its done date. Already-done todos are
    /// returned unchanged without a new save or timestamp.
    pub fn mark_done(&mut self, id: TodoId) -> Result<Todo, TaskletError> {
        let mut todo = self
            .store
            .find_by_id(id)
            .ok_or(TaskletError::NotFound(id))?;

        if todo.done {
            return Ok(todo);
        }
        todo.set_done(true);
        Ok(self.store.save(todo))
    }

    /// Reopen a todo, clearing its done date. Already-open todos are
    /// returned unchanged without a new save.
    pub fn mark_undone(&mut self, id: TodoId) -> Result<Todo, TaskletError> {
        let mut todo = self
            .store
            .find_by_id(id)
            .ok_or(TaskletError::NotFound(id))?;

        if !todo.done {
            return Ok(todo);
        }
        todo.set_done(false);
        Ok(self.store.save(todo))
    }

    /// Delete a todo by id.
    pub fn delete(&mut self, id: TodoId) -> Result<(), TaskletError> {
        if !self.store.exists_by_id(id) {
            return Err(TaskletError::NotFound(id));
        }
        self.store.delete_by_id(id);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
