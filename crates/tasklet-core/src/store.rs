//! # Store Module
//!
//! The keyed todo collection, durable for the process lifetime.
//!
//! The [`TodoStore`] trait is the capability surface other components see;
//! [`InMemoryStore`] is the only in-crate implementation. Alternative
//! backing stores can be substituted without touching the query engine or
//! the service facade.
//!
//! ## Ordering
//!
//! `find_all` iterates in insertion order. Sort stability and the default
//! (unsorted) listing order both depend on this, so the store keeps an
//! explicit insertion-order index next to the id-keyed map.

use crate::types::{Priority, Todo, TodoId};
use std::collections::BTreeMap;

// =============================================================================
// FILTERS
// =============================================================================

/// Completion-state filter.
///
/// Parsed from the wire value: `"done"` selects completed todos, any other
/// value selects the not-done ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Done,
    NotDone,
}

impl StatusFilter {
    /// Parse a raw status string. `"done"` maps to [`StatusFilter::Done`],
    /// everything else to [`StatusFilter::NotDone`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == "done" {
            Self::Done
        } else {
            Self::NotDone
        }
    }

    /// Whether a todo with the given completion flag matches.
    #[must_use]
    pub const fn matches(self, done: bool) -> bool {
        match self {
            Self::Done => done,
            Self::NotDone => !done,
        }
    }
}

/// Filter criteria for [`TodoStore::find_all`].
///
/// All set fields must match (logical AND); an unset field matches
/// everything. Text matching is a case-insensitive substring search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub status: Option<StatusFilter>,
    pub text: Option<String>,
    pub priority: Option<Priority>,
}

impl TodoFilter {
    /// Whether the given todo passes every set criterion.
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        let status_ok = self.status.is_none_or(|s| s.matches(todo.done));
        let text_ok = self
            .text
            .as_ref()
            .is_none_or(|t| todo.text.to_lowercase().contains(&t.to_lowercase()));
        let priority_ok = self.priority.is_none_or(|p| p == todo.priority);
        status_ok && text_ok && priority_ok
    }
}

// =============================================================================
// STORE TRAIT
// =============================================================================

/// Capability surface of a todo store.
///
/// Callers operate on copies returned by `find_all`/`find_by_id`; no
/// component outside the store holds a canonical reference into the
/// collection.
pub trait TodoStore {
    /// All todos matching the filter, in insertion order.
    fn find_all(&self, filter: &TodoFilter) -> Vec<Todo>;

    /// Lookup a single todo by id.
    fn find_by_id(&self, id: TodoId) -> Option<Todo>;

    /// Persist a todo.
    ///
    /// - No id: assigns the next sequential id and appends.
    /// - Known id: replaces the existing record, preserving its position.
    /// - Unknown id: appends as a new record.
    ///
    /// Returns the stored todo, with its id assigned.
    fn save(&mut self, todo: Todo) -> Todo;

    /// Remove the record with this id. No-op if absent; callers that need
    /// an error must check existence first.
    fn delete_by_id(&mut self, id: TodoId);

    /// Whether a record with this id exists.
    fn exists_by_id(&self, id: TodoId) -> bool;
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// In-memory [`TodoStore`] backed by an id-keyed `BTreeMap` plus an
/// insertion-order index. Lookup by id avoids a linear scan while
/// `find_all` still iterates in insertion order.
#[derive(Debug)]
pub struct InMemoryStore {
    todos: BTreeMap<TodoId, Todo>,
    order: Vec<TodoId>,
    next_id: u64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Create an empty store. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            todos: BTreeMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of stored todos.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the store holds no todos.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl TodoStore for InMemoryStore {
    fn find_all(&self, filter: &TodoFilter) -> Vec<Todo> {
        self.order
            .iter()
            .filter_map(|id| self.todos.get(id))
            .filter(|todo| filter.matches(todo))
            .cloned()
            .collect()
    }

    fn find_by_id(&self, id: TodoId) -> Option<Todo> {
        self.todos.get(&id).cloned()
    }

    fn save(&mut self, mut todo: Todo) -> Todo {
        let id = match todo.id {
            None => {
                let id = TodoId(self.next_id);
                self.next_id += 1;
                todo.id = Some(id);
                self.order.push(id);
                id
            }
            Some(id) => {
                if !self.todos.contains_key(&id) {
                    self.order.push(id);
                }
                id
            }
        };
        self.todos.insert(id, todo.clone());
        todo
    }

    fn delete_by_id(&mut self, id: TodoId) {
        if self.todos.remove(&id).is_some() {
            self.order.retain(|&existing| existing != id);
        }
    }

    fn exists_by_id(&self, id: TodoId) -> bool {
        self.todos.contains_key(&id)
    }
}

// =============================================================================
// TESTS
// =============================================================================
