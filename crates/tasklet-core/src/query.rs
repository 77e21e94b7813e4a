//! # Query Module
//!
//! Turns a raw result set into an ordered, paginated page.
//!
//! - Sort specification parsing (`priority_desc-duedate_asc`)
//! - Stable multi-key sorting
//! - Skip/take pagination with the pre-pagination total
//!
//! The sort is intentionally forgiving: malformed criteria are silently
//! dropped and unrecognized fields compare as equal, falling through to the
//! next criterion. With no effective criteria the store's insertion order
//! is preserved.

use crate::types::Todo;
use std::cmp::Ordering;

// =============================================================================
// SORT SPECIFICATION
// =============================================================================

/// Fields a sort criterion can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Priority,
    DueDate,
    /// A field name the engine does not know. Kept in the criteria list but
    /// compares everything as equal.
    Unrecognized,
}

/// Direction of a sort criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// A single `(field, direction)` pair of a sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortCriterion {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Parse a sort specification string.
///
/// Criteria are joined by `-`, each criterion is `field_direction`.
/// A criterion that does not split into exactly two `_`-separated parts is
/// silently dropped. Field names match case-insensitively; the direction is
/// ascending iff it lowercases to `asc`.
#[must_use]
pub fn parse_sort_spec(spec: &str) -> Vec<SortCriterion> {
    if spec.trim().is_empty() {
        return Vec::new();
    }

    spec.split('-')
        .filter_map(|criterion| {
            let parts: Vec<&str> = criterion.split('_').collect();
            if parts.len() != 2 {
                return None;
            }
            let field = match parts[0].to_lowercase().as_str() {
                "priority" => SortField::Priority,
                "duedate" => SortField::DueDate,
                _ => SortField::Unrecognized,
            };
            let direction = if parts[1].to_lowercase() == "asc" {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            };
            Some(SortCriterion { field, direction })
        })
        .collect()
}

// =============================================================================
// SORTING
// =============================================================================

/// Ascending comparison for one field. Descending is the exact inverse,
/// which also inverts the placement of absent due dates.
fn compare_ascending(a: &Todo, b: &Todo, field: SortField) -> Ordering {
    match field {
        SortField::Priority => a.priority.weight().cmp(&b.priority.weight()),
        SortField::DueDate => match (a.due_date, b.due_date) {
            (None, None) => Ordering::Equal,
            // Absent sorts after all present values in ascending order.
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(left), Some(right)) => left.cmp(&right),
        },
        SortField::Unrecognized => Ordering::Equal,
    }
}

/// Compare two todos under a list of criteria, evaluated in order until one
/// yields a non-equal result.
#[must_use]
pub fn compare(a: &Todo, b: &Todo, criteria: &[SortCriterion]) -> Ordering {
    for criterion in criteria {
        let ordering = match criterion.direction {
            SortDirection::Ascending => compare_ascending(a, b, criterion.field),
            SortDirection::Descending => compare_ascending(a, b, criterion.field).reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// Sort todos in place under the given criteria.
///
/// `sort_by` is stable, so final ties preserve the prior relative order —
/// the store's insertion order when the input comes straight from
/// `find_all`.
pub fn sort_todos(todos: &mut [Todo], criteria: &[SortCriterion]) {
    todos.sort_by(|a, b| compare(a, b, criteria));
}

// =============================================================================
// PAGINATION
// =============================================================================

/// A bounded slice of a filtered, sorted result set plus the total matching
/// count (pre-pagination), so callers can compute the page count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub data: Vec<Todo>,
    pub total_items: u64,
}

/// Take page `page` (zero-based) of size `size` from the sorted sequence.
///
/// An out-of-range page yields an empty vector, not an error. Size zero is
/// rejected upstream by the service facade.
#[must_use]
pub fn paginate(todos: Vec<Todo>, page: usize, size: usize) -> Vec<Todo> {
    todos
        .into_iter()
        .skip(page.saturating_mul(size))
        .take(size)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
