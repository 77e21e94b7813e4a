//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Listing takes the read lock; every mutation takes the write lock, so
//! writers are serialized and readers always see a consistent snapshot.

use super::{
    AppState,
    types::{
        CreateTodoRequest, ErrorResponse, HealthResponse, ListParams, PageResponse, TodoJson,
        UpdateTodoRequest,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tasklet_core::{TaskletError, TodoId};

// =============================================================================
// ERROR MAPPING
// =============================================================================

/// Map a core error to its HTTP response: missing ids are 404, every other
/// error is a validation failure (400).
fn error_response(err: &TaskletError) -> Response {
    let status = match err {
        TaskletError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// LIST HANDLER
// =============================================================================

/// `GET /todos` — filtered, sorted, paginated listing.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    tracing::debug!(
        page = params.page,
        size = params.size,
        sort_by = params.sort_by.as_deref(),
        "listing todos"
    );

    let service = state.service.read().await;
    match service.list(
        params.page,
        params.size,
        params.sort_by.as_deref(),
        &params.filter(),
    ) {
        Ok(page) => (StatusCode::OK, Json(PageResponse::from(page))).into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// CREATE HANDLER
// =============================================================================

/// `POST /todos` — create a todo from the request body.
pub async fn create_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateTodoRequest>,
) -> Response {
    let mut service = state.service.write().await;
    match service.create(request.into_draft()) {
        Ok(todo) => {
            tracing::debug!(id = ?todo.id, "created todo");
            (StatusCode::OK, Json(TodoJson::from(todo))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// UPDATE HANDLER
// =============================================================================

/// `PUT /todos/{id}` — partial update of text/priority, write-through of
/// the due date.
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(request): Json<UpdateTodoRequest>,
) -> Response {
    let mut service = state.service.write().await;
    match service.update(TodoId(id), request.into_draft()) {
        Ok(todo) => (StatusCode::OK, Json(TodoJson::from(todo))).into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// DONE / UNDONE HANDLERS
// =============================================================================

/// `POST /todos/{id}/done` — mark complete, stamping the done date.
pub async fn done_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut service = state.service.write().await;
    match service.mark_done(TodoId(id)) {
        Ok(todo) => (StatusCode::OK, Json(TodoJson::from(todo))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// `PUT /todos/{id}/undone` — reopen, clearing the done date.
pub async fn undone_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut service = state.service.write().await;
    match service.mark_undone(TodoId(id)) {
        Ok(todo) => (StatusCode::OK, Json(TodoJson::from(todo))).into_response(),
        Err(e) => error_response(&e),
    }
}

// =============================================================================
// DELETE HANDLER
// =============================================================================

/// `DELETE /todos/{id}` — 204 with no body on success.
pub async fn delete_handler(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut service = state.service.write().await;
    match service.delete(TodoId(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(&e),
    }
}
