//! Integration tests for the Tasklet HTTP API.
//!
//! Uses axum-test to exercise the router without starting a real server.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use tasklet::api::{
    AppState, CreateTodoRequest, ErrorResponse, HealthResponse, PageResponse, TodoJson,
    create_router,
};
use tasklet_core::{Priority, TodoService};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a test server over a fresh in-memory service.
fn create_test_server() -> TestServer {
    let state = AppState::new(TodoService::new());
    TestServer::new(create_router(state)).unwrap()
}

/// Create a todo through the API and return its wire representation.
async fn create_todo(server: &TestServer, text: &str, priority: Priority) -> TodoJson {
    let request = CreateTodoRequest {
        text: Some(text.to_string()),
        priority: Some(priority),
        due_date: None,
    };
    let response = server.post("/todos").json(&request).await;
    response.assert_status_ok();
    response.json()
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// CREATE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_create_valid_todo() {
    let server = create_test_server();

    let todo = create_todo(&server, "Buy milk", Priority::High).await;

    assert_eq!(todo.id, 1);
    assert_eq!(todo.text, "Buy milk");
    assert_eq!(todo.priority, Priority::High);
    assert!(!todo.done);
    assert!(todo.done_date.is_none());
    assert!(todo.due_date.is_none());
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let server = create_test_server();

    let first = create_todo(&server, "first", Priority::Low).await;
    let second = create_todo(&server, "second", Priority::Low).await;

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn test_create_with_due_date() {
    let server = create_test_server();

    let request = json!({
        "text": "Call mom",
        "priority": "LOW",
        "dueDate": "2025-06-01T00:00:00"
    });
    let response = server.post("/todos").json(&request).await;

    response.assert_status_ok();
    let todo: TodoJson = response.json();
    assert_eq!(
        todo.due_date,
        Some("2025-06-01T00:00:00".parse().unwrap())
    );
}

#[tokio::test]
async fn test_create_missing_text_rejected() {
    let server = create_test_server();

    let response = server.post("/todos").json(&json!({"priority": "HIGH"})).await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert!(!error.error.is_empty());
}

#[tokio::test]
async fn test_create_empty_text_rejected() {
    let server = create_test_server();

    let response = server
        .post("/todos")
        .json(&json!({"text": "", "priority": "HIGH"}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_oversized_text_rejected() {
    let server = create_test_server();

    let long_text = "x".repeat(121);
    let response = server
        .post("/todos")
        .json(&json!({"text": long_text, "priority": "HIGH"}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_missing_priority_rejected() {
    let server = create_test_server();

    let response = server.post("/todos").json(&json!({"text": "Buy milk"})).await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "priority is required");
}

// =============================================================================
// LIST ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_list_empty_store() {
    let server = create_test_server();

    let response = server.get("/todos").await;

    response.assert_status_ok();
    let page: PageResponse = response.json();
    assert!(page.data.is_empty());
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn test_list_end_to_end_example() {
    let server = create_test_server();

    create_todo(&server, "Buy milk", Priority::High).await;
    let request = json!({
        "text": "Call mom",
        "priority": "LOW",
        "dueDate": "2025-06-01T00:00:00"
    });
    server.post("/todos").json(&request).await.assert_status_ok();

    let response = server
        .get("/todos")
        .add_query_param("sortBy", "priority_desc")
        .add_query_param("page", "0")
        .add_query_param("size", "10")
        .await;

    response.assert_status_ok();
    let page: PageResponse = response.json();
    assert_eq!(page.total_items, 2);
    let texts: Vec<&str> = page.data.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Buy milk", "Call mom"]);
}

#[tokio::test]
async fn test_list_pagination_walks_all_pages() {
    let server = create_test_server();

    for i in 0..5 {
        create_todo(&server, &format!("task {i}"), Priority::Medium).await;
    }

    let mut seen = Vec::new();
    for page_index in 0..3 {
        let response = server
            .get("/todos")
            .add_query_param("page", page_index.to_string())
            .add_query_param("size", "2")
            .await;
        let page: PageResponse = response.json();
        assert_eq!(page.total_items, 5);
        seen.extend(page.data.into_iter().map(|t| t.id));
    }

    assert_eq!(seen, vec![1, 2, 3, 4, 5]);

    // One page past the end is empty, not an error.
    let response = server
        .get("/todos")
        .add_query_param("page", "3")
        .add_query_param("size", "2")
        .await;
    response.assert_status_ok();
    let page: PageResponse = response.json();
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn test_list_zero_size_rejected() {
    let server = create_test_server();

    let response = server.get("/todos").add_query_param("size", "0").await;

    response.assert_status_bad_request();
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "page size must be a positive integer");
}

#[tokio::test]
async fn test_list_sorts_absent_due_dates_last_ascending() {
    let server = create_test_server();

    create_todo(&server, "no due", Priority::Medium).await;
    let request = json!({
        "text": "has due",
        "priority": "MEDIUM",
        "dueDate": "2025-01-01T00:00:00"
    });
    server.post("/todos").json(&request).await.assert_status_ok();

    let response = server
        .get("/todos")
        .add_query_param("sortBy", "duedate_asc")
        .await;
    let page: PageResponse = response.json();
    let texts: Vec<&str> = page.data.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["has due", "no due"]);
}

#[tokio::test]
async fn test_list_malformed_sort_spec_preserves_order() {
    let server = create_test_server();

    create_todo(&server, "first", Priority::Low).await;
    create_todo(&server, "second", Priority::High).await;

    let response = server
        .get("/todos")
        .add_query_param("sortBy", "priority")
        .await;
    let page: PageResponse = response.json();
    let texts: Vec<&str> = page.data.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn test_list_filters_by_status_text_and_priority() {
    let server = create_test_server();

    create_todo(&server, "Buy milk", Priority::High).await;
    create_todo(&server, "Buy bread", Priority::Low).await;
    let done = create_todo(&server, "Buy cheese", Priority::High).await;
    server
        .post(&format!("/todos/{}/done", done.id))
        .await
        .assert_status_ok();

    // status=done
    let response = server.get("/todos").add_query_param("status", "done").await;
    let page: PageResponse = response.json();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.data[0].text, "Buy cheese");

    // text filter is a case-insensitive substring match
    let response = server.get("/todos").add_query_param("text", "BUY").await;
    let page: PageResponse = response.json();
    assert_eq!(page.total_items, 3);

    // combined filters AND together
    let response = server
        .get("/todos")
        .add_query_param("status", "not-done")
        .add_query_param("priority", "HIGH")
        .await;
    let page: PageResponse = response.json();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.data[0].text, "Buy milk");
}

// =============================================================================
// UPDATE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let server = create_test_server();

    let response = server
        .put("/todos/42")
        .json(&json!({"text": "renamed"}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "todo not found with id: 42");
}

#[tokio::test]
async fn test_update_overwrites_provided_fields() {
    let server = create_test_server();

    let created = create_todo(&server, "original", Priority::Low).await;

    let response = server
        .put(&format!("/todos/{}", created.id))
        .json(&json!({"text": "renamed", "priority": "HIGH"}))
        .await;

    response.assert_status_ok();
    let updated: TodoJson = response.json();
    assert_eq!(updated.text, "renamed");
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.creation_date, created.creation_date);
}

#[tokio::test]
async fn test_update_omitted_due_date_clears_deadline() {
    let server = create_test_server();

    let request = json!({
        "text": "with due",
        "priority": "MEDIUM",
        "dueDate": "2025-06-01T00:00:00"
    });
    let created: TodoJson = server.post("/todos").json(&request).await.json();
    assert!(created.due_date.is_some());

    // dueDate omitted from the body: the deadline is cleared, while the
    // omitted text and priority stay unchanged.
    let response = server
        .put(&format!("/todos/{}", created.id))
        .json(&json!({}))
        .await;

    response.assert_status_ok();
    let updated: TodoJson = response.json();
    assert!(updated.due_date.is_none());
    assert_eq!(updated.text, "with due");
    assert_eq!(updated.priority, Priority::Medium);
}

#[tokio::test]
async fn test_update_oversized_text_rejected() {
    let server = create_test_server();

    let created = create_todo(&server, "task", Priority::Medium).await;

    let response = server
        .put(&format!("/todos/{}", created.id))
        .json(&json!({"text": "x".repeat(121)}))
        .await;

    response.assert_status_bad_request();
}

// =============================================================================
// DONE / UNDONE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_mark_done_stamps_done_date() {
    let server = create_test_server();

    let created = create_todo(&server, "task", Priority::High).await;

    let response = server.post(&format!("/todos/{}/done", created.id)).await;

    response.assert_status_ok();
    let done: TodoJson = response.json();
    assert!(done.done);
    assert!(done.done_date.is_some());
}

#[tokio::test]
async fn test_mark_done_is_idempotent() {
    let server = create_test_server();

    let created = create_todo(&server, "task", Priority::High).await;

    let first: TodoJson = server
        .post(&format!("/todos/{}/done", created.id))
        .await
        .json();
    let second: TodoJson = server
        .post(&format!("/todos/{}/done", created.id))
        .await
        .json();

    // Second call returns the identical record, same timestamp.
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_mark_undone_clears_done_date() {
    let server = create_test_server();

    let created = create_todo(&server, "task", Priority::High).await;
    server
        .post(&format!("/todos/{}/done", created.id))
        .await
        .assert_status_ok();

    let response = server.put(&format!("/todos/{}/undone", created.id)).await;

    response.assert_status_ok();
    let undone: TodoJson = response.json();
    assert!(!undone.done);
    assert!(undone.done_date.is_none());
}

#[tokio::test]
async fn test_mark_done_unknown_id_is_not_found() {
    let server = create_test_server();

    let response = server.post("/todos/99/done").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let response = server.put("/todos/99/undone").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// DELETE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_delete_returns_no_content() {
    let server = create_test_server();

    let created = create_todo(&server, "task", Priority::High).await;

    let response = server.delete(&format!("/todos/{}", created.id)).await;
    response.assert_status(StatusCode::NO_CONTENT);
    assert!(response.text().is_empty());

    // The record is gone.
    let page: PageResponse = server.get("/todos").await.json();
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn test_delete_unknown_id_is_not_found() {
    let server = create_test_server();

    let response = server.delete("/todos/7").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let error: ErrorResponse = response.json();
    assert_eq!(error.error, "todo not found with id: 7");
}

#[tokio::test]
async fn test_delete_twice_is_not_found() {
    let server = create_test_server();

    let created = create_todo(&server, "task", Priority::High).await;

    server
        .delete(&format!("/todos/{}", created.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete(&format!("/todos/{}", created.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

// =============================================================================
// ERROR HANDLING TESTS
// =============================================================================

#[tokio::test]
async fn test_404_on_unknown_endpoint() {
    let server = create_test_server();

    let response = server.get("/unknown").await;
    response.assert_status_not_found();
}

#[tokio::test]
async fn test_method_not_allowed() {
    let server = create_test_server();

    // /todos/{id} supports PUT and DELETE only.
    let response = server.get("/todos/1").await;
    assert_eq!(response.status_code().as_u16(), 405);
}

#[tokio::test]
async fn test_invalid_json_body() {
    let server = create_test_server();

    let response = server
        .post("/todos")
        .bytes(bytes::Bytes::from("not valid json"))
        .content_type("application/json")
        .await;

    assert!(response.status_code().is_client_error());
}
