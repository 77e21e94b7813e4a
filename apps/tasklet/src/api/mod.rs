//! # Tasklet HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /todos` - List todos (filter, sort, paginate)
//! - `POST /todos` - Create a todo
//! - `PUT /todos/{id}` - Update a todo
//! - `POST /todos/{id}/done` - Mark a todo done
//! - `PUT /todos/{id}/undone` - Reopen a todo
//! - `DELETE /todos/{id}` - Delete a todo
//! - `GET /health` - Health check
//!
//! ## Configuration (Environment Variables)
//!
//! - `TASKLET_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `TASKLET_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

mod handlers;
mod middleware;
mod types;

// Re-export handlers and types for integration tests (via `tasklet::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    create_handler, delete_handler, done_handler, health_handler, list_handler, undone_handler,
    update_handler,
};
pub use middleware::RateLimit;
#[allow(unused_imports)]
pub use types::{
    CreateTodoRequest, ErrorResponse, HealthResponse, PageResponse, TodoJson, UpdateTodoRequest,
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tasklet_core::TodoService;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the todo service.
///
/// The single read/write lock is the mutual-exclusion discipline the core
/// requires when exposed behind a concurrent server: one writer at a time,
/// readers see a consistent snapshot.
#[derive(Clone)]
pub struct AppState {
    /// The service facade over the in-memory store.
    pub service: Arc<RwLock<TodoService>>,
}

impl AppState {
    /// Create new app state wrapping a service.
    #[must_use]
    pub fn new(service: TodoService) -> Self {
        Self {
            service: Arc::new(RwLock::new(service)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `TASKLET_CORS_ORIGINS` environment variable:
/// - If "*": allows all origins (development mode - use with caution!)
/// - If not set: defaults to localhost only (restrictive default)
/// - Otherwise: parses comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("TASKLET_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (TASKLET_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in TASKLET_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No TASKLET_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit - caps request payloads
/// 4. Rate limiting - protects against request floods (if enabled)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let rate_limiter = RateLimit::from_env().into_limiter();
    match &rate_limiter {
        Some(_) => tracing::info!("Rate limiting enabled"),
        None => tracing::info!("Rate limiting disabled"),
    }

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route(
            "/todos",
            get(handlers::list_handler).post(handlers::create_handler),
        )
        .route(
            "/todos/{id}",
            put(handlers::update_handler).delete(handlers::delete_handler),
        )
        .route("/todos/{id}/done", post(handlers::done_handler))
        .route("/todos/{id}/undone", put(handlers::undone_handler));

    // Apply rate limiting middleware (innermost - runs last on request)
    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    // Apply body limit, CORS and tracing (outermost layers)
    router
        .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server, serving until the process is stopped.
pub async fn run_server(addr: &str, service: TodoService) -> std::io::Result<()> {
    let state = AppState::new(service);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Tasklet HTTP server listening on {}", addr);

    axum::serve(listener, router).await
}
