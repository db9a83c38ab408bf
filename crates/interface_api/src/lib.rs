//! HTTP API Layer
//!
//! This crate provides the REST API for the lecturer claims system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for claims, documents, review and HR
//! - **Middleware**: Caller identity from `X-User` / `X-Role`, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Routes
//!
//! ```text
//! GET    /health
//! GET    /health/ready
//! POST   /api/v1/claims                      submit (Lecturer)
//! GET    /api/v1/claims                      own claims (Lecturer)
//! POST   /api/v1/documents                   multipart upload
//! GET    /api/v1/documents/:name
//! GET    /api/v1/review/queue                pending claims with findings
//! GET    /api/v1/review/approved
//! GET    /api/v1/review/claims/:id           assessment
//! POST   /api/v1/review/claims/:id/approve
//! POST   /api/v1/review/claims/:id/reject
//! GET    /api/v1/hr/lecturers                (+ POST)
//! GET    /api/v1/hr/lecturers/:id            (+ PUT, DELETE deactivates)
//! GET    /api/v1/hr/employees/:employee_id
//! GET    /api/v1/hr/payment-claims?start=&end=
//! GET    /api/v1/hr/reports                  (+ POST generates)
//! GET    /api/v1/hr/reports/:id
//! GET    /api/v1/hr/reports/:id/csv
//! GET    /api/v1/hr/analytics
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, config::ApiConfig};
//!
//! let state = AppState::connect(ApiConfig::from_env()?).await?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{claims, documents, health, hr, review};
use crate::middleware::{audit_middleware, identity_middleware};

pub use crate::state::AppState;

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Services and configuration shared by every handler
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no identity required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Lecturer routes
    let claims_routes = Router::new().route(
        "/",
        post(claims::submit_claim).get(claims::list_my_claims),
    );

    // Document routes
    let document_routes = Router::new()
        .route(
            "/",
            post(documents::upload_document)
                .layer(DefaultBodyLimit::max(documents::UPLOAD_BODY_LIMIT)),
        )
        .route("/:name", get(documents::download_document));

    // Review routes
    let review_routes = Router::new()
        .route("/queue", get(review::review_queue))
        .route("/approved", get(review::approved_claims))
        .route("/claims/:id", get(review::assess_claim))
        .route("/claims/:id/approve", post(review::approve_claim))
        .route("/claims/:id/reject", post(review::reject_claim));

    // HR routes
    let hr_routes = Router::new()
        .route("/lecturers", get(hr::list_lecturers).post(hr::create_lecturer))
        .route(
            "/lecturers/:id",
            get(hr::get_lecturer)
                .put(hr::update_lecturer)
                .delete(hr::deactivate_lecturer),
        )
        .route("/employees/:employee_id", get(hr::get_lecturer_by_employee_id))
        .route("/payment-claims", get(hr::claims_for_payment))
        .route("/reports", get(hr::list_reports).post(hr::generate_report))
        .route("/reports/:id", get(hr::get_report))
        .route("/reports/:id/csv", get(hr::download_report))
        .route("/analytics", get(hr::analytics));

    // API routes, all acting as the caller named in the identity headers.
    // Audit wraps identity so refused callers are logged too.
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/documents", document_routes)
        .nest("/review", review_routes)
        .nest("/hr", hr_routes)
        .layer(axum_middleware::from_fn(identity_middleware))
        .layer(axum_middleware::from_fn(audit_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
