//! REST API Module
//!
//! Contains HTTP handlers, DTOs, and middleware for the REST API.

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::Router;

use crate::application::use_cases::nodes::ValidateNodeCreationUseCase;
use crate::domain::models::reference::ReferenceTables;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub reference_tables: Arc<ReferenceTables>,
    pub validate_node_creation_use_case: Arc<ValidateNodeCreationUseCase>,
}

/// Build the API router with request-id propagation
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/validations/nodes", handlers::nodes::router())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .with_state(state)
}
