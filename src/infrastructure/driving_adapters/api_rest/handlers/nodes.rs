//! Node Handlers
//!
//! HTTP handlers validating node requests. Nothing is stored or deployed:
//! each endpoint answers with the normalized payload or a 4xx error.

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Path, Query, State},
    routing::{patch, post, put},
    Json, Router,
};
use validator::Validate;

use crate::domain::models::node::{NodeId, NodeUserId};
use crate::infrastructure::driving_adapters::api_rest::dto::node::{
    CreateNodeDto, NodeCreationResponseDto, NodeFileDto, NodeFileResponseDto, NodeOperationDto,
    NodeOperationResponseDto, NodeQueryDto, NodeQueryResponseDto, NodeUpdateDto, NodeUpdateResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::dto::node_user::{
    NodeUserCreateDto, NodeUserPatchDto, NodeUserPatchResponseDto, NodeUserResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for node validation endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(validate_node_creation).get(validate_node_query))
        .route("/:id", put(validate_node_update))
        .route("/:id/operations", post(validate_node_operation))
        .route("/:id/files", post(validate_node_file))
        .route("/:id/users", post(validate_node_user_creation))
        .route("/:id/users/:user_id", patch(validate_node_user_patch))
}

/// POST /validations/nodes - Validate a node creation request
///
/// `network_type` must be a registered network type and `agent_type`, when
/// present, a registered host type (`docker`, `kubernetes` by default). These
/// choice checks run before the creation rules, so an unregistered
/// `agent_type` is a `VALIDATION_ERROR` even if it would match the agent.
///
/// # Responses
///
/// * 200 OK - Request accepted, normalized attributes returned
/// * 400 Bad Request - Malformed body, field error, unregistered choice, or creation rule violated
#[axum::debug_handler]
async fn validate_node_creation(
    State(state): State<AppState>,
    payload: Result<Json<CreateNodeDto>, JsonRejection>,
) -> Result<Json<NodeCreationResponseDto>, ApiError> {
    let Json(dto) = payload?;

    // Field checks first, then choices, then the cross-field rules
    dto.validate()?;
    let command = dto.into_command(&state.reference_tables)?;

    let request = state.validate_node_creation_use_case.execute(command).await?;

    Ok(Json(NodeCreationResponseDto::from(request)))
}

/// GET /validations/nodes - Validate node list filters
///
/// # Responses
///
/// * 200 OK - Filters accepted, defaults applied
/// * 400 Bad Request - Malformed query or unregistered choice
#[axum::debug_handler]
async fn validate_node_query(
    State(state): State<AppState>,
    query: Result<Query<NodeQueryDto>, QueryRejection>,
) -> Result<Json<NodeQueryResponseDto>, ApiError> {
    let Query(dto) = query?;

    dto.validate()?;
    let query = dto.into_query(&state.reference_tables)?;

    tracing::debug!(page = query.page, per_page = query.per_page, "Node query accepted");
    Ok(Json(NodeQueryResponseDto::from(query)))
}

/// PUT /validations/nodes/:id - Validate a node update
///
/// # Responses
///
/// * 200 OK - Update accepted
/// * 400 Bad Request - Invalid UUID, status, or port mapping
#[axum::debug_handler]
async fn validate_node_update(
    Path(id): Path<String>,
    payload: Result<Json<NodeUpdateDto>, JsonRejection>,
) -> Result<Json<NodeUpdateResponseDto>, ApiError> {
    let node_id = NodeId::try_from(id.as_str())?;
    let Json(dto) = payload?;

    dto.validate()?;

    tracing::debug!(node_id = %node_id, "Node update accepted");
    Ok(Json(NodeUpdateResponseDto::new(node_id, dto.into())))
}

/// POST /validations/nodes/:id/operations - Validate a node operation
///
/// # Responses
///
/// * 200 OK - Operation accepted
/// * 400 Bad Request - Invalid UUID or unknown action
#[axum::debug_handler]
async fn validate_node_operation(
    Path(id): Path<String>,
    payload: Result<Json<NodeOperationDto>, JsonRejection>,
) -> Result<Json<NodeOperationResponseDto>, ApiError> {
    let node_id = NodeId::try_from(id.as_str())?;
    let Json(dto) = payload?;

    tracing::debug!(node_id = %node_id, action = ?dto.action, "Node operation accepted");
    Ok(Json(NodeOperationResponseDto {
        id: node_id.to_string(),
        action: dto.action,
    }))
}

/// POST /validations/nodes/:id/files - Validate a node archive upload
///
/// # Responses
///
/// * 200 OK - Archive metadata accepted
/// * 400 Bad Request - Invalid UUID, extension, or size
#[axum::debug_handler]
async fn validate_node_file(
    Path(id): Path<String>,
    payload: Result<Json<NodeFileDto>, JsonRejection>,
) -> Result<Json<NodeFileResponseDto>, ApiError> {
    let node_id = NodeId::try_from(id.as_str())?;
    let Json(dto) = payload?;

    dto.validate()?;

    Ok(Json(NodeFileResponseDto::new(node_id, dto.into())))
}

/// POST /validations/nodes/:id/users - Validate a node user registration
///
/// # Responses
///
/// * 200 OK - Registration accepted (secret not echoed)
/// * 400 Bad Request - Invalid UUID, user type, or field lengths
#[axum::debug_handler]
async fn validate_node_user_creation(
    Path(id): Path<String>,
    payload: Result<Json<NodeUserCreateDto>, JsonRejection>,
) -> Result<Json<NodeUserResponseDto>, ApiError> {
    let node_id = NodeId::try_from(id.as_str())?;
    let Json(dto) = payload?;

    dto.validate()?;

    tracing::debug!(node_id = %node_id, user_type = ?dto.user_type, "Node user registration accepted");
    Ok(Json(NodeUserResponseDto::new(node_id, dto.into())))
}

/// PATCH /validations/nodes/:id/users/:user_id - Validate a node user status change
///
/// # Responses
///
/// * 200 OK - Status change accepted
/// * 400 Bad Request - Invalid UUID or unknown status
#[axum::debug_handler]
async fn validate_node_user_patch(
    Path((id, user_id)): Path<(String, String)>,
    payload: Result<Json<NodeUserPatchDto>, JsonRejection>,
) -> Result<Json<NodeUserPatchResponseDto>, ApiError> {
    let node_id = NodeId::try_from(id.as_str())?;
    let user_id = NodeUserId::try_from(user_id.as_str())?;
    let Json(dto) = payload?;

    Ok(Json(NodeUserPatchResponseDto::new(node_id, user_id, dto.status)))
}
