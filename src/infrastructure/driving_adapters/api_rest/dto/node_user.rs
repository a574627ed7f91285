//! Node User DTOs
//!
//! Users registered on a node's certificate authority.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::models::node::{NodeId, NodeUserId, NodeUserRegistration, NodeUserStatus, NodeUserType};
use crate::domain::models::secret::SecretString;

/// Validates the enrollment secret length
fn validate_user_secret(secret: &SecretString) -> Result<(), ValidationError> {
    let len = secret.expose_secret().chars().count();
    if (1..=128).contains(&len) {
        Ok(())
    } else {
        let mut error = ValidationError::new("length");
        error.message = Some("secret must be between 1 and 128 characters".into());
        Err(error)
    }
}

/// DTO for registering a user on a node
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NodeUserCreateDto {
    #[validate(length(min = 1, max = 128, message = "name must be between 1 and 128 characters"))]
    pub name: String,

    pub user_type: NodeUserType,

    #[validate(custom(function = "validate_user_secret"))]
    pub secret: SecretString,

    #[serde(default)]
    #[validate(length(max = 512, message = "attrs must be at most 512 characters"))]
    pub attrs: String,
}

impl From<NodeUserCreateDto> for NodeUserRegistration {
    fn from(dto: NodeUserCreateDto) -> Self {
        Self {
            name: dto.name,
            user_type: dto.user_type,
            secret: dto.secret,
            attrs: dto.attrs,
        }
    }
}

/// Accepted user registration (the secret is never returned)
#[derive(Debug, Clone, Serialize)]
pub struct NodeUserResponseDto {
    pub node_id: String,
    pub name: String,
    pub user_type: NodeUserType,
    pub attrs: String,
}

impl NodeUserResponseDto {
    #[must_use]
    pub fn new(node_id: NodeId, registration: NodeUserRegistration) -> Self {
        Self {
            node_id: node_id.to_string(),
            name: registration.name,
            user_type: registration.user_type,
            attrs: registration.attrs,
        }
    }
}

/// DTO for changing a node user's status
#[derive(Debug, Clone, Deserialize)]
pub struct NodeUserPatchDto {
    pub status: NodeUserStatus,
}

/// Accepted node user status change
#[derive(Debug, Clone, Serialize)]
pub struct NodeUserPatchResponseDto {
    pub node_id: String,
    pub id: String,
    pub status: NodeUserStatus,
}

impl NodeUserPatchResponseDto {
    #[must_use]
    pub fn new(node_id: NodeId, user_id: NodeUserId, status: NodeUserStatus) -> Self {
        Self {
            node_id: node_id.to_string(),
            id: user_id.to_string(),
            status,
        }
    }
}
