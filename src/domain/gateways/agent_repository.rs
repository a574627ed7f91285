//! Agent Repository Gateway
//!
//! Resolves agent references carried by node requests.

use async_trait::async_trait;

use crate::domain::models::agent::{Agent, AgentId};
use crate::shared::errors::RepositoryError;

/// Read-only lookup of registered agents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Find an agent by its ID
    async fn find_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError>;
}
