//! Validate Node Creation Use Case
//!
//! Resolves the agent a creation request refers to, then applies the
//! node-creation rules.

use std::sync::Arc;

use crate::domain::gateways::AgentRepository;
use crate::domain::models::node::{NodeCreationCommand, NodeCreationRequest};
use crate::domain::services::NodeCreationValidator;
use crate::shared::errors::UseCaseError;

/// Use case for admitting a node creation request
pub struct ValidateNodeCreationUseCase {
    agent_repository: Arc<dyn AgentRepository>,
    validator: NodeCreationValidator,
}

impl ValidateNodeCreationUseCase {
    /// Create a new ValidateNodeCreationUseCase
    #[must_use]
    pub fn new(agent_repository: Arc<dyn AgentRepository>, validator: NodeCreationValidator) -> Self {
        Self {
            agent_repository,
            validator,
        }
    }

    /// Execute the use case
    ///
    /// An unknown agent id is a field error and is reported before any
    /// creation rule runs.
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` if the referenced agent does not exist.
    /// Returns `UseCaseError::NodeValidation` if a creation rule is violated.
    /// Returns `UseCaseError::Repository` if the agent directory fails.
    pub async fn execute(&self, command: NodeCreationCommand) -> Result<NodeCreationRequest, UseCaseError> {
        tracing::info!(
            network_type = %command.network_type,
            network_version = %command.network_version,
            node_type = %command.node_type,
            "Validating node creation request"
        );

        let agent = match command.agent_id {
            Some(agent_id) => {
                let agent = self.agent_repository.find_by_id(&agent_id).await?.ok_or_else(|| {
                    tracing::warn!(agent_id = %agent_id, "Referenced agent not found");
                    UseCaseError::Validation(vec![format!(
                        "agent: Agent with id '{agent_id}' does not exist"
                    )])
                })?;
                Some(agent)
            }
            None => None,
        };

        let request = self.validator.validate(command.resolve(agent)).map_err(|err| {
            tracing::warn!(reason = %err, code = err.error_code(), "Node creation request rejected");
            UseCaseError::from(err)
        })?;

        tracing::info!(node_type = %request.node_type, "Node creation request accepted");
        Ok(request)
    }
}
