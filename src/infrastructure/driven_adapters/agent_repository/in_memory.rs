//! In-Memory Agent Repository Implementation
//!
//! Serves the agents listed in configuration. The directory is fixed at
//! startup; lookups never block.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::gateways::AgentRepository;
use crate::domain::models::agent::{Agent, AgentId};
use crate::domain::models::reference::ReferenceTables;
use crate::infrastructure::driven_adapters::config::AgentConfig;
use crate::shared::errors::RepositoryError;

/// Agent directory backed by a `HashMap`
#[derive(Debug, Default)]
pub struct InMemoryAgentRepository {
    agents: HashMap<AgentId, Agent>,
}

impl InMemoryAgentRepository {
    /// Build the directory from configured agents
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Mapping` on a duplicate agent id or an agent
    /// whose type is not a registered host type.
    pub fn from_config(agents: &[AgentConfig], tables: &ReferenceTables) -> Result<Self, RepositoryError> {
        let mut directory = HashMap::with_capacity(agents.len());

        for entry in agents {
            if !tables.is_host_type(&entry.agent_type) {
                return Err(RepositoryError::Mapping(format!(
                    "Agent '{}' has unknown type '{}'",
                    entry.name, entry.agent_type
                )));
            }

            let id = AgentId::from_uuid(entry.id);
            let agent = Agent::new(id, entry.name.clone(), entry.agent_type.clone());
            if directory.insert(id, agent).is_some() {
                return Err(RepositoryError::Mapping(format!("Duplicate agent id {id}")));
            }
        }

        tracing::debug!(count = directory.len(), "Agent directory loaded");
        Ok(Self { agents: directory })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn find_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
        Ok(self.agents.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn entry(id: Uuid, name: &str, agent_type: &str) -> AgentConfig {
        AgentConfig {
            id,
            name: name.to_string(),
            agent_type: agent_type.to_string(),
        }
    }

    #[tokio::test]
    async fn should_find_configured_agent() {
        let id = Uuid::new_v4();
        let repo = InMemoryAgentRepository::from_config(
            &[entry(id, "docker-host-1", "docker")],
            &ReferenceTables::default(),
        )
        .unwrap();

        let agent = repo.find_by_id(&AgentId::from_uuid(id)).await.unwrap().unwrap();
        assert_eq!(agent.name(), "docker-host-1");
        assert_eq!(agent.agent_type(), "docker");

        assert!(repo.find_by_id(&AgentId::new()).await.unwrap().is_none());
    }

    #[test]
    fn should_reject_duplicate_ids() {
        let id = Uuid::new_v4();
        let result = InMemoryAgentRepository::from_config(
            &[entry(id, "a", "docker"), entry(id, "b", "kubernetes")],
            &ReferenceTables::default(),
        );

        assert!(matches!(result, Err(RepositoryError::Mapping(_))));
    }

    #[test]
    fn should_reject_unknown_host_type() {
        let result = InMemoryAgentRepository::from_config(
            &[entry(Uuid::new_v4(), "vm", "vmware")],
            &ReferenceTables::default(),
        );

        assert!(matches!(result, Err(RepositoryError::Mapping(_))));
    }

    #[test]
    fn should_build_empty_directory() {
        let repo = InMemoryAgentRepository::from_config(&[], &ReferenceTables::default()).unwrap();
        assert!(repo.is_empty());
        assert_eq!(repo.len(), 0);
    }
}
