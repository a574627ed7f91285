//! Agent Domain Model
//!
//! An agent is the execution host (docker daemon, kubernetes cluster) that
//! runs a node's workload.

use uuid::Uuid;

/// Newtype wrapper for Agent ID providing type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentId(Uuid);

impl AgentId {
    /// Create a new random AgentId
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an AgentId from an existing UUID
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AgentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl TryFrom<&str> for AgentId {
    type Error = uuid::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(Self(Uuid::parse_str(value)?))
    }
}

/// Registered agent as seen by node requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    id: AgentId,
    name: String,
    agent_type: String,
}

impl Agent {
    #[must_use]
    pub fn new(id: AgentId, name: impl Into<String>, agent_type: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            agent_type: agent_type.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &AgentId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Host type of the agent (e.g. `docker`, `kubernetes`)
    #[must_use]
    pub fn agent_type(&self) -> &str {
        &self.agent_type
    }
}
