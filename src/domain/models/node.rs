//! Node Domain Model
//!
//! A node is one deployable participant process of a network (peer, orderer,
//! CA). This module holds the requests that can be made about nodes once their
//! fields have been parsed; none of them are persisted here.

use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::agent::{Agent, AgentId};
use super::secret::SecretString;

/// Newtype wrapper for Node ID providing type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for NodeId {
    type Error = uuid::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(Self(Uuid::parse_str(value)?))
    }
}

/// Newtype wrapper for the ID of a user registered on a node's CA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeUserId(Uuid);

impl std::fmt::Display for NodeUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for NodeUserId {
    type Error = uuid::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Ok(Self(Uuid::parse_str(value)?))
    }
}

/// Kind of distributed-ledger network a node belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkType {
    Fabric,
    Other(String),
}

impl NetworkType {
    /// Parse a network type name, ignoring case
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        if normalized == "fabric" {
            Self::Fabric
        } else {
            Self::Other(normalized)
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fabric => "fabric",
            Self::Other(name) => name,
        }
    }

    #[must_use]
    pub fn is_fabric(&self) -> bool {
        matches!(self, Self::Fabric)
    }
}

impl std::fmt::Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NetworkType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Lifecycle status of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Deploying,
    Running,
    Stopped,
    Deleting,
    Error,
}

/// Operation that can be requested on a running node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeOperation {
    Start,
    Stop,
    Restart,
}

/// Which certificate authority a fabric CA node serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FabricCaServerType {
    #[default]
    Ecert,
    Tls,
}

/// Role of a user registered on a node's CA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeUserType {
    Peer,
    Orderer,
    User,
}

/// Registration status of a node user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeUserStatus {
    Registering,
    Registered,
    Fail,
}

/// Mapping of a host port to a container port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Port {
    pub external: u16,
    pub internal: u16,
}

/// CA settings attached to a fabric CA node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FabricCaConfig {
    pub admin_name: String,
    pub admin_password: SecretString,
    pub hosts: Vec<String>,
    pub ca_type: FabricCaServerType,
}

/// Node creation request as submitted, with the agent still referenced by id
#[derive(Debug, Clone)]
pub struct NodeCreationCommand {
    pub network_type: NetworkType,
    pub network_version: String,
    pub node_type: String,
    pub agent_type: Option<String>,
    pub agent_id: Option<AgentId>,
    pub ca: Option<FabricCaConfig>,
}

impl NodeCreationCommand {
    /// Attach the resolved agent, producing the request the creation rules run on
    #[must_use]
    pub fn resolve(self, agent: Option<Agent>) -> NodeCreationRequest {
        NodeCreationRequest {
            network_type: self.network_type,
            network_version: self.network_version,
            node_type: self.node_type,
            agent_type: self.agent_type,
            agent,
            ca: self.ca,
        }
    }
}

/// Node creation request with its agent reference resolved
#[derive(Debug, Clone)]
pub struct NodeCreationRequest {
    pub network_type: NetworkType,
    pub network_version: String,
    pub node_type: String,
    pub agent_type: Option<String>,
    pub agent: Option<Agent>,
    pub ca: Option<FabricCaConfig>,
}

/// Filters for listing nodes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeQuery {
    pub page: u32,
    pub per_page: u32,
    pub node_type: Option<String>,
    pub name: Option<String>,
    pub network_type: Option<NetworkType>,
    pub network_version: Option<String>,
    pub agent_id: Option<AgentId>,
}

/// Changes to an existing node
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeUpdate {
    pub status: Option<NodeStatus>,
    pub ports: Option<Vec<Port>>,
}

/// Metadata of an uploaded node archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeFile {
    pub file_name: String,
    pub size: u64,
}

/// User to register on a node's CA
#[derive(Debug, Clone)]
pub struct NodeUserRegistration {
    pub name: String,
    pub user_type: NodeUserType,
    pub secret: SecretString,
    pub attrs: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_type_parse() {
        assert_eq!(NetworkType::parse("fabric"), NetworkType::Fabric);
        assert_eq!(NetworkType::parse(" FaBrIc "), NetworkType::Fabric);
        assert_eq!(
            NetworkType::parse("Sawtooth"),
            NetworkType::Other("sawtooth".to_string())
        );
        assert!(NetworkType::Fabric.is_fabric());
        assert!(!NetworkType::parse("besu").is_fabric());
    }

    #[test]
    fn test_network_type_serializes_as_name() {
        assert_eq!(serde_json::to_string(&NetworkType::Fabric).unwrap(), "\"fabric\"");
    }

    #[test]
    fn test_enums_use_lowercase_names() {
        assert_eq!(serde_json::to_string(&NodeStatus::Running).unwrap(), "\"running\"");
        let op: NodeOperation = serde_json::from_str("\"restart\"").unwrap();
        assert_eq!(op, NodeOperation::Restart);
        assert!(serde_json::from_str::<NodeOperation>("\"Restart\"").is_err());
        assert_eq!(FabricCaServerType::default(), FabricCaServerType::Ecert);
    }

    #[test]
    fn test_command_resolve_keeps_fields() {
        let command = NodeCreationCommand {
            network_type: NetworkType::Fabric,
            network_version: "1.4".to_string(),
            node_type: "peer".to_string(),
            agent_type: Some("docker".to_string()),
            agent_id: None,
            ca: None,
        };
        let request = command.resolve(None);
        assert_eq!(request.network_type, NetworkType::Fabric);
        assert_eq!(request.network_version, "1.4");
        assert_eq!(request.node_type, "peer");
        assert_eq!(request.agent_type.as_deref(), Some("docker"));
        assert!(request.agent.is_none());
    }

    #[test]
    fn test_node_ids_parse() {
        let raw = "550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(NodeId::try_from(raw).unwrap().to_string(), raw);
        assert_eq!(NodeUserId::try_from(raw).unwrap().to_string(), raw);
        assert!(NodeId::try_from("42").is_err());
    }
}
