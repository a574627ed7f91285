//! Node Creation Validator
//!
//! Cross-field rules deciding which combinations of network type, version,
//! node type and agent are accepted for a new node.

use std::sync::Arc;

use crate::domain::models::node::NodeCreationRequest;
use crate::domain::models::reference::ReferenceTables;
use crate::shared::errors::NodeValidationError;

/// Applies the node-creation rules against the reference tables
#[derive(Debug, Clone)]
pub struct NodeCreationValidator {
    tables: Arc<ReferenceTables>,
}

impl NodeCreationValidator {
    #[must_use]
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    /// Validate a creation request, returning it unchanged when accepted
    ///
    /// Rules run in a fixed order and the first violation wins:
    /// 1. fabric networks need a known fabric version, then a known node type
    /// 2. at least one of `agent_type` / `agent` is set
    /// 3. when both are set, `agent_type` matches the agent's own type
    ///
    /// Non-fabric network types are not checked against any table.
    ///
    /// # Errors
    ///
    /// Returns the first `NodeValidationError` the request violates.
    pub fn validate(&self, request: NodeCreationRequest) -> Result<NodeCreationRequest, NodeValidationError> {
        if request.network_type.is_fabric() {
            if !self.tables.is_fabric_version(&request.network_version) {
                return Err(NodeValidationError::InvalidFabricVersion {
                    version: request.network_version,
                });
            }
            if !self.tables.is_fabric_node_type(&request.node_type) {
                return Err(NodeValidationError::InvalidNodeTypeForNetwork {
                    node_type: request.node_type,
                    network_type: request.network_type.to_string(),
                });
            }
        }

        match (&request.agent_type, &request.agent) {
            (None, None) => return Err(NodeValidationError::MissingAgentSpecification),
            (Some(agent_type), Some(agent)) if agent_type != agent.agent_type() => {
                return Err(NodeValidationError::AgentTypeMismatch {
                    agent_type: agent_type.clone(),
                    agent: agent.agent_type().to_string(),
                });
            }
            _ => {}
        }

        tracing::debug!(
            network_type = %request.network_type,
            node_type = %request.node_type,
            "Node creation request satisfies creation rules"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::agent::{Agent, AgentId};
    use crate::domain::models::node::NetworkType;

    fn validator() -> NodeCreationValidator {
        NodeCreationValidator::new(Arc::new(ReferenceTables::default()))
    }

    fn request(network_type: &str, version: &str, node_type: &str) -> NodeCreationRequest {
        NodeCreationRequest {
            network_type: NetworkType::parse(network_type),
            network_version: version.to_string(),
            node_type: node_type.to_string(),
            agent_type: None,
            agent: None,
            ca: None,
        }
    }

    fn agent_of_type(agent_type: &str) -> Agent {
        Agent::new(AgentId::new(), "host-1", agent_type)
    }

    #[test]
    fn should_accept_fabric_peer_unchanged() {
        let mut candidate = request("fabric", "1.4", "peer");
        candidate.agent_type = Some("fabric-peer".to_string());

        let accepted = validator().validate(candidate).unwrap();

        assert_eq!(accepted.network_type, NetworkType::Fabric);
        assert_eq!(accepted.network_version, "1.4");
        assert_eq!(accepted.node_type, "peer");
        assert_eq!(accepted.agent_type.as_deref(), Some("fabric-peer"));
        assert!(accepted.agent.is_none());
    }

    #[test]
    fn should_reject_unknown_fabric_version() {
        for version in ["1.3", "2.5", "", "1.4 "] {
            let mut candidate = request("fabric", version, "peer");
            candidate.agent_type = Some("docker".to_string());

            let err = validator().validate(candidate).unwrap_err();
            assert!(
                matches!(err, NodeValidationError::InvalidFabricVersion { .. }),
                "version {version:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn should_reject_unknown_fabric_node_type() {
        for node_type in ["miner", "Peer", ""] {
            let mut candidate = request("fabric", "2.2", node_type);
            candidate.agent_type = Some("docker".to_string());

            let err = validator().validate(candidate).unwrap_err();
            assert_eq!(
                err,
                NodeValidationError::InvalidNodeTypeForNetwork {
                    node_type: node_type.to_string(),
                    network_type: "fabric".to_string(),
                }
            );
        }
    }

    #[test]
    fn should_match_network_type_case_insensitively() {
        let mut candidate = request("FABRIC", "9.9", "peer");
        candidate.agent_type = Some("docker".to_string());

        let err = validator().validate(candidate).unwrap_err();
        assert!(matches!(err, NodeValidationError::InvalidFabricVersion { .. }));
    }

    #[test]
    fn should_skip_whitelists_for_other_network_types() {
        let mut candidate = request("sawtooth", "0.0.1-anything", "validator");
        candidate.agent_type = Some("docker".to_string());

        assert!(validator().validate(candidate).is_ok());
    }

    #[test]
    fn should_reject_missing_agent_specification() {
        let err = validator().validate(request("fabric", "1.4", "orderer")).unwrap_err();
        assert_eq!(err, NodeValidationError::MissingAgentSpecification);

        let err = validator().validate(request("sawtooth", "1", "x")).unwrap_err();
        assert_eq!(err, NodeValidationError::MissingAgentSpecification);
    }

    #[test]
    fn should_report_network_rule_before_agent_rule() {
        let err = validator().validate(request("fabric", "0.1", "peer")).unwrap_err();
        assert!(matches!(err, NodeValidationError::InvalidFabricVersion { .. }));

        let err = validator().validate(request("fabric", "1.4", "miner")).unwrap_err();
        assert!(matches!(err, NodeValidationError::InvalidNodeTypeForNetwork { .. }));
    }

    #[test]
    fn should_reject_agent_type_mismatch() {
        let mut candidate = request("fabric", "1.4", "peer");
        candidate.agent_type = Some("orderer".to_string());
        candidate.agent = Some(agent_of_type("peer"));

        let err = validator().validate(candidate).unwrap_err();
        assert_eq!(
            err,
            NodeValidationError::AgentTypeMismatch {
                agent_type: "orderer".to_string(),
                agent: "peer".to_string(),
            }
        );
    }

    #[test]
    fn should_accept_agent_alone_or_with_matching_type() {
        let mut only_agent = request("fabric", "1.4", "ca");
        only_agent.agent = Some(agent_of_type("kubernetes"));
        assert!(validator().validate(only_agent).is_ok());

        let mut both = request("fabric", "1.4", "ca");
        both.agent_type = Some("kubernetes".to_string());
        both.agent = Some(agent_of_type("kubernetes"));
        assert!(validator().validate(both).is_ok());
    }

    #[test]
    fn should_use_configured_tables() {
        let tables = ReferenceTables::new(["3.0"], ["peer"], ["fabric"], ["docker"]);
        let validator = NodeCreationValidator::new(Arc::new(tables));

        let mut candidate = request("fabric", "1.4", "peer");
        candidate.agent_type = Some("docker".to_string());
        assert!(validator.validate(candidate.clone()).is_err());

        candidate.network_version = "3.0".to_string();
        assert!(validator.validate(candidate).is_ok());
    }
}
