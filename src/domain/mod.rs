//! Domain Layer
//!
//! Contains the node-creation rules, domain models, and gateway traits (ports).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;
pub mod services;

pub use gateways::agent_repository::AgentRepository;
pub use models::agent::{Agent, AgentId};
pub use models::node::{NetworkType, NodeCreationCommand, NodeCreationRequest, NodeId};
pub use models::reference::ReferenceTables;
pub use services::node_creation_validator::NodeCreationValidator;
