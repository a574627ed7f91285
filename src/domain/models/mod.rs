//! Domain Models
//!
//! Pure domain entities and value objects representing business concepts.

pub mod agent;
pub mod node;
pub mod reference;
pub mod secret;

pub use agent::{Agent, AgentId};
pub use node::{
    FabricCaConfig, FabricCaServerType, NetworkType, NodeCreationCommand, NodeCreationRequest,
    NodeFile, NodeId, NodeOperation, NodeQuery, NodeStatus, NodeUpdate, NodeUserId,
    NodeUserRegistration, NodeUserStatus, NodeUserType, Port,
};
pub use reference::ReferenceTables;
pub use secret::SecretString;
