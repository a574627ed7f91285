//! Domain Services
//!
//! Stateless rules that span several fields of a request.

pub mod node_creation_validator;

pub use node_creation_validator::NodeCreationValidator;
