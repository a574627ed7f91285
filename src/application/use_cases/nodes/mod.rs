//! Node Use Cases
//!
//! Admission checks for node requests.

mod validate_node_creation;

pub use validate_node_creation::ValidateNodeCreationUseCase;
