//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Agent directory
//! - Configuration

pub mod agent_repository;
pub mod config;

pub use agent_repository::InMemoryAgentRepository;
pub use config::AppConfig;
