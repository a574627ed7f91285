//! Fabric Node Admission API
//!
//! A Rust-based microservice that validates node-management requests for
//! blockchain fabric networks, following Clean/Hexagonal Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
