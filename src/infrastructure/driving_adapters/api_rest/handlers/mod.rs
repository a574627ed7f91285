//! HTTP Handlers

pub mod nodes;
