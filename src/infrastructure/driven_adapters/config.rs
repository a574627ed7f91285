//! Application Configuration
//!
//! Loads configuration from files and environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::models::reference::{
    ReferenceTables, DEFAULT_FABRIC_NODE_TYPES, DEFAULT_FABRIC_VERSIONS, DEFAULT_HOST_TYPES,
    DEFAULT_NETWORK_TYPES,
};

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directives, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "fabric_node_admission=debug,tower_http=debug".to_string()
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

/// Accepted values for choice fields
#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceConfig {
    #[serde(default = "default_fabric_versions")]
    pub fabric_versions: Vec<String>,
    #[serde(default = "default_fabric_node_types")]
    pub fabric_node_types: Vec<String>,
    #[serde(default = "default_network_types")]
    pub network_types: Vec<String>,
    #[serde(default = "default_host_types")]
    pub host_types: Vec<String>,
}

fn default_fabric_versions() -> Vec<String> {
    owned(DEFAULT_FABRIC_VERSIONS)
}

fn default_fabric_node_types() -> Vec<String> {
    owned(DEFAULT_FABRIC_NODE_TYPES)
}

fn default_network_types() -> Vec<String> {
    owned(DEFAULT_NETWORK_TYPES)
}

fn default_host_types() -> Vec<String> {
    owned(DEFAULT_HOST_TYPES)
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            fabric_versions: default_fabric_versions(),
            fabric_node_types: default_fabric_node_types(),
            network_types: default_network_types(),
            host_types: default_host_types(),
        }
    }
}

impl From<&ReferenceConfig> for ReferenceTables {
    fn from(config: &ReferenceConfig) -> Self {
        ReferenceTables::new(
            config.fabric_versions.iter().cloned(),
            config.fabric_node_types.iter().cloned(),
            config.network_types.iter().cloned(),
            config.host_types.iter().cloned(),
        )
    }
}

/// An agent known to the directory
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub agent_type: String,
}

/// `APP__`-prefixed environment overrides; list values are comma-separated
/// (e.g., `APP__REFERENCE__FABRIC_VERSIONS=1.4,2.2,2.5`)
fn environment() -> Environment {
    Environment::with_prefix("APP")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("reference.fabric_versions")
        .with_list_parse_key("reference.fabric_node_types")
        .with_list_parse_key("reference.network_types")
        .with_list_parse_key("reference.host_types")
        .try_parsing(true)
}

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub agents: Vec<AgentConfig>,
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `config/default` is missing or a value has the wrong shape.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "default".into());

        Config::builder()
            // Start with default config
            .add_source(File::with_name("config/default").required(true))
            // Merge environment-specific config if it exists
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Override with environment variables (e.g., APP__SERVER__PORT)
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Reference tables described by this configuration
    #[must_use]
    pub fn reference_tables(&self) -> ReferenceTables {
        ReferenceTables::from(&self.reference)
    }
}
