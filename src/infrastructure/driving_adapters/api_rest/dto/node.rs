//! Node DTOs
//!
//! Data transfer objects for node validation endpoints.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::models::agent::AgentId;
use crate::domain::models::node::{
    FabricCaConfig, FabricCaServerType, NetworkType, NodeCreationCommand, NodeCreationRequest,
    NodeFile, NodeId, NodeOperation, NodeQuery, NodeStatus, NodeUpdate, Port,
};
use crate::domain::models::reference::ReferenceTables;
use crate::domain::models::secret::SecretString;

lazy_static! {
    /// Regex for accepted node archive names (`.tar.gz` or `.tgz`)
    static ref NODE_ARCHIVE_REGEX: Regex = Regex::new(r"(?i)^[^/\\]+\.(tar\.gz|tgz)$").expect("valid regex");
}

fn validation_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Record that `value` is not one of `choices`
fn add_choice_error<'a>(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    choices: impl Iterator<Item = &'a str>,
) {
    let expected: Vec<&str> = choices.collect();
    errors.add(
        field,
        validation_error(
            "choice",
            format!("\"{value}\" is not a valid choice (expected one of: {})", expected.join(", ")),
        ),
    );
}

/// Validates a node archive file name
fn validate_archive_name(name: &str) -> Result<(), ValidationError> {
    if NODE_ARCHIVE_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(validation_error(
            "file_extension",
            "File must be a .tar.gz or .tgz archive".to_string(),
        ))
    }
}

/// Validates CA host names (each 1 to 64 characters)
fn validate_host_list(hosts: &[String]) -> Result<(), ValidationError> {
    for host in hosts {
        if host.is_empty() || host.chars().count() > 64 {
            return Err(validation_error(
                "host_length",
                "Each host must be between 1 and 64 characters".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates the CA admin password length
fn validate_ca_password(password: &SecretString) -> Result<(), ValidationError> {
    let len = password.expose_secret().chars().count();
    if (1..=32).contains(&len) {
        Ok(())
    } else {
        Err(validation_error(
            "length",
            "admin_password must be between 1 and 32 characters".to_string(),
        ))
    }
}

fn default_admin_name() -> String {
    "admin".to_string()
}

fn default_admin_password() -> SecretString {
    SecretString::new("adminpw")
}

/// DTO for the CA configuration of a node
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FabricCaDto {
    #[serde(default = "default_admin_name")]
    #[validate(length(min = 1, max = 32, message = "admin_name must be between 1 and 32 characters"))]
    pub admin_name: String,

    #[serde(default = "default_admin_password")]
    #[validate(custom(function = "validate_ca_password"))]
    pub admin_password: SecretString,

    #[serde(default)]
    #[validate(custom(function = "validate_host_list"))]
    pub hosts: Vec<String>,

    #[serde(default, rename = "type")]
    pub ca_type: FabricCaServerType,
}

impl From<FabricCaDto> for FabricCaConfig {
    fn from(dto: FabricCaDto) -> Self {
        Self {
            admin_name: dto.admin_name,
            admin_password: dto.admin_password,
            hosts: dto.hosts,
            ca_type: dto.ca_type,
        }
    }
}

/// DTO for a node creation request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNodeDto {
    #[validate(length(min = 1, max = 64, message = "network_type must be between 1 and 64 characters"))]
    pub network_type: String,

    #[validate(length(min = 1, max = 64, message = "network_version must be between 1 and 64 characters"))]
    pub network_version: String,

    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 64, message = "type must be between 1 and 64 characters"))]
    pub node_type: String,

    pub agent_type: Option<String>,

    pub agent: Option<Uuid>,

    #[validate(nested)]
    pub ca: Option<FabricCaDto>,
}

impl CreateNodeDto {
    /// Check choice fields against the reference tables
    ///
    /// Call after `validate()`; only `network_type` and `agent_type` are
    /// choice fields here. Version and node type are creation rules.
    ///
    /// # Errors
    ///
    /// Returns the field errors for every unregistered choice.
    pub fn into_command(self, tables: &ReferenceTables) -> Result<NodeCreationCommand, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let network_type = tables.network_type(&self.network_type);
        if network_type.is_none() {
            add_choice_error(&mut errors, "network_type", &self.network_type, tables.network_types());
        }
        if let Some(agent_type) = &self.agent_type {
            if !tables.is_host_type(agent_type) {
                add_choice_error(&mut errors, "agent_type", agent_type, tables.host_types());
            }
        }

        match network_type {
            Some(network_type) if errors.is_empty() => Ok(NodeCreationCommand {
                network_type,
                network_version: self.network_version,
                node_type: self.node_type,
                agent_type: self.agent_type,
                agent_id: self.agent.map(AgentId::from_uuid),
                ca: self.ca.map(FabricCaConfig::from),
            }),
            _ => Err(errors),
        }
    }
}

/// CA configuration echoed back (the admin password is never returned)
#[derive(Debug, Clone, Serialize)]
pub struct FabricCaResponseDto {
    pub admin_name: String,
    pub hosts: Vec<String>,
    #[serde(rename = "type")]
    pub ca_type: FabricCaServerType,
}

/// Accepted node creation request
#[derive(Debug, Clone, Serialize)]
pub struct NodeCreationResponseDto {
    pub network_type: NetworkType,
    pub network_version: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub agent_type: Option<String>,
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<FabricCaResponseDto>,
}

impl From<NodeCreationRequest> for NodeCreationResponseDto {
    fn from(request: NodeCreationRequest) -> Self {
        Self {
            network_type: request.network_type,
            network_version: request.network_version,
            node_type: request.node_type,
            agent_type: request.agent_type,
            agent: request.agent.map(|agent| agent.id().to_string()),
            ca: request.ca.map(|ca| FabricCaResponseDto {
                admin_name: ca.admin_name,
                hosts: ca.hosts,
                ca_type: ca.ca_type,
            }),
        }
    }
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    10
}

/// DTO for node list filters (query string)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NodeQueryDto {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: u32,

    #[serde(default = "default_per_page")]
    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    pub per_page: u32,

    #[serde(rename = "type")]
    pub node_type: Option<String>,

    #[validate(length(max = 64, message = "name must be at most 64 characters"))]
    pub name: Option<String>,

    pub network_type: Option<String>,

    pub network_version: Option<String>,

    pub agent_id: Option<Uuid>,
}

impl NodeQueryDto {
    /// Check choice filters against the reference tables
    ///
    /// # Errors
    ///
    /// Returns the field errors for every unregistered choice.
    pub fn into_query(self, tables: &ReferenceTables) -> Result<NodeQuery, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(node_type) = &self.node_type {
            if !tables.is_fabric_node_type(node_type) {
                add_choice_error(&mut errors, "type", node_type, tables.fabric_node_types());
            }
        }
        let network_type = match &self.network_type {
            Some(raw) => {
                let parsed = tables.network_type(raw);
                if parsed.is_none() {
                    add_choice_error(&mut errors, "network_type", raw, tables.network_types());
                }
                parsed
            }
            None => None,
        };
        if let Some(version) = &self.network_version {
            if !tables.is_fabric_version(version) {
                add_choice_error(&mut errors, "network_version", version, tables.fabric_versions());
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NodeQuery {
            page: self.page,
            per_page: self.per_page,
            node_type: self.node_type,
            name: self.name,
            network_type,
            network_version: self.network_version,
            agent_id: self.agent_id.map(AgentId::from_uuid),
        })
    }
}

/// Normalized node list filters
#[derive(Debug, Clone, Serialize)]
pub struct NodeQueryResponseDto {
    pub page: u32,
    pub per_page: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_type: Option<NetworkType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

impl From<NodeQuery> for NodeQueryResponseDto {
    fn from(query: NodeQuery) -> Self {
        Self {
            page: query.page,
            per_page: query.per_page,
            node_type: query.node_type,
            name: query.name,
            network_type: query.network_type,
            network_version: query.network_version,
            agent_id: query.agent_id.map(|id| id.to_string()),
        }
    }
}

/// DTO for one port mapping
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PortDto {
    #[validate(range(min = 1, message = "external must be between 1 and 65535"))]
    pub external: u16,

    #[validate(range(min = 1, message = "internal must be between 1 and 65535"))]
    pub internal: u16,
}

impl From<PortDto> for Port {
    fn from(dto: PortDto) -> Self {
        Self {
            external: dto.external,
            internal: dto.internal,
        }
    }
}

/// DTO for updating a node
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NodeUpdateDto {
    pub status: Option<NodeStatus>,

    #[validate(nested)]
    pub ports: Option<Vec<PortDto>>,
}

impl From<NodeUpdateDto> for NodeUpdate {
    fn from(dto: NodeUpdateDto) -> Self {
        Self {
            status: dto.status,
            ports: dto.ports.map(|ports| ports.into_iter().map(Port::from).collect()),
        }
    }
}

/// Accepted node update
#[derive(Debug, Clone, Serialize)]
pub struct NodeUpdateResponseDto {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<NodeStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<Port>>,
}

impl NodeUpdateResponseDto {
    #[must_use]
    pub fn new(id: NodeId, update: NodeUpdate) -> Self {
        Self {
            id: id.to_string(),
            status: update.status,
            ports: update.ports,
        }
    }
}

/// DTO for an operation on a node
#[derive(Debug, Clone, Deserialize)]
pub struct NodeOperationDto {
    pub action: NodeOperation,
}

/// Accepted node operation
#[derive(Debug, Clone, Serialize)]
pub struct NodeOperationResponseDto {
    pub id: String,
    pub action: NodeOperation,
}

/// DTO describing an uploaded node archive
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NodeFileDto {
    #[validate(custom(function = "validate_archive_name"))]
    pub file_name: String,

    #[validate(range(min = 1, max = 52428800, message = "Max file size is 50M"))]
    pub size: u64,
}

impl From<NodeFileDto> for NodeFile {
    fn from(dto: NodeFileDto) -> Self {
        Self {
            file_name: dto.file_name,
            size: dto.size,
        }
    }
}

/// Accepted node archive
#[derive(Debug, Clone, Serialize)]
pub struct NodeFileResponseDto {
    pub id: String,
    pub file_name: String,
    pub size: u64,
}

impl NodeFileResponseDto {
    #[must_use]
    pub fn new(id: NodeId, file: NodeFile) -> Self {
        Self {
            id: id.to_string(),
            file_name: file.file_name,
            size: file.size,
        }
    }
}
