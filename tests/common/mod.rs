//! Common test utilities for e2e tests
//!
//! Builds the application from an in-memory configuration and provides
//! helpers for sending requests to the router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use serde::{Deserialize, Serialize};
use tower::util::ServiceExt;

use fabric_node_admission::application::use_cases::nodes::ValidateNodeCreationUseCase;
use fabric_node_admission::domain::services::NodeCreationValidator;
use fabric_node_admission::infrastructure::driven_adapters::agent_repository::InMemoryAgentRepository;
use fabric_node_admission::infrastructure::driven_adapters::config::AppConfig;
use fabric_node_admission::infrastructure::driving_adapters::api_rest::{self, AppState};

/// Docker agent registered in the test configuration
pub const DOCKER_AGENT_ID: &str = "3f0b2f4e-6a43-4c55-9a0e-2f1d8b7c1a01";

/// Kubernetes agent registered in the test configuration
pub const KUBERNETES_AGENT_ID: &str = "8c6d1f7a-2b9e-4d3a-b5c4-7e0f9a8b6c02";

/// A well-formed node id for path segments
pub const NODE_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

/// Test application context
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a new test application with the default test configuration
    pub fn new() -> Self {
        Self::with_config(&test_config_toml(""))
    }

    /// Create a test application from a TOML configuration
    pub fn with_config(toml: &str) -> Self {
        let config = parse_config(toml);
        let reference_tables = Arc::new(config.reference_tables());

        let agent_repository = Arc::new(
            InMemoryAgentRepository::from_config(&config.agents, &reference_tables)
                .expect("Failed to build agent directory"),
        );

        let validate_node_creation_use_case = Arc::new(ValidateNodeCreationUseCase::new(
            agent_repository,
            NodeCreationValidator::new(reference_tables.clone()),
        ));

        let app_state = AppState {
            reference_tables,
            validate_node_creation_use_case,
        };

        Self {
            router: api_rest::router(app_state),
        }
    }

    /// Send a JSON request and return the raw response
    pub async fn send_json<T: Serialize>(&self, method: Method, uri: &str, body: &T) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_string(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Send a raw-bodied JSON request (for malformed payloads)
    pub async fn send_raw(&self, method: Method, uri: &str, body: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Send a GET request
    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router
            .clone()
            .oneshot(Request::builder().method(Method::GET).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }
}

/// Test configuration with two agents; `extra` is appended verbatim
pub fn test_config_toml(extra: &str) -> String {
    format!(
        r#"
[server]
host = "127.0.0.1"
port = 0

[[agents]]
id = "{DOCKER_AGENT_ID}"
name = "docker-local"
type = "docker"

[[agents]]
id = "{KUBERNETES_AGENT_ID}"
name = "k8s-cluster"
type = "kubernetes"
{extra}
"#
    )
}

fn parse_config(toml: &str) -> AppConfig {
    use config::{Config, File, FileFormat};

    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()
        .expect("Failed to build test config")
        .try_deserialize()
        .expect("Failed to deserialize test config")
}

/// Read a response body as JSON
pub async fn read_json<T: for<'de> Deserialize<'de>>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Helper struct for creating node request bodies
#[derive(Debug, Clone, Serialize)]
pub struct CreateNodeRequest {
    pub network_type: String,
    pub network_version: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<serde_json::Value>,
}

impl Default for CreateNodeRequest {
    fn default() -> Self {
        Self {
            network_type: "fabric".to_string(),
            network_version: "1.4".to_string(),
            node_type: "peer".to_string(),
            agent_type: Some("docker".to_string()),
            agent: None,
            ca: None,
        }
    }
}

impl CreateNodeRequest {
    pub fn with_version(mut self, version: &str) -> Self {
        self.network_version = version.to_string();
        self
    }

    pub fn with_type(mut self, node_type: &str) -> Self {
        self.node_type = node_type.to_string();
        self
    }

    pub fn with_agent_type(mut self, agent_type: Option<&str>) -> Self {
        self.agent_type = agent_type.map(str::to_string);
        self
    }

    pub fn with_agent(mut self, agent: Option<&str>) -> Self {
        self.agent = agent.map(str::to_string);
        self
    }
}

/// Accepted node creation response
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct NodeCreationResponse {
    pub network_type: String,
    pub network_version: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub agent_type: Option<String>,
    pub agent: Option<String>,
    pub ca: Option<serde_json::Value>,
}

/// Error response structure for deserialization
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<Vec<FieldError>>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
