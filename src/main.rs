//! Fabric Node Admission API - Main Entry Point

use std::sync::Arc;

use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fabric_node_admission::application::use_cases::nodes::ValidateNodeCreationUseCase;
use fabric_node_admission::domain::services::NodeCreationValidator;
use fabric_node_admission::infrastructure::driven_adapters::agent_repository::InMemoryAgentRepository;
use fabric_node_admission::infrastructure::driven_adapters::config::{AppConfig, LoggingConfig};
use fabric_node_admission::infrastructure::driving_adapters::api_rest::{self, AppState};

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.clone().into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    init_tracing(&config.logging);
    tracing::info!("Configuration loaded successfully");

    // Reference tables are fixed for the life of the process
    let reference_tables = Arc::new(config.reference_tables());

    // Create agent directory
    let agent_repository = Arc::new(InMemoryAgentRepository::from_config(&config.agents, &reference_tables)?);
    tracing::info!(agents = agent_repository.len(), "Agent directory ready");

    // Create use cases
    let validate_node_creation_use_case = Arc::new(ValidateNodeCreationUseCase::new(
        agent_repository,
        NodeCreationValidator::new(reference_tables.clone()),
    ));

    // Create application state
    let app_state = AppState {
        reference_tables,
        validate_node_creation_use_case,
    };

    // Build router
    let app = api_rest::router(app_state).layer(
        ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        ),
    );

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
