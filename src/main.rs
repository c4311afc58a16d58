//! Lumina server entry point.
//!
//! Loads configuration, wires the Gemini client into the handlers, optionally
//! runs the first analysis in the background and serves the dashboard API.

use std::error::Error;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lumina::adapters::ai::{GeminiConfig, GeminiProvider};
use lumina::adapters::http::{build_router, DashboardAppState};
use lumina::adapters::validation::JsonSchemaValidator;
use lumina::application::{GenerateActionPlanHandler, SharedDashboard};
use lumina::config::{AppConfig, ServerConfig, ValidationError};
use lumina::domain::dashboard::DashboardState;
use lumina::ports::GenerationProvider;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    if let Err(e) = config.validate() {
        error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }

    let api_key = config
        .ai
        .gemini_api_key
        .clone()
        .ok_or(ValidationError::MissingRequired("GEMINI_API_KEY"))?;

    let provider: Arc<dyn GenerationProvider> = Arc::new(GeminiProvider::new(
        GeminiConfig::from_secret(api_key)
            .with_model(&config.ai.model)
            .with_base_url(&config.ai.base_url)
            .with_timeout(config.ai.timeout()),
    )?);

    let mut action_plan = GenerateActionPlanHandler::new(provider, Arc::new(JsonSchemaValidator::new()))
        .with_variant(config.ai.schema_variant);
    if let Some(timeout) = config.ai.analysis_timeout() {
        action_plan = action_plan.with_timeout(timeout);
    }

    let dashboard: SharedDashboard = Arc::new(RwLock::new(DashboardState::default()));
    let state = DashboardAppState::new(dashboard, Arc::new(action_plan));

    if config.ai.initial_refresh {
        let refresh = state.refresh_analysis_handler();
        tokio::spawn(async move {
            let result = refresh.handle().await;
            if let Some(e) = result.error {
                error!(error = %e, "Initial market analysis failed");
            }
        });
    }

    let addr = config.server.socket_addr()?;
    let app = build_router(state, &config.server);

    info!(
        %addr,
        model = %config.ai.model,
        variant = ?config.ai.schema_variant,
        environment = ?config.server.environment,
        "Lumina listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down gracefully");
        })
        .await?;

    Ok(())
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.log_json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
