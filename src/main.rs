//! Cafekase HTTP server.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cafekase::adapters::{app_router, ChatAppState, FileCatalogSource, OpenAIProvider};
use cafekase::application::{ChatHandler, DialogueEngine};
use cafekase::config::{AppConfig, LogFormat};
use cafekase::domain::catalog::{Catalog, CatalogContext};
use cafekase::ports::{AIProvider, CatalogSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let source = FileCatalogSource::new(&config.catalog.path);
    let catalog = Catalog::new(source.load()?)?;
    let context = CatalogContext::build(
        catalog,
        &config.catalog.allow_list_source(),
        &config.catalog.alias_pairs(),
    )?;
    tracing::info!(source = %source.describe(), "Catalog loaded");

    let provider: Arc<dyn AIProvider> = Arc::new(OpenAIProvider::new(config.ai.openai()?)?);
    let info = provider.provider_info();
    tracing::info!(provider = %info.name, model = %info.model, "LLM collaborator configured");

    let policy = config.policy.to_policy()?;
    let engine = DialogueEngine::new(provider, Arc::new(context), &policy)?;
    let state = ChatAppState::new(Arc::new(ChatHandler::new(Arc::new(engine))));

    let app = app_router(
        state,
        &config.server.cors_origins_list(),
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.server.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
