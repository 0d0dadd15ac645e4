// Main entry point for API server

use std::sync::Arc;

use ai_client::{build_provider, AiError, CompletionProvider};
use anyhow::{Context, Result};
use server_core::domains::auth::JwtService;
use server_core::kernel::{AiSettings, MokaSuggestionCache, ServerDeps};
use server_core::server::{build_app, AxumAppState};
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Buddy Matching API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(env = %config.app_env, "Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Completion provider is optional: without it the suggestion endpoint answers 503
    let provider_config = config.ai.provider_config();
    let ai: Option<Arc<dyn CompletionProvider>> = match build_provider(&provider_config) {
        Ok(provider) => Some(provider),
        Err(AiError::NotConfigured(reason)) => {
            tracing::warn!(reason = %reason, "AI suggestions disabled");
            None
        }
        Err(e) => return Err(e).context("Failed to build completion provider"),
    };

    let deps = ServerDeps::new(
        pool,
        ai,
        AiSettings {
            provider_name: provider_config.kind.to_string(),
            model: config.ai.model.clone(),
            timeout: config.ai.timeout,
        },
        Arc::new(MokaSuggestionCache::new(
            config.ai.cache_max_entries,
            config.ai.cache_ttl,
        )),
        Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone())),
    );

    // Build application
    let state = AxumAppState::new(deps, !config.is_production());
    let app = build_app(state, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
