mod config;
mod contact;
mod content;
mod errors;
mod models;
mod render;
mod routes;
mod state;
mod theme;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::contact::registry::FormRegistry;
use crate::contact::transport::{ContactTransport, LogTransport, WebhookTransport};
use crate::content::loader::load_from_source;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio v{}", env!("CARGO_PKG_VERSION"));

    // Load and validate the CV dataset
    let loaded = load_from_source(config.cv_data_path.as_deref())?;
    if !loaded.warnings.is_empty() {
        warn!(
            "{} skill(s) have unknown categories and are hidden from the skills section",
            loaded.warnings.len()
        );
    }
    info!(
        "CV data loaded: {} experiences, {} skills, {} projects",
        loaded.data.experiences.len(),
        loaded.data.skills.len(),
        loaded.data.projects.len()
    );

    // Contact transport: webhook when configured, log otherwise
    let transport: Arc<dyn ContactTransport> = match &config.contact_webhook_url {
        Some(url) => Arc::new(WebhookTransport::new(url.clone())?),
        None => Arc::new(LogTransport),
    };
    info!("Contact transport: {}", transport.name());

    let state = AppState {
        cv: Arc::new(loaded.data),
        transport,
        forms: Arc::new(FormRegistry::new(config.contact_form_capacity)),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());
    let app = if config.cors_permissive {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
