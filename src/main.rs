use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use microdash::client::ApiClient;
use microdash::config::{self, Config, RenderContext};
use microdash::{routes, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = Config::from_env();
    if cfg.api_url.is_none() {
        tracing::warn!(
            "API_URL is empty; using {} for server-side requests.",
            config::DEFAULT_SERVER_API_URL
        );
    }
    if cfg.public_api_url.is_none() {
        tracing::warn!(
            "PUBLIC_API_URL is empty; using {} for browser-facing links.",
            config::DEFAULT_BROWSER_API_URL
        );
    }

    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(cfg.request_timeout_seconds))
        .build()
        .expect("Failed to build HTTP client");

    // The page renders server-side, so the client resolves the internal
    // gateway address. Resolved once for the life of the process; every
    // handler shares this one instance through the state.
    let base_url = cfg.base_url(RenderContext::Server);
    tracing::info!(%base_url, "api base url resolved");

    let state = AppState {
        api: Arc::new(ApiClient::new(http, base_url)),
    };

    let app = Router::new()
        .route("/", get(routes::dashboard::dashboard))
        .route("/health", get(routes::health::health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", cfg.host, cfg.port).parse()?;
    tracing::info!("microdash listening on {}", addr);

    axum::Server::bind(&addr).serve(app.into_make_service()).await?;
    Ok(())
}
