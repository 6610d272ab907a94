//! Campaign dashboard — entry point.
//!
//! Serves the dashboard REST API, forwarding campaign reads and writes to
//! the crowdfunding contract through the JSON-RPC chain gateway.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use reqwest::Client;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use campaign_dashboard::api::{self, ApiState};
use campaign_dashboard::config::Config;
use campaign_dashboard::rpc::RpcRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise structured logging (RUST_LOG controls verbosity).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load optional .env file (ignored if missing).
    let _ = dotenvy::dotenv();

    // Load config from environment.
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("{e}"))?;

    // HTTP client shared by all gateway calls.
    let client = Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;

    let repo = RpcRepository::new(client, config.rpc_url.clone(), config.contract_id.clone());
    info!("Using chain gateway {} — contract: {}", config.rpc_url, config.contract_id);

    let state = Arc::new(ApiState {
        repo: Arc::new(repo),
    });

    let app = Router::new()
        .route("/health", get(api::health))
        .route(
            "/campaigns",
            get(api::list_campaigns).post(api::create_campaign),
        )
        .route(
            "/campaigns/:key",
            get(api::get_campaign).delete(api::delete_campaign),
        )
        .route("/campaigns/:key/donations", post(api::donate))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.api_port);
    info!("API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
