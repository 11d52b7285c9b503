pub mod error;
pub mod handlers;
pub mod state;
pub mod types;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::fetch_data::{self, MarketSource};

use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/", get(handlers::form::show_form))
        .route("/api/pairs", get(handlers::pairs::list_pairs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(host: &str, port: u16, state: AppState) -> Result<()> {
    let app = router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;

    tracing::info!("bull-spread form listening on http://{addr}");
    tracing::info!("  Form:   GET http://{addr}/?lot_size=10&max_percentage_difference=30&spot_multiplier=1.05");
    tracing::info!("  Pairs:  GET http://{addr}/api/pairs");
    tracing::info!("  Health: GET http://{addr}/health");

    axum::serve(listener, app).await.context("running server")?;

    Ok(())
}

/// Entry point for the `serve` command.
pub fn run(host: &str, port: u16, source: MarketSource) -> Result<()> {
    source.settings.validate()?;
    let rt = tokio::runtime::Runtime::new().context("creating async runtime")?;
    rt.block_on(async move {
        let client = fetch_data::http_client(&source.settings.source)?;
        let prices =
            fetch_data::price_source(&client, &source.settings.source, source.prices_file.as_deref())?;
        let state = AppState::new(source.settings, source.input, client, prices);
        serve(host, port, state).await
    })
}
