//! HTTP entry point for the shapeshift transform service.

mod routes;

use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shapeshift_core::{GeminiModel, GroqModel, Transformer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let draft_model = Arc::new(GroqModel::from_env().context("draft provider configuration")?);
    let edit_model = Arc::new(GeminiModel::from_env().context("edit provider configuration")?);
    let transformer = Arc::new(Transformer::new(draft_model, edit_model));

    let app = routes::router(transformer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = std::env::var("SHAPESHIFT_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    info!(%addr, "shapeshift server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
