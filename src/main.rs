mod config;
mod errors;
mod routes;
mod service;

use tracing::info;

use crate::config::ServerConfig;
use crate::service::answer_service::AnswerBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "faq_widget=debug,faq_widget_core=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = ServerConfig::from_env()?;
    let tables = config.load_tables()?;
    let backend = AnswerBackend::new(tables, config.widget.latency);

    // ── Router ────────────────────────────────────────────────────────────────
    let app = routes::router(backend, config.widget.site_base_url.as_deref());

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
