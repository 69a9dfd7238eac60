use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use medifind_server::config::Cli;
use medifind_server::distance::ReferencePoint;
use medifind_server::repository::InMemoryCatalog;
use medifind_server::routes::build_router;
use medifind_server::seed;
use medifind_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with(fmt::layer().with_target(true))
        .init();

    let repo = Arc::new(InMemoryCatalog::new(seed::demo()));
    let estimator = Arc::new(ReferencePoint(cli.reference_point()));
    let state = Arc::new(AppState::new(repo, estimator, cli.alert_capacity));

    if let Some(dir) = &cli.static_dir {
        tracing::info!(dir = %dir.display(), "serving static files");
    }
    let app = build_router(state, cli.static_dir.clone());

    let addr = cli.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "MediFind server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
