use anyhow::Context;
use axum::Router;
use dotenv::dotenv;
use todo_rest::app_env::AppConfig;
use todo_rest::persistence::db_todo_driven_ports::DbTodoStore;
use todo_rest::persistence::in_memory_todo_driven_ports::InMemoryTodoStore;
use todo_rest::{build_app, logging, persistence};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = AppConfig::from_env()?;

    let otel_exporters = match &config.otel_endpoints {
        Some(endpoints) => Some(logging::init_exporters(
            &endpoints.spans,
            &endpoints.metrics,
        )?),
        None => None,
    };
    logging::setup_logging_and_tracing(logging::init_env_filter()?, otel_exporters);

    let app: Router = match &config.db_url {
        Some(db_url) => {
            info!("Connecting to the database...");
            let db = persistence::connect_sqlx(db_url).await?;
            persistence::run_migrations(&db).await?;
            build_app(DbTodoStore::new(db))
        }
        None => {
            info!("No database configured, todos will be kept in memory");
            build_app(InMemoryTodoStore::new())
        }
    };

    let listener = TcpListener::bind(config.listen_address)
        .await
        .with_context(|| format!("Could not listen on {}", config.listen_address))?;
    info!("Starting server on {}", config.listen_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server stopped unexpectedly")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves once the process is asked to stop, via Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
