use anyhow::{Context, Result};
use spendlens_relay::{analyzer_from_config, app, AppState, RelayConfig};
use tokio::signal;

/// Start the classification relay and serve until Ctrl+C / SIGTERM.
pub async fn run_server(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = RelayConfig::from_env().context("loading relay configuration")?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let analyzer = analyzer_from_config(&config).context("building analyzer")?;
    tracing::info!(
        model = %config.gemini.model,
        keys = analyzer.key_count(),
        max_attempts = config.retry.max_attempts,
        "AI Expense Analyzer Agent starting"
    );

    let router = app(AppState::new(analyzer));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
