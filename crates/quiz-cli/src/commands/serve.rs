use anyhow::Context;
use quiz_api::AppState;
use quiz_config::QuizConfig;
use quiz_db::service::QuizService;
use tokio::net::TcpListener;

pub async fn handle(config: &QuizConfig) -> anyhow::Result<()> {
    let service = QuizService::new_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))?;

    let listener = TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;

    quiz_api::serve(listener, AppState::new(service), shutdown_signal())
        .await
        .context("http server failed")
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for ctrl-c; shutting down");
        return;
    }
    tracing::info!("ctrl-c received, shutting down");
}
