use std::{path::PathBuf, sync::Arc};

use tokio::net::TcpListener;
use tracing::{info, warn};

use user_summary::{
    app::{router, user::service::UserStore, AppState},
    core::config::Config,
    infrastructure::{database::DatabaseManager, llm::OpenRouterClient, logger::Logger},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 第一个参数为可选的配置文件路径
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;

    Logger::init(&config.logging.level);
    info!("Starting user summary server...");

    if config.llm.api_key.is_none() {
        warn!("OPENROUTER_API_KEY is not set, /summary requests will fail");
    }

    let db = DatabaseManager::connect(&config.database).await?;
    let users = UserStore::new(db.get_pool().clone());
    let completions = Arc::new(OpenRouterClient::new(&config.llm)?);
    let state = AppState::new(users, completions);

    let app = router(state, config.server.request_timeout());

    let listener = TcpListener::bind(config.server.socket_addr()?).await?;
    let addr = listener.local_addr()?;

    info!("🚀 User summary server running on http://{}", addr);
    info!("📖 API endpoints:");
    info!("   GET    /health        - Health check");
    info!("   GET    /users         - List users");
    info!("   POST   /users         - Create user");
    info!("   GET    /users/:id     - Get user by ID");
    info!("   PUT    /users/:id     - Update user");
    info!("   DELETE /users/:id     - Delete user");
    info!("   POST   /summary       - Summarize selected users");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                warn!("Failed to listen for SIGTERM: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
