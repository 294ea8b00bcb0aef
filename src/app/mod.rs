//! 应用层：共享状态与路由

pub mod summary;
pub mod user;

use std::{sync::Arc, time::Duration};

use axum::{
    extract::State,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::{error::CoreError, middleware::request_logging_middleware};
use crate::infrastructure::llm::CompletionClient;
use summary::service::SummaryService;
use user::service::UserStore;

/// 所有处理器共享的状态
#[derive(Clone)]
pub struct AppState {
    pub users: UserStore,
    pub summaries: SummaryService,
}

impl AppState {
    pub fn new(users: UserStore, completions: Arc<dyn CompletionClient>) -> Self {
        Self {
            summaries: SummaryService::new(users.clone(), completions),
            users,
        }
    }
}

/// 组装路由和中间件
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/users", get(user::handler::list_users).post(user::handler::create_user))
        .route(
            "/users/:id",
            get(user::handler::get_user)
                .put(user::handler::update_user)
                .delete(user::handler::delete_user),
        )
        .route("/summary", post(summary::handler::create_summary))
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}

/// 健康检查
async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, CoreError> {
    state
        .users
        .ping()
        .await
        .map_err(CoreError::storage("Database unavailable"))?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "database": "connected",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
