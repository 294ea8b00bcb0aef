//! 摘要处理器

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use super::model::{SummaryRequest, SummaryResponse};
use crate::app::AppState;
use crate::core::error::CoreError;

pub async fn create_summary(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, CoreError> {
    let Json(request) = payload.map_err(|rejection| CoreError::bad_request(rejection.body_text()))?;
    let summary = state.summaries.summarize(&request).await?;
    Ok(Json(SummaryResponse { summary }))
}
