use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::admin::error::ApiError;
use crate::http::server::AppState;
use crate::service::{LevelChangeRequest, LoggerLevelsResponse};

/// `GET {base}` and `GET {base}/`
pub async fn list_loggers(State(state): State<AppState>) -> Json<LoggerLevelsResponse> {
    Json(state.queries.describe_all())
}

/// `GET {base}/{logger}`
pub async fn get_logger(
    State(state): State<AppState>,
    Path(logger): Path<String>,
) -> Json<LoggerLevelsResponse> {
    Json(state.queries.describe_one(&logger))
}

/// `POST {base}/{logger}` with `{"configuredLevel": "<level>" | null}`
pub async fn set_logger_level(
    State(state): State<AppState>,
    Path(logger): Path<String>,
    payload: Result<Json<LevelChangeRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = payload?;
    state
        .mutations
        .apply(&logger, request.configured_level.as_deref())?;
    Ok(StatusCode::NO_CONTENT)
}
