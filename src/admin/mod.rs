//! Logger endpoints, mounted under the configured base path.
//!
//! ```text
//! GET  {base}            list every logger
//! GET  {base}/           same as above
//! GET  {base}/{logger}   describe one logger
//! POST {base}/{logger}   set or reset one logger's level
//! ```

pub mod error;
pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::config::schema::normalize_base_path;
use crate::http::server::AppState;

pub use self::error::ApiError;

pub fn setup_admin_router(base_path: &str, state: AppState) -> Router {
    let base = normalize_base_path(base_path);

    let router = if base == "/" {
        Router::new().route("/", get(list_loggers))
    } else {
        Router::new()
            .route(&base, get(list_loggers))
            .route(&format!("{base}/"), get(list_loggers))
    };

    let logger_path = format!("{}/{{logger}}", base.trim_end_matches('/'));
    router
        .route(&logger_path, get(get_logger).post(set_logger_level))
        .with_state(state)
}
