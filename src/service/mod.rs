//! Query and mutation services over the logger registry.
//!
//! Both services hold the same `Arc<LoggerRegistry>`; neither owns any state
//! of its own, so they are cheap to clone into request handlers.

pub mod mutation;
pub mod query;
pub mod types;

pub use mutation::MutationService;
pub use query::QueryService;
pub use types::{LevelChangeRequest, LoggerDescription, LoggerLevelsResponse};
