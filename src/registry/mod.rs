//! Logger level registry.
//!
//! # Data Flow
//! ```text
//! level text
//!     → level.rs (case-insensitive parse into the fixed level set)
//!     → store.rs (configured level recorded, subtree effective levels recomputed)
//!     → sink.rs (configured snapshot pushed to the logging backend)
//!
//! name.rs supplies the dotted hierarchy every step walks.
//! ```

pub mod level;
pub mod name;
pub mod sink;
pub mod store;

pub use level::{InvalidLevel, Level};
pub use name::ROOT;
pub use sink::{LevelSink, SinkError};
pub use store::{LevelChange, LoggerEntry, LoggerRegistry};
