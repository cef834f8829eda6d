//! Progress cursor for incremental exports
//!
//! Remembers the latest exported day so the next run starts right after it.

pub mod cursor;
pub mod store;

pub use cursor::ProgressCursor;
pub use store::{ResumeError, StateStore};
