//! Narrow SQL access layer used by the service modules.
//!
//! Services hold an `Arc<dyn SQLStore>` and never touch `rusqlite` directly,
//! so tests can swap the file-backed store for an in-memory one.

pub mod error;
pub mod sqlite;
pub mod traits;

pub use error::SQLError;
pub use sqlite::SqliteStore;
pub use traits::{Row, SQLStore, Value};
