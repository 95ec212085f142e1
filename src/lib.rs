//! pwshell - a terminal credential manager.
//!
//! The core is an in-memory [`RecordStore`] of sparse [`Record`]s kept in a
//! stable sort order, an [`AccountDb`] that moves it to and from a pluggable
//! [`StorageEngine`], and a [`SearchCursor`] for incremental search. The
//! [`Shell`] puts an interactive command line on top.

pub mod config;
pub mod crypto;
pub mod db;
pub mod engine;
pub mod error;
pub mod export;
pub mod logging;
pub mod record;
pub mod search;
pub mod shell;
pub mod store;
pub mod vault;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::AccountDb;
pub use engine::StorageEngine;
pub use error::{DbError, ErrorKind};
pub use logging::{LogConfig, init_logging};
pub use record::{FieldId, Record};
pub use search::SearchCursor;
pub use shell::Shell;
pub use store::RecordStore;
pub use vault::VaultEngine;
