//! Assistant Console - operator console for a voice assistant's interaction history
//!
//! This library talks to the assistant server's history and dashboard endpoints. It
//! supports:
//!
//! - Searching the logged utterance/response records (last request wins)
//! - Inline editing with a per-record edit session, and confirmed deletion
//! - Deriving dashboard charts and tables from a statistics snapshot
//! - Downloading the detailed report and triggering the PDF report
//!
//! All state lives in one [`AppContext`]. The TUI drives it from spawned tasks;
//! [`Console`] drives it sequentially.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use assistant_console::{Console, ConsoleConfig, HttpHistoryApi};
//! # use assistant_console::controllers::Confirmer;
//! # struct Yes;
//! # #[async_trait::async_trait]
//! # impl Confirmer for Yes { async fn confirm(&self, _: &str) -> bool { true } }
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = ConsoleConfig::from_env()?;
//! let api = Arc::new(HttpHistoryApi::new(&config)?);
//! let mut console = Console::new(api, Arc::new(Yes));
//!
//! console.search("reproduce").await;
//! println!("{} records", console.context().records().len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod console;
pub mod context;
pub mod controllers;
pub mod dashboard;
pub mod editing;
pub mod error;
pub mod models;
pub mod notifications;
pub mod parsers;
pub mod store;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use api::{HistoryApi, HttpHistoryApi};
pub use config::ConsoleConfig;
pub use console::Console;
pub use context::{AppContext, SearchOutcome};
pub use error::{ConsoleError, EditError, Result};
pub use models::{Record, RecordId, RecordUpdate, StatisticsSnapshot};
pub use utils::terminal::escape_text;
