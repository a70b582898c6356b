//! PhoneFinder - client-side state layer for a phone search page
//!
//! This library holds the state of a product-search page and of its embedded
//! assistant chat widget, independent of any particular UI toolkit.
//!
//! # Architecture
//!
//! - `search`: price range control, filter controller and results rendering
//! - `chat`: chat session state machine and transcript
//! - `storage`: page-session persistence of the last search
//! - `service`: remote catalog and assistant collaborators
//! - `details`: details view of a selected phone
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli` / `commands`: command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use phonefinder::{ApiClient, Config, FilterStateController, PersistenceStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let client = Arc::new(ApiClient::new(&config.service)?);
//!     let mut page = FilterStateController::new(client, PersistenceStore::in_memory());
//!     page.load_page().await;
//!     if let Some(results) = page.search().await? {
//!         println!("{} phones", results.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod details;
pub mod error;
pub mod html;
pub mod models;
pub mod search;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use chat::{ChatSessionController, ChatState, ExchangeOutcome};
pub use config::Config;
pub use details::DetailsView;
pub use error::{PhoneFinderError, Result};
pub use models::{ChatResponse, FilterCriteria, PersistedSearchState, PhoneResult, PriceBounds};
pub use search::{FilterStateController, PriceRangeControl, ResultsRenderer};
pub use service::{ApiClient, ChatService, SearchService};
pub use storage::PersistenceStore;

#[cfg(test)]
pub mod test_utils;
