/*!
Command handlers for the CLI

Each handler builds the page pieces it needs from the configuration and runs
one interaction:

- `catalog`: brand list and price bounds
- `search`: filter search and details handoff
- `details`: details view of the handed-off phone
- `chat`: interactive assistant chat
*/

use crate::config::{Config, StorageBackend};
use crate::error::{PhoneFinderError, Result};
use crate::storage::{PersistenceStore, SledStore};
use std::sync::Arc;

pub mod catalog;
pub mod chat;
pub mod details;
pub mod search;

/// Open page storage as configured
///
/// # Errors
///
/// Returns error if the `sled` database cannot be opened
pub fn open_store(config: &Config) -> Result<PersistenceStore> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(PersistenceStore::in_memory()),
        StorageBackend::Sled => {
            let path = config.storage.resolved_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(PhoneFinderError::Io)?;
            }
            tracing::debug!("Opening page storage at {}", path.display());
            Ok(PersistenceStore::new(Arc::new(SledStore::open(&path)?)))
        }
    }
}
