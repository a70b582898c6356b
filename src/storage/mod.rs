//! Page-session persistence for the search surface
//!
//! [`PersistenceStore`] keeps the last successful search (filters and
//! results, always written together) plus an independent slot holding the
//! phone handed off to the details view.

use crate::error::{PhoneFinderError, Result};
use crate::models::{FilterCriteria, PersistedSearchState, PhoneResult};
use anyhow::Context;
use std::sync::Arc;

pub mod backend;
pub use backend::{KeyValueStore, MemoryStore, SledStore};

/// Key holding the serialized [`FilterCriteria`] of the last search
pub const FILTERS_KEY: &str = "lastSearchFilters";

/// Key holding the serialized result list of the last search
pub const RESULTS_KEY: &str = "lastSearchResults";

/// Key holding the phone selected for the details view
pub const SELECTED_KEY: &str = "selectedPhone";

/// Snapshot store for the search page
#[derive(Clone)]
pub struct PersistenceStore {
    backend: Arc<dyn KeyValueStore>,
}

impl PersistenceStore {
    /// Wrap a storage backend
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store backed by a fresh in-memory map
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Remove the saved filters and results
    ///
    /// The selected-phone slot is left alone.
    pub fn clear(&self) -> Result<()> {
        self.backend
            .remove_items(&[FILTERS_KEY, RESULTS_KEY])
            .context("Failed to clear last search")?;
        tracing::debug!("Cleared persisted search state");
        Ok(())
    }

    /// Save filters and results in one write
    pub fn save(&self, state: &PersistedSearchState) -> Result<()> {
        let filters = serde_json::to_string(&state.filters)
            .map_err(|e| PhoneFinderError::Storage(format!("Serialization failed: {}", e)))?;
        let results = serde_json::to_string(&state.results)
            .map_err(|e| PhoneFinderError::Storage(format!("Serialization failed: {}", e)))?;

        self.backend
            .set_items(&[(FILTERS_KEY, filters), (RESULTS_KEY, results)])
            .context("Failed to persist last search")?;

        tracing::debug!(results = state.results.len(), "Persisted search state");
        Ok(())
    }

    /// Load the last search
    ///
    /// Returns `None` when either key is missing, either value fails to
    /// parse, or the backend cannot be read.
    pub fn load(&self) -> Option<PersistedSearchState> {
        let filters = self.read_json::<FilterCriteria>(FILTERS_KEY)?;
        let results = self.read_json::<Vec<PhoneResult>>(RESULTS_KEY)?;
        Some(PersistedSearchState { filters, results })
    }

    /// Persist the phone picked for the details view
    pub fn save_selected(&self, phone: &PhoneResult) -> Result<()> {
        let value = serde_json::to_string(phone)
            .map_err(|e| PhoneFinderError::Storage(format!("Serialization failed: {}", e)))?;
        self.backend
            .set_item(SELECTED_KEY, &value)
            .context("Failed to persist selected phone")?;
        Ok(())
    }

    /// Read the phone picked for the details view
    pub fn load_selected(&self) -> Option<PhoneResult> {
        self.read_json(SELECTED_KEY)
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, "Failed to read persisted value: {:#}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, "Ignoring unparsable persisted value: {}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for PersistenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceStore").finish_non_exhaustive()
    }
}
