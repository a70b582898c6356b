//! Filter state controller
//!
//! Owns every control on the search page (brand dropdown, numeric fields,
//! price slider), the results container and the current result set. Each UI
//! event maps to one method here.

use crate::error::Result;
use crate::models::{FilterCriteria, PersistedSearchState, PhoneResult};
use crate::search::range::{PriceRangeControl, SliderId};
use crate::search::render::{ResultsRenderer, ResultsView};
use crate::service::SearchService;
use crate::storage::PersistenceStore;

use anyhow::Context;
use std::sync::Arc;

/// Which controls exist on the current page variant
///
/// Features whose control is missing silently decline to initialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub brand_select: bool,
    pub price_slider: bool,
    pub numeric_fields: bool,
    pub results: bool,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            brand_select: true,
            price_slider: true,
            numeric_fields: true,
            results: true,
        }
    }
}

/// Numeric text inputs on the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    MinBattery,
    MinRam,
    MinCamera,
}

/// Raw values of the search form, as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterForm {
    /// Dropdown options after the empty "any brand" option
    pub brand_options: Vec<String>,
    /// Selected dropdown value; empty string is the "any brand" option
    pub brand: String,
    pub min_battery: String,
    pub min_ram: String,
    pub min_camera: String,
}

impl FilterForm {
    fn field(&self, field: NumericField) -> &str {
        match field {
            NumericField::MinBattery => &self.min_battery,
            NumericField::MinRam => &self.min_ram,
            NumericField::MinCamera => &self.min_camera,
        }
    }

    fn field_mut(&mut self, field: NumericField) -> &mut String {
        match field {
            NumericField::MinBattery => &mut self.min_battery,
            NumericField::MinRam => &mut self.min_ram,
            NumericField::MinCamera => &mut self.min_camera,
        }
    }
}

/// Parse a numeric text field
///
/// Blank input means no constraint. Unlike the browser page, where
/// `Number("  ")` is `0`, whitespace-only input is treated as blank too.
/// Text that is not a finite number is also sent as no constraint, with a
/// warning.
///
/// # Examples
///
/// ```
/// use phonefinder::search::parse_numeric;
///
/// assert_eq!(parse_numeric(""), None);
/// assert_eq!(parse_numeric("4000"), Some(4000.0));
/// assert_eq!(parse_numeric("lots"), None);
/// ```
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            tracing::warn!(input = trimmed, "Non-numeric filter value sent as no constraint");
            None
        }
    }
}

/// Outcome of the page-load sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLoadReport {
    pub brands_loaded: usize,
    pub slider: Option<SliderId>,
    pub restored: bool,
}

/// Aggregates the filter controls and drives searches
pub struct FilterStateController {
    service: Arc<dyn SearchService>,
    store: PersistenceStore,
    layout: PageLayout,
    form: FilterForm,
    range: PriceRangeControl,
    renderer: ResultsRenderer,
    current_results: Vec<PhoneResult>,
}

impl FilterStateController {
    /// Controller for a page with every control present
    pub fn new(service: Arc<dyn SearchService>, store: PersistenceStore) -> Self {
        Self::with_layout(service, store, PageLayout::default())
    }

    /// Controller for a page variant with only some controls
    pub fn with_layout(
        service: Arc<dyn SearchService>,
        store: PersistenceStore,
        layout: PageLayout,
    ) -> Self {
        Self {
            service,
            store,
            layout,
            form: FilterForm::default(),
            range: PriceRangeControl::new(),
            renderer: ResultsRenderer::new(),
            current_results: Vec::new(),
        }
    }

    /// Run the page-load sequence
    ///
    /// Wipes the persisted search first, so a fresh load always starts from
    /// defaults; then loads brands and the price range and attempts
    /// restoration. Failures degrade the affected control and are logged.
    pub async fn load_page(&mut self) -> PageLoadReport {
        let mut report = PageLoadReport::default();

        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear persisted search on load: {:#}", e);
        }

        if self.layout.brand_select {
            match self.load_brands().await {
                Ok(count) => report.brands_loaded = count,
                Err(e) => tracing::warn!("Brand list unavailable: {:#}", e),
            }
        }

        if self.layout.price_slider {
            match self.load_price_range().await {
                Ok(id) => {
                    report.slider = Some(id);
                    report.restored = self.restore_last_search();
                }
                Err(e) => tracing::warn!("Price range unavailable: {:#}", e),
            }
        }

        tracing::info!(
            brands = report.brands_loaded,
            slider = report.slider.is_some(),
            restored = report.restored,
            "Search page loaded"
        );
        report
    }

    /// Fetch brands and replace the dropdown options with them
    pub async fn load_brands(&mut self) -> Result<usize> {
        let brands = self
            .service
            .brands()
            .await
            .context("Failed to load brands")?;
        let count = brands.len();
        self.form.brand_options = brands;
        Ok(count)
    }

    /// Attach the price slider, fetching bounds only if it is not attached yet
    pub async fn load_price_range(&mut self) -> Result<SliderId> {
        if let Some(slider) = self.range.slider() {
            return Ok(slider.id());
        }
        let bounds = self
            .service
            .price_range()
            .await
            .context("Failed to load price range")?;
        Ok(self.range.initialize(bounds))
    }

    /// Select a dropdown value; empty string picks "any brand"
    pub fn select_brand(&mut self, brand: impl Into<String>) {
        self.form.brand = brand.into();
    }

    /// Replace the text of a numeric field
    pub fn set_field(&mut self, field: NumericField, text: impl Into<String>) {
        *self.form.field_mut(field) = text.into();
    }

    pub fn form(&self) -> &FilterForm {
        &self.form
    }

    pub fn range(&self) -> &PriceRangeControl {
        &self.range
    }

    pub fn range_mut(&mut self) -> &mut PriceRangeControl {
        &mut self.range
    }

    /// Assemble the query from the controls
    ///
    /// Returns `None` while the price slider is not attached; no request can
    /// be issued in that state.
    pub fn build_criteria(&self) -> Option<FilterCriteria> {
        let [min_price, max_price] = self.range.get()?;

        let brand = if self.layout.brand_select && !self.form.brand.is_empty() {
            Some(self.form.brand.clone())
        } else {
            None
        };

        let numeric = |field: NumericField| {
            if self.layout.numeric_fields {
                parse_numeric(self.form.field(field))
            } else {
                None
            }
        };

        Some(FilterCriteria {
            brand,
            min_price,
            max_price,
            min_battery: numeric(NumericField::MinBattery),
            min_ram: numeric(NumericField::MinRam),
            min_camera_mp: numeric(NumericField::MinCamera),
        })
    }

    /// Send `criteria` to the service, then render and persist the results
    ///
    /// On failure nothing is rendered or persisted and the previous results
    /// stay current.
    pub async fn submit(&mut self, criteria: FilterCriteria) -> Result<Vec<PhoneResult>> {
        let results = match self.service.filter(&criteria).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!("Search failed: {:#}", e);
                return Err(e.context("Search request failed"));
            }
        };

        if self.layout.results {
            self.renderer.render(&results);
        }

        let state = PersistedSearchState {
            filters: criteria,
            results,
        };
        if let Err(e) = self.store.save(&state) {
            tracing::warn!("Failed to persist search: {:#}", e);
        }

        self.current_results = state.results;
        Ok(self.current_results.clone())
    }

    /// Build the query from the controls and submit it
    ///
    /// Returns `Ok(None)` without contacting the service when the slider is
    /// not attached.
    pub async fn search(&mut self) -> Result<Option<Vec<PhoneResult>>> {
        let Some(criteria) = self.build_criteria() else {
            tracing::debug!("Search skipped: price slider not attached");
            return Ok(None);
        };
        self.submit(criteria).await.map(Some)
    }

    /// Hand the result at `index` of the current batch to the details view
    ///
    /// Returns `Ok(None)` for an index outside the batch.
    pub fn select(&self, index: usize) -> Result<Option<&PhoneResult>> {
        let Some(phone) = self.current_results.get(index) else {
            tracing::warn!(index, "View details for an index outside the current results");
            return Ok(None);
        };
        self.store.save_selected(phone)?;
        tracing::info!(index, name = %phone.name, "Selected phone for details view");
        Ok(Some(phone))
    }

    /// Put a previously saved search back on the page
    ///
    /// Returns `false` when there is nothing complete to restore.
    pub fn restore_last_search(&mut self) -> bool {
        let Some(state) = self.store.load() else {
            return false;
        };
        let filters = state.filters;

        if self.layout.brand_select {
            self.form.brand = filters.brand.clone().unwrap_or_default();
        }
        if self.layout.numeric_fields {
            self.form.min_battery = restored_text(filters.min_battery);
            self.form.min_ram = restored_text(filters.min_ram);
            self.form.min_camera = restored_text(filters.min_camera_mp);
        }
        self.range.set([filters.min_price, filters.max_price]);

        if self.layout.results {
            self.renderer.render(&state.results);
        }
        self.current_results = state.results;
        tracing::info!("Restored last search");
        true
    }

    /// Results of the last successful search
    pub fn current_results(&self) -> &[PhoneResult] {
        &self.current_results
    }

    /// What the results container shows
    pub fn view(&self) -> &ResultsView {
        self.renderer.view()
    }

    pub fn renderer(&self) -> &ResultsRenderer {
        &self.renderer
    }

    pub fn store(&self) -> &PersistenceStore {
        &self.store
    }
}

fn restored_text(value: Option<f64>) -> String {
    match value {
        // A zero constraint comes back as an empty field
        Some(v) if v != 0.0 => crate::html::number(v),
        _ => String::new(),
    }
}
