//! Test utilities for PhoneFinder
//!
//! Sample data builders and in-process fakes for the catalog and chat
//! services.

use crate::error::{PhoneFinderError, Result};
use crate::models::{ChatResponse, FilterCriteria, PhoneResult, PriceBounds};
use crate::service::{ChatService, SearchService};
use async_trait::async_trait;
use std::sync::Mutex;

/// A phone with fixed specs and the given name and score
pub fn phone(name: &str, match_percentage: f64) -> PhoneResult {
    PhoneResult {
        name: name.to_string(),
        brand: "TestBrand".to_string(),
        price: 499.0,
        battery: 4500.0,
        camera_mp: 48.0,
        ram: 8192.0,
        match_percentage,
        image_url: None,
        reasons: None,
    }
}

/// A phone with the given image URL
pub fn phone_with_image(name: &str, image_url: Option<&str>) -> PhoneResult {
    PhoneResult {
        image_url: image_url.map(str::to_string),
        ..phone(name, 50.0)
    }
}

/// The "Apple, 100..500, no numeric constraints" query
pub fn sample_criteria() -> FilterCriteria {
    FilterCriteria {
        brand: Some("Apple".to_string()),
        min_price: 100.0,
        max_price: 500.0,
        min_battery: None,
        min_ram: None,
        min_camera_mp: None,
    }
}

/// In-process catalog service
#[derive(Default)]
pub struct FakeCatalog {
    brands: Vec<String>,
    bounds: Option<PriceBounds>,
    results: Vec<PhoneResult>,
    fail_filter: bool,
    calls: Mutex<FakeCatalogCalls>,
}

#[derive(Default)]
struct FakeCatalogCalls {
    price_range: usize,
    filter: Vec<FilterCriteria>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brands(mut self, brands: &[&str]) -> Self {
        self.brands = brands.iter().map(|b| b.to_string()).collect();
        self
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = Some(PriceBounds { min, max });
        self
    }

    pub fn with_results(mut self, results: Vec<PhoneResult>) -> Self {
        self.results = results;
        self
    }

    pub fn failing_filter(mut self) -> Self {
        self.fail_filter = true;
        self
    }

    pub fn price_range_calls(&self) -> usize {
        self.calls.lock().expect("calls lock").price_range
    }

    pub fn filter_calls(&self) -> usize {
        self.calls.lock().expect("calls lock").filter.len()
    }

    pub fn last_criteria(&self) -> Option<FilterCriteria> {
        self.calls.lock().expect("calls lock").filter.last().cloned()
    }
}

#[async_trait]
impl SearchService for FakeCatalog {
    async fn price_range(&self) -> Result<PriceBounds> {
        self.calls.lock().expect("calls lock").price_range += 1;
        self.bounds
            .ok_or_else(|| {
                PhoneFinderError::ServiceStatus {
                    endpoint: "/price-range".to_string(),
                    status: 503,
                }
                .into()
            })
    }

    async fn brands(&self) -> Result<Vec<String>> {
        Ok(self.brands.clone())
    }

    async fn filter(&self, criteria: &FilterCriteria) -> Result<Vec<PhoneResult>> {
        self.calls
            .lock()
            .expect("calls lock")
            .filter
            .push(criteria.clone());
        if self.fail_filter {
            return Err(PhoneFinderError::ServiceStatus {
                endpoint: "/filter".to_string(),
                status: 500,
            }
            .into());
        }
        Ok(self.results.clone())
    }
}

/// In-process chat service
pub struct FakeChat {
    response: Option<ChatResponse>,
    received: Mutex<Vec<String>>,
}

impl FakeChat {
    pub fn replying(reply: &str) -> Self {
        Self::responding(ChatResponse {
            reply: Some(reply.to_string()),
            ..ChatResponse::default()
        })
    }

    pub fn responding(response: ChatResponse) -> Self {
        Self {
            response: Some(response),
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            received: Mutex::new(Vec::new()),
        }
    }

    pub fn received(&self) -> Vec<String> {
        self.received.lock().expect("received lock").clone()
    }
}

#[async_trait]
impl ChatService for FakeChat {
    async fn chat(&self, message: &str) -> Result<ChatResponse> {
        self.received
            .lock()
            .expect("received lock")
            .push(message.to_string());
        self.response.clone().ok_or_else(|| {
            PhoneFinderError::ServiceStatus {
                endpoint: "/chat".to_string(),
                status: 503,
            }
            .into()
        })
    }
}
