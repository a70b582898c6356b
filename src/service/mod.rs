//! Remote collaborators of the page
//!
//! The catalog scoring service and the assistant chat service are consumed
//! through the traits below so controllers can be driven by the HTTP client
//! in production and by fakes in tests.

use crate::error::Result;
use crate::models::{ChatResponse, FilterCriteria, PhoneResult, PriceBounds};
use async_trait::async_trait;

pub mod http;
pub use http::ApiClient;

/// Catalog endpoints used by the search page
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Catalog price bounds used to initialize the range control
    async fn price_range(&self) -> Result<PriceBounds>;

    /// Brand names for the dropdown, in service order
    async fn brands(&self) -> Result<Vec<String>>;

    /// Score and filter the catalog; results come back already ranked
    async fn filter(&self, criteria: &FilterCriteria) -> Result<Vec<PhoneResult>>;
}

/// Assistant endpoint used by the chat widget
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Exchange one free-text message for a reply
    async fn chat(&self, message: &str) -> Result<ChatResponse>;
}
