//! Data model shared by the search page, the chat widget and the details view
//!
//! These types mirror the JSON exchanged with the catalog service and the
//! values written to page storage.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized query assembled from every filter control
///
/// A `None` field means no constraint on that attribute. `min_price <=
/// max_price` is upheld by the price range control and not re-checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Selected brand, `None` when the dropdown is on its empty option
    pub brand: Option<String>,
    /// Lower price handle
    pub min_price: f64,
    /// Upper price handle
    pub max_price: f64,
    /// Minimum battery capacity (mAh)
    pub min_battery: Option<f64>,
    /// Minimum RAM (MB)
    pub min_ram: Option<f64>,
    /// Minimum rear camera resolution (MP)
    pub min_camera_mp: Option<f64>,
}

/// One scored catalog item as returned by the search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneResult {
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub battery: f64,
    pub camera_mp: f64,
    pub ram: f64,
    /// Server-computed relevance score in `[0, 100]`
    pub match_percentage: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasons: Option<Vec<String>>,
}

/// The `(filters, results)` pair saved after a successful search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSearchState {
    pub filters: FilterCriteria,
    pub results: Vec<PhoneResult>,
}

/// Catalog price bounds (`GET /price-range`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

/// Response body of `POST /filter`
#[derive(Debug, Clone, Deserialize)]
pub struct FilterResponse {
    pub results: Vec<PhoneResult>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// Request body of `POST /chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// How the assistant produced its reply
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ReplyKind {
    /// Answer grounded in retrieved catalog documents
    Rag,
    /// General conversational answer
    General,
    Other(String),
}

impl From<String> for ReplyKind {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "RAG" => Self::Rag,
            "GENERAL" => Self::General,
            _ => Self::Other(value),
        }
    }
}

/// Response body of `POST /chat`
///
/// The service populates either `reply` or `message`; `reply` wins when both
/// are present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<ReplyKind>,
    #[serde(default)]
    pub recommendations: Option<Vec<PhoneResult>>,
}

impl ChatResponse {
    /// Reply text, preferring a non-empty `reply` over `message`
    pub fn reply_text(&self) -> Option<&str> {
        self.reply
            .as_deref()
            .filter(|text| !text.is_empty())
            .or_else(|| self.message.as_deref().filter(|text| !text.is_empty()))
    }

    /// Recommendations in service order (empty when absent)
    pub fn recommendations(&self) -> &[PhoneResult] {
        self.recommendations.as_deref().unwrap_or(&[])
    }
}

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Bot => write!(f, "bot"),
        }
    }
}

/// A single chat message; rendered, never persisted
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    /// Create a message stamped with the current local time
    pub fn now(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            sent_at: Local::now(),
        }
    }
}
