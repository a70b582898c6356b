//! HTTP client for the catalog and assistant services
//!
//! JSON over HTTP against a single base URL. Requests carry no timeout: a
//! stalled service leaves the caller waiting.

use crate::config::ServiceConfig;
use crate::error::{PhoneFinderError, Result};
use crate::models::{
    ChatRequest, ChatResponse, FilterCriteria, FilterResponse, PhoneResult, PriceBounds,
};
use crate::service::{ChatService, SearchService};

use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

/// Client for the phone catalog API
///
/// # Examples
///
/// ```no_run
/// use phonefinder::config::ServiceConfig;
/// use phonefinder::service::{ApiClient, SearchService};
///
/// # async fn example() -> phonefinder::error::Result<()> {
/// let client = ApiClient::new(&ServiceConfig::default())?;
/// let brands = client.brands().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for the configured base URL
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// created
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(PhoneFinderError::Url)?;
        // Endpoints resolve under the base path, so it must end in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(concat!("phonefinder/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PhoneFinderError::Config(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!("Initialized catalog client: base_url={}", base_url);

        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let relative = path.trim_start_matches('/');
        Ok(self.base_url.join(relative).map_err(PhoneFinderError::Url)?)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(PhoneFinderError::Http)?;
        decode(path, response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(PhoneFinderError::Http)?;
        decode(path, response).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(path: &str, response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        tracing::warn!(endpoint = path, status = status.as_u16(), "Service error");
        return Err(PhoneFinderError::ServiceStatus {
            endpoint: path.to_string(),
            status: status.as_u16(),
        }
        .into());
    }

    let body = response.text().await.map_err(PhoneFinderError::Http)?;
    let value = serde_json::from_str(&body).map_err(PhoneFinderError::Serialization)?;
    Ok(value)
}

#[async_trait]
impl SearchService for ApiClient {
    async fn price_range(&self) -> Result<PriceBounds> {
        self.get_json("/price-range").await
    }

    async fn brands(&self) -> Result<Vec<String>> {
        self.get_json("/brands").await
    }

    async fn filter(&self, criteria: &FilterCriteria) -> Result<Vec<PhoneResult>> {
        tracing::info!(
            brand = ?criteria.brand,
            min_price = criteria.min_price,
            max_price = criteria.max_price,
            "Sending search request"
        );
        let response: FilterResponse = self.post_json("/filter", criteria).await?;

        if let Some(count) = response.count {
            if count != response.results.len() {
                tracing::warn!(
                    count,
                    received = response.results.len(),
                    "Filter response count does not match result list"
                );
            }
        }

        tracing::info!(results = response.results.len(), "Received search results");
        Ok(response.results)
    }
}

#[async_trait]
impl ChatService for ApiClient {
    async fn chat(&self, message: &str) -> Result<ChatResponse> {
        let request = ChatRequest {
            message: message.to_string(),
        };
        let response: ChatResponse = self.post_json("/chat", &request).await?;
        tracing::debug!(kind = ?response.kind, "Received chat reply");
        Ok(response)
    }
}
