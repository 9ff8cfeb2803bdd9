//! Discount resolver implementations

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use bestprice_types::{DiscountResolver, Quote, SourceError, SourceResult};

/// Resolver applying the tier percentage in-process.
///
/// The configurable delay stands in for the latency of the centralized
/// discount service the sources share.
#[derive(Debug, Clone)]
pub struct StandardDiscountService {
	latency: Duration,
}

impl StandardDiscountService {
	/// Service with the canonical one-second response time.
	pub fn new() -> Self {
		Self {
			latency: Duration::from_secs(1),
		}
	}

	/// Service that answers immediately. Deterministic for tests.
	pub fn instant() -> Self {
		Self {
			latency: Duration::ZERO,
		}
	}

	pub fn with_latency(mut self, latency: Duration) -> Self {
		self.latency = latency;
		self
	}
}

impl Default for StandardDiscountService {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl DiscountResolver for StandardDiscountService {
	async fn resolve(&self, quote: &Quote) -> SourceResult<String> {
		if !self.latency.is_zero() {
			tokio::time::sleep(self.latency).await;
		}
		Ok(format!(
			"{} price is {:.2}",
			quote.source,
			quote.discounted_price()
		))
	}
}

/// Remote discount service: posts the quote as JSON and expects the
/// final price line as the response body.
#[derive(Debug, Clone)]
pub struct HttpDiscountResolver {
	endpoint: String,
	client: Client,
}

impl HttpDiscountResolver {
	pub fn new(endpoint: impl Into<String>, request_timeout_ms: u64) -> SourceResult<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(request_timeout_ms))
			.build()?;

		Ok(Self {
			endpoint: endpoint.into().trim_end_matches('/').to_string(),
			client,
		})
	}
}

#[async_trait]
impl DiscountResolver for HttpDiscountResolver {
	async fn resolve(&self, quote: &Quote) -> SourceResult<String> {
		let url = format!("{}/discount", self.endpoint);
		debug!(source = %quote.source, url = %url, "requesting discount");

		let response = self.client.post(&url).json(quote).send().await?;

		if !response.status().is_success() {
			return Err(SourceError::unavailable(
				&quote.source,
				format!("discount service returned HTTP {}", response.status()),
			));
		}

		let body = response.text().await?;
		let line = body.trim();
		if line.is_empty() {
			return Err(SourceError::InvalidResponse {
				name: quote.source.clone(),
				reason: "empty discount response".to_string(),
			});
		}

		Ok(line.to_string())
	}
}
