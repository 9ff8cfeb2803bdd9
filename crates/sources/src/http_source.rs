//! HTTP-backed quote source
//!
//! Talks to a remote quote service that answers `GET /quote?product=…`
//! with the raw wire-format quote string as its body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use bestprice_types::{QuoteSource, SourceError, SourceResult};

#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
	name: String,
	endpoint: String,
	client: Client,
}

impl HttpQuoteSource {
	pub fn new(
		name: impl Into<String>,
		endpoint: impl Into<String>,
		request_timeout_ms: u64,
	) -> SourceResult<Self> {
		let client = Client::builder()
			.timeout(Duration::from_millis(request_timeout_ms))
			.build()?;

		Ok(Self {
			name: name.into(),
			endpoint: endpoint.into().trim_end_matches('/').to_string(),
			client,
		})
	}
}

#[async_trait]
impl QuoteSource for HttpQuoteSource {
	fn name(&self) -> &str {
		&self.name
	}

	async fn fetch(&self, product: &str) -> SourceResult<String> {
		let url = format!("{}/quote", self.endpoint);
		debug!(source = %self.name, url = %url, "requesting quote");

		let response = self
			.client
			.get(&url)
			.query(&[("product", product)])
			.send()
			.await?;

		if !response.status().is_success() {
			return Err(SourceError::unavailable(
				&self.name,
				format!("HTTP {}", response.status()),
			));
		}

		let body = response.text().await?;
		let raw = body.trim();
		if raw.is_empty() {
			return Err(SourceError::InvalidResponse {
				name: self.name.clone(),
				reason: "empty quote response".to_string(),
			});
		}

		Ok(raw.to_string())
	}
}
