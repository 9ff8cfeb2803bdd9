//! In-process simulated quote source
//!
//! Stands in for a remote shop in demos and tests: answers after a
//! configurable (by default randomized) latency with a wire-format
//! quote whose price is derived from the product name.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use bestprice_types::{DiscountCode, QuoteSource, SourceError, SourceResult};

#[derive(Debug, Clone)]
pub struct SimulatedSource {
	name: String,
	min_latency: Duration,
	max_latency: Duration,
	/// Tier advertised in every quote; `None` picks a random tier per
	/// quote.
	discount_code: Option<DiscountCode>,
	fail: bool,
}

impl SimulatedSource {
	/// Source answering after 500–2500ms, like a remote shop on a bad
	/// day.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			min_latency: Duration::from_millis(500),
			max_latency: Duration::from_millis(2500),
			discount_code: None,
			fail: false,
		}
	}

	/// Source that always reports itself unavailable.
	pub fn failing(name: impl Into<String>) -> Self {
		Self {
			fail: true,
			..Self::new(name)
		}
	}

	pub fn with_latency(mut self, min: Duration, max: Duration) -> Self {
		self.min_latency = min;
		self.max_latency = max.max(min);
		self
	}

	pub fn with_fixed_latency(mut self, latency: Duration) -> Self {
		self.min_latency = latency;
		self.max_latency = latency;
		self
	}

	pub fn with_discount_code(mut self, code: DiscountCode) -> Self {
		self.discount_code = Some(code);
		self
	}

	fn price_for(&self, product: &str, rng: &mut impl Rng) -> f64 {
		// Derive the price band from the product name's leading
		// characters so repeated queries for one product stay in a
		// stable range.
		let mut chars = product.chars();
		let first = chars.next().map(|c| c as u32).unwrap_or(b'A' as u32);
		let second = chars.next().map(|c| c as u32).unwrap_or(b'B' as u32);
		rng.random::<f64>() * f64::from(first) + f64::from(second)
	}
}

#[async_trait]
impl QuoteSource for SimulatedSource {
	fn name(&self) -> &str {
		&self.name
	}

	async fn fetch(&self, product: &str) -> SourceResult<String> {
		if self.fail {
			return Err(SourceError::unavailable(&self.name, "simulated outage"));
		}

		// Sample everything before sleeping; the rng is not Send.
		let (delay, price, code) = {
			let mut rng = rand::rng();
			let delay = if self.max_latency > self.min_latency {
				self.min_latency
					+ (self.max_latency - self.min_latency).mul_f64(rng.random::<f64>())
			} else {
				self.min_latency
			};
			let price = self.price_for(product, &mut rng);
			let code = self
				.discount_code
				.unwrap_or_else(|| DiscountCode::ALL[rng.random_range(0..DiscountCode::ALL.len())]);
			(delay, price, code)
		};

		tokio::time::sleep(delay).await;
		Ok(format!("{}:{:.2}:{}", self.name, price, code))
	}
}
