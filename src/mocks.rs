//! Mock collaborators for examples and testing
//!
//! Deterministic quote sources and resolvers with controllable timing
//! and failure behavior, plus call tracking to verify which
//! collaborators actually ran.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use bestprice_types::{
	DiscountCode, DiscountResolver, Quote, QuoteSource, SourceError, SourceResult,
};

/// Shared invocation counter.
#[derive(Debug, Clone, Default)]
pub struct CallTracker {
	calls: Arc<AtomicUsize>,
}

impl CallTracker {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn record(&self) {
		self.calls.fetch_add(1, Ordering::SeqCst);
	}

	pub fn count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

/// Quote source with a fixed price and configurable delay.
#[derive(Debug, Clone)]
pub struct MockSource {
	pub name: String,
	pub price: f64,
	pub discount_code: DiscountCode,
	pub delay: Duration,
	pub should_fail: bool,
	pub tracker: CallTracker,
}

impl MockSource {
	pub fn new(name: impl Into<String>, price: f64) -> Self {
		Self {
			name: name.into(),
			price,
			discount_code: DiscountCode::None,
			delay: Duration::from_millis(10),
			should_fail: false,
			tracker: CallTracker::new(),
		}
	}

	/// Source answering in ~5ms.
	pub fn fast(name: impl Into<String>, price: f64) -> Self {
		Self::new(name, price).with_delay(Duration::from_millis(5))
	}

	/// Source answering in ~150ms.
	pub fn slow(name: impl Into<String>, price: f64) -> Self {
		Self::new(name, price).with_delay(Duration::from_millis(150))
	}

	/// Source that always fails, quickly.
	pub fn failing(name: impl Into<String>) -> Self {
		let mut source = Self::new(name, 0.0).with_delay(Duration::from_millis(5));
		source.should_fail = true;
		source
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = delay;
		self
	}

	pub fn with_discount_code(mut self, code: DiscountCode) -> Self {
		self.discount_code = code;
		self
	}

	pub fn call_count(&self) -> usize {
		self.tracker.count()
	}
}

#[async_trait]
impl QuoteSource for MockSource {
	fn name(&self) -> &str {
		&self.name
	}

	async fn fetch(&self, _product: &str) -> SourceResult<String> {
		self.tracker.record();
		tokio::time::sleep(self.delay).await;

		if self.should_fail {
			return Err(SourceError::unavailable(
				&self.name,
				"mock source configured to fail",
			));
		}

		Ok(format!(
			"{}:{}:{}",
			self.name, self.price, self.discount_code
		))
	}
}

/// Source producing a raw string that does not parse.
#[derive(Debug, Clone)]
pub struct GarbledSource {
	pub name: String,
	pub raw: String,
}

impl GarbledSource {
	pub fn new(name: impl Into<String>, raw: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			raw: raw.into(),
		}
	}
}

#[async_trait]
impl QuoteSource for GarbledSource {
	fn name(&self) -> &str {
		&self.name
	}

	async fn fetch(&self, _product: &str) -> SourceResult<String> {
		Ok(self.raw.clone())
	}
}

/// Resolver that fails every request.
#[derive(Debug, Clone, Default)]
pub struct FailingResolver;

#[async_trait]
impl DiscountResolver for FailingResolver {
	async fn resolve(&self, quote: &Quote) -> SourceResult<String> {
		Err(SourceError::unavailable(
			&quote.source,
			"mock discount service configured to fail",
		))
	}
}

/// Resolver with call tracking and a configurable delay.
#[derive(Debug, Clone)]
pub struct TrackedResolver {
	pub delay: Duration,
	pub tracker: CallTracker,
}

impl TrackedResolver {
	pub fn new(delay: Duration) -> Self {
		Self {
			delay,
			tracker: CallTracker::new(),
		}
	}

	pub fn call_count(&self) -> usize {
		self.tracker.count()
	}
}

#[async_trait]
impl DiscountResolver for TrackedResolver {
	async fn resolve(&self, quote: &Quote) -> SourceResult<String> {
		self.tracker.record();
		if !self.delay.is_zero() {
			tokio::time::sleep(self.delay).await;
		}
		Ok(format!(
			"{} price is {:.2}",
			quote.source,
			quote.discounted_price()
		))
	}
}
