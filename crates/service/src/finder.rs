//! Pipeline orchestrator
//!
//! Fans out one fetch → parse → discount chain per registered quote
//! source and exposes the aggregation modes over the resulting handles.
//! Chain construction is non-blocking; only the aggregation waits
//! suspend the caller, and every such wait is bounded by the global
//! deadline.

use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, info, warn};
use uuid::Uuid;

use bestprice_types::{DiscountResolver, PipelineError, PipelineResult, Quote, QuoteSource};

use crate::handle::{self, Handle};
use crate::pool::ExecutorPool;

/// Handle to one running chain; resolves to the final price line.
pub type PriceHandle = Handle<String>;

/// Orchestrates concurrent price discovery across quote sources.
pub struct PriceFinder {
	sources: Vec<Arc<dyn QuoteSource>>,
	resolver: Arc<dyn DiscountResolver>,
	pool: ExecutorPool,
	global_timeout_ms: u64,
}

impl PriceFinder {
	/// Create a finder over the given sources, in registration order.
	pub fn new(
		sources: Vec<Arc<dyn QuoteSource>>,
		resolver: Arc<dyn DiscountResolver>,
		pool: ExecutorPool,
		global_timeout_ms: u64,
	) -> Self {
		Self {
			sources,
			resolver,
			pool,
			global_timeout_ms,
		}
	}

	/// Check that source names are unique within this finder.
	pub fn validate_sources(&self) -> Result<(), String> {
		let mut seen = HashSet::new();
		for source in &self.sources {
			if !seen.insert(source.name()) {
				return Err(format!("duplicate source name '{}'", source.name()));
			}
		}
		Ok(())
	}

	/// Names of the registered sources, in registration order.
	pub fn source_names(&self) -> Vec<&str> {
		self.sources.iter().map(|s| s.name()).collect()
	}

	pub fn stats(&self) -> FinderStats {
		FinderStats {
			total_sources: self.sources.len(),
			pool_capacity: self.pool.capacity(),
			global_timeout_ms: self.global_timeout_ms,
		}
	}

	/// Fan out one chain per source and return the live handles
	/// immediately, in registration order. Never suspends the caller.
	pub fn find_prices(&self, product: &str) -> Vec<PriceHandle> {
		let request_id = Uuid::new_v4();
		info!(
			"finding prices for '{}' across {} source(s) (request {})",
			product,
			self.sources.len(),
			request_id
		);

		self.sources
			.iter()
			.map(|source| self.build_chain(Arc::clone(source), product))
			.collect()
	}

	/// Build and detach one fetch → parse → discount chain.
	///
	/// Fetch and discount resolution are pool submissions; the parse
	/// stage is a continuation on the fetch result, since it is pure
	/// CPU and sub-millisecond. A stage failure short-circuits only
	/// this chain.
	fn build_chain(&self, source: Arc<dyn QuoteSource>, product: &str) -> PriceHandle {
		let name = source.name().to_string();
		let product = product.to_string();
		let resolver = Arc::clone(&self.resolver);
		let pool = self.pool.clone();

		let fetched = {
			let name = name.clone();
			self.pool.submit(async move {
				debug!(source = %name, "fetching quote");
				source.fetch(&product).await.map_err(|error| {
					warn!(source = %name, "fetch failed: {}", error);
					PipelineError::Fetch {
						source: name.clone(),
						error,
					}
				})
			})
		};

		let parsed = {
			let name = name.clone();
			fetched.try_map(move |raw| {
				debug!(source = %name, "parsing quote");
				Quote::parse(&raw).map_err(|error| {
					warn!(source = %name, "malformed quote: {}", error);
					PipelineError::Parse {
						source: name.clone(),
						error,
					}
				})
			})
		};

		let resolved = parsed.and_then(move |quote| {
			pool.submit(async move {
				debug!(source = %name, "resolving discount");
				resolver.resolve(&quote).await.map_err(|error| {
					warn!(source = %name, "discount resolution failed: {}", error);
					PipelineError::Discount {
						source: name.clone(),
						error,
					}
				})
			})
		});

		resolved.spawn()
	}

	/// Fan out and wait for every chain, returning the price lines in
	/// source-registration order. Fails with an aggregate error when
	/// any chain failed, or with a timeout when the global deadline
	/// expires first.
	pub async fn collect_prices(&self, product: &str) -> PipelineResult<Vec<String>> {
		let handles = self.find_prices(product);
		self.within_deadline(handle::join_all(handles)).await?
	}

	/// Like [`collect_prices`](PriceFinder::collect_prices), but failed
	/// chains yield the default value at their registration position.
	/// Only the global deadline can fail this call.
	pub async fn collect_prices_or(
		&self,
		product: &str,
		default: &str,
	) -> PipelineResult<Vec<String>> {
		let handles = self.find_prices(product);
		self.within_deadline(handle::join_all_or(handles, default.to_string()))
			.await
	}

	/// Fan out and fire the consumer with each chain's outcome as it
	/// completes, in completion order. Resolves once every consumer
	/// invocation has fired, or fails on deadline expiry.
	pub async fn for_each_price<F>(&self, product: &str, consumer: F) -> PipelineResult<()>
	where
		F: FnMut(PipelineResult<String>),
	{
		let handles = self.find_prices(product);
		self.within_deadline(handle::on_each_completion(handles, consumer))
			.await
	}

	/// Fan out and resolve with the first chain to reach a terminal
	/// state. Losing chains keep running in the background unobserved.
	pub async fn first_price(&self, product: &str) -> PipelineResult<String> {
		let handles = self.find_prices(product);
		self.within_deadline(handle::first_of(handles)).await?
	}

	/// Bound a wait by the global deadline. On expiry the wait fails
	/// with a timeout error; the in-flight chains keep running to
	/// completion and their results are simply never observed.
	async fn within_deadline<T>(&self, wait: impl Future<Output = T>) -> PipelineResult<T> {
		match timeout(Duration::from_millis(self.global_timeout_ms), wait).await {
			Ok(value) => Ok(value),
			Err(_) => {
				warn!(
					"global deadline reached after {}ms; in-flight chains continue unobserved",
					self.global_timeout_ms
				);
				Err(PipelineError::Timeout {
					timeout_ms: self.global_timeout_ms,
				})
			},
		}
	}
}

/// Finder statistics
#[derive(Debug, Clone)]
pub struct FinderStats {
	pub total_sources: usize,
	pub pool_capacity: usize,
	pub global_timeout_ms: u64,
}
