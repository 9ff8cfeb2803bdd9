//! Best-Price Aggregator Library
//!
//! A concurrent best-price finder: fans out one asynchronous
//! fetch → parse → discount chain per registered quote source, and
//! aggregates the results under a global deadline without letting one
//! slow or failing source stall the others.

use std::cmp;
use std::sync::Arc;
use std::time::Duration;

// Core domain types
pub use bestprice_types::{
	DiscountCode,
	DiscountResolver,
	// Error types
	PipelineError,
	PipelineResult,
	// Primary domain entities
	Quote,
	QuoteParseError,
	QuoteSource,
	SourceError,
	SourceResult,
};

// Service layer
pub use bestprice_service::{
	first_of, join_all, join_all_or, on_each_completion, ExecutorPool, FinderStats, Handle,
	PriceFinder, PriceHandle, MAX_WORKERS,
};

// Source implementations
pub use bestprice_sources::{
	HttpDiscountResolver, HttpQuoteSource, SimulatedSource, SourceRegistry,
	StandardDiscountService,
};

// Config
pub use bestprice_config::{
	init_tracing, load_config, log_service_info, log_startup_complete, Settings, SourceConfig,
};

// Module aliases for advanced usage
pub mod types {
	pub use bestprice_types::*;
}

pub mod service {
	pub use bestprice_service::*;
}

pub mod config {
	pub use bestprice_config::*;
}

pub mod sources {
	pub use bestprice_sources::*;
}

pub mod mocks;

/// Builder pattern for assembling a [`PriceFinder`]
///
/// Sources, the discount resolver, and the executor pool are all
/// injectable, so tests can substitute deterministic collaborators and
/// a serial pool.
pub struct PriceFinderBuilder {
	settings: Option<Settings>,
	registry: SourceRegistry,
	resolver: Option<Arc<dyn DiscountResolver>>,
	pool: Option<ExecutorPool>,
}

impl Default for PriceFinderBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl PriceFinderBuilder {
	/// Create an empty builder.
	pub fn new() -> Self {
		Self {
			settings: None,
			registry: SourceRegistry::new(),
			resolver: None,
			pool: None,
		}
	}

	/// Create a builder with sources assembled from configuration:
	/// HTTP-backed when an endpoint is configured, simulated otherwise.
	pub fn from_settings(settings: Settings) -> Result<Self, Box<dyn std::error::Error>> {
		let mut registry = SourceRegistry::new();

		for config in settings.enabled_sources() {
			let source: Arc<dyn QuoteSource> = match &config.endpoint {
				Some(endpoint) => Arc::new(HttpQuoteSource::new(
					config.name.clone(),
					endpoint.clone(),
					settings.timeouts.request_ms,
				)?),
				None => {
					let mut source = SimulatedSource::new(config.name.clone());
					if config.min_latency_ms.is_some() || config.max_latency_ms.is_some() {
						let min = config.min_latency_ms.unwrap_or(0);
						let max = config.max_latency_ms.unwrap_or(min);
						source = source.with_latency(
							Duration::from_millis(min),
							Duration::from_millis(max),
						);
					}
					if let Some(code) = config.discount_code {
						source = source.with_discount_code(code);
					}
					Arc::new(source)
				},
			};
			registry.register(source)?;
		}

		Ok(Self {
			settings: Some(settings),
			registry,
			resolver: None,
			pool: None,
		})
	}

	/// Register an additional source (uses the source's own name).
	/// Panics on a duplicate name; this is intentional for startup-time
	/// configuration errors.
	pub fn with_source(mut self, source: Arc<dyn QuoteSource>) -> Self {
		self.registry
			.register(source)
			.expect("duplicate source name during startup - this is a fatal configuration error");
		self
	}

	/// Set a custom discount resolver.
	pub fn with_resolver(mut self, resolver: Arc<dyn DiscountResolver>) -> Self {
		self.resolver = Some(resolver);
		self
	}

	/// Set a custom executor pool.
	pub fn with_pool(mut self, pool: ExecutorPool) -> Self {
		self.pool = Some(pool);
		self
	}

	/// Set custom settings.
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings.
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Assemble the finder. The pool defaults to
	/// `min(source count, configured max workers)`; the resolver
	/// defaults to the standard discount service.
	pub fn build(self) -> PriceFinder {
		let settings = self.settings.unwrap_or_default();
		let sources = self.registry.into_sources();

		let pool = self.pool.unwrap_or_else(|| {
			ExecutorPool::with_capacity(cmp::min(sources.len(), settings.pool.max_workers))
		});
		let resolver = self
			.resolver
			.unwrap_or_else(|| Arc::new(StandardDiscountService::new()));

		PriceFinder::new(sources, resolver, pool, settings.timeouts.global_ms)
	}
}
