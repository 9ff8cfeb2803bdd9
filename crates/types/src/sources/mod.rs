//! Boundary traits for the pipeline's external collaborators

use std::fmt::Debug;

use async_trait::async_trait;

use crate::quotes::Quote;

pub mod errors;

pub use errors::SourceError;

/// Result type for collaborator calls.
pub type SourceResult<T> = Result<T, SourceError>;

/// A quote source: one remote-like provider of raw price quotes.
///
/// Implementations may take arbitrarily long to answer and may fail.
/// They must be safe to invoke concurrently; the orchestrator issues one
/// invocation per chain and never shares an in-flight call.
#[async_trait]
pub trait QuoteSource: Send + Sync + Debug {
	/// Source name, unique within a registry.
	fn name(&self) -> &str;

	/// Fetch the raw wire-format quote string for a product.
	async fn fetch(&self, product: &str) -> SourceResult<String>;
}

/// A discount resolver: turns a structured quote into the final
/// human-readable price line `"<source> price is <amount>"`.
///
/// Remote-like with its own latency; same concurrency contract as
/// [`QuoteSource`].
#[async_trait]
pub trait DiscountResolver: Send + Sync + Debug {
	async fn resolve(&self, quote: &Quote) -> SourceResult<String>;
}
