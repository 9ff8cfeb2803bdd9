//! Best-Price Sources
//!
//! Concrete quote-source and discount-resolver implementations, plus
//! the registry that owns sources for the lifetime of a finder run.

use std::sync::Arc;

use bestprice_types::{QuoteSource, SourceError, SourceResult};

pub mod discount;
pub mod http_source;
pub mod sim_source;

pub use discount::{HttpDiscountResolver, StandardDiscountService};
pub use http_source::HttpQuoteSource;
pub use sim_source::SimulatedSource;

/// Owns registered quote sources, preserving registration order.
///
/// Aggregated results are returned in this order, so it is part of the
/// registry's contract, not an implementation detail.
#[derive(Debug, Default)]
pub struct SourceRegistry {
	sources: Vec<Arc<dyn QuoteSource>>,
}

impl SourceRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a source. Names must be unique within the registry.
	pub fn register(&mut self, source: Arc<dyn QuoteSource>) -> SourceResult<()> {
		if self.sources.iter().any(|s| s.name() == source.name()) {
			return Err(SourceError::DuplicateName {
				name: source.name().to_string(),
			});
		}
		self.sources.push(source);
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&Arc<dyn QuoteSource>> {
		self.sources.iter().find(|s| s.name() == name)
	}

	/// Source names, in registration order.
	pub fn names(&self) -> Vec<&str> {
		self.sources.iter().map(|s| s.name()).collect()
	}

	pub fn len(&self) -> usize {
		self.sources.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sources.is_empty()
	}

	/// Hand the sources over to a finder, in registration order.
	pub fn into_sources(self) -> Vec<Arc<dyn QuoteSource>> {
		self.sources
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_registry_preserves_registration_order() {
		let mut registry = SourceRegistry::new();
		for name in ["BestPrice", "LetsSaveBig", "MyFavoriteShop"] {
			registry
				.register(Arc::new(SimulatedSource::new(name)))
				.unwrap();
		}

		assert_eq!(
			registry.names(),
			vec!["BestPrice", "LetsSaveBig", "MyFavoriteShop"]
		);
	}

	#[test]
	fn test_registry_rejects_duplicate_names() {
		let mut registry = SourceRegistry::new();
		registry
			.register(Arc::new(SimulatedSource::new("BestPrice")))
			.unwrap();

		let outcome = registry.register(Arc::new(SimulatedSource::new("BestPrice")));
		assert!(matches!(
			outcome,
			Err(SourceError::DuplicateName { name }) if name == "BestPrice"
		));
	}

	#[test]
	fn test_registry_lookup_by_name() {
		let mut registry = SourceRegistry::new();
		registry
			.register(Arc::new(SimulatedSource::new("BuyItAll")))
			.unwrap();

		assert!(registry.get("BuyItAll").is_some());
		assert!(registry.get("NoSuchShop").is_none());
	}
}
