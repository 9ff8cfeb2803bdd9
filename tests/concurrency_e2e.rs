//! Concurrency E2E tests
//!
//! Reactive-mode delivery, serial-pool scheduling, and a randomized
//! latency stress run over repeated fan-outs.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bestprice_aggregator::mocks::{MockSource, TrackedResolver};
use bestprice_aggregator::{
	DiscountCode, ExecutorPool, PriceFinderBuilder, SimulatedSource,
};

#[tokio::test]
async fn test_reactive_mode_delivers_in_completion_order() {
	let finder = PriceFinderBuilder::new()
		.with_resolver(Arc::new(TrackedResolver::new(Duration::ZERO)))
		.with_source(Arc::new(MockSource::slow("SlowShop", 90.0)))
		.with_source(Arc::new(MockSource::fast("FastShop", 100.0)))
		.build();

	let mut delivered = Vec::new();
	finder
		.for_each_price("myPhone27S", |outcome| {
			delivered.push(outcome.unwrap());
		})
		.await
		.unwrap();

	// Registration order is slow-first; completion order is fast-first.
	assert_eq!(
		delivered,
		vec!["FastShop price is 100.00", "SlowShop price is 90.00"]
	);
}

#[tokio::test]
async fn test_reactive_mode_delivers_failures_through_same_callback() {
	let finder = PriceFinderBuilder::new()
		.with_resolver(Arc::new(TrackedResolver::new(Duration::ZERO)))
		.with_source(Arc::new(MockSource::fast("BestPrice", 100.0)))
		.with_source(Arc::new(MockSource::failing("LetsSaveBig")))
		.build();

	let mut successes = 0;
	let mut failures = Vec::new();
	finder
		.for_each_price("myPhone27S", |outcome| match outcome {
			Ok(_) => successes += 1,
			Err(err) => failures.push(err.source_name().map(str::to_string)),
		})
		.await
		.unwrap();

	assert_eq!(successes, 1);
	assert_eq!(failures, vec![Some("LetsSaveBig".to_string())]);
}

#[tokio::test]
async fn test_serial_pool_completes_every_chain() {
	// One pool slot for eight chains of two submissions each; nothing
	// may deadlock or starve.
	let mut builder = PriceFinderBuilder::new()
		.with_resolver(Arc::new(TrackedResolver::new(Duration::from_millis(1))))
		.with_pool(ExecutorPool::serial());
	for n in 0..8 {
		builder = builder.with_source(Arc::new(MockSource::new(
			format!("Shop{}", n),
			100.0 + f64::from(n),
		)));
	}
	let finder = builder.build();

	let prices = finder.collect_prices("myPhone27S").await.unwrap();

	assert_eq!(prices.len(), 8);
	for (n, line) in prices.iter().enumerate() {
		assert!(line.starts_with(&format!("Shop{} price is", n)));
	}
}

#[tokio::test]
async fn test_randomized_latency_stress() {
	let names = ["BestPrice", "LetsSaveBig", "MyFavoriteShop", "BuyItAll"];
	let mut builder = PriceFinderBuilder::new()
		.with_resolver(Arc::new(TrackedResolver::new(Duration::ZERO)));
	for name in names {
		builder = builder.with_source(Arc::new(
			SimulatedSource::new(name)
				.with_latency(Duration::ZERO, Duration::from_millis(3))
				.with_discount_code(DiscountCode::Gold),
		));
	}
	let finder = builder.build();

	for _ in 0..1000 {
		let start = Instant::now();
		let prices = finder.collect_prices("myPhone27S").await.unwrap();

		assert_eq!(prices.len(), names.len());
		for (name, line) in names.iter().zip(&prices) {
			assert!(
				line.starts_with(&format!("{} price is", name)),
				"out-of-order result: {}",
				line
			);
		}
		// Max source latency plus fixed overhead.
		assert!(start.elapsed() < Duration::from_secs(1));
	}
}
