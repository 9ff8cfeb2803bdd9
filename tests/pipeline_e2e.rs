//! Pipeline E2E tests
//!
//! End-to-end coverage of the fetch → parse → discount chains and the
//! aggregation modes over them: registration-order join, default
//! substitution, first-of, and failure attribution.

use std::sync::Arc;
use std::time::Duration;

use bestprice_aggregator::mocks::{FailingResolver, GarbledSource, MockSource, TrackedResolver};
use bestprice_aggregator::{
	DiscountCode, ExecutorPool, PipelineError, PriceFinderBuilder, Settings,
};

fn finder_for(
	sources: Vec<MockSource>,
	resolver: TrackedResolver,
) -> bestprice_aggregator::PriceFinder {
	let mut builder = PriceFinderBuilder::new().with_resolver(Arc::new(resolver));
	for source in sources {
		builder = builder.with_source(Arc::new(source));
	}
	builder.build()
}

#[tokio::test]
async fn test_join_all_returns_registration_order_despite_latencies() {
	// Slowest first, fastest last: completion order is the reverse of
	// registration order.
	let sources = vec![
		MockSource::new("BestPrice", 100.0).with_delay(Duration::from_millis(80)),
		MockSource::new("LetsSaveBig", 90.0).with_delay(Duration::from_millis(40)),
		MockSource::new("MyFavoriteShop", 110.0).with_delay(Duration::from_millis(20)),
		MockSource::new("BuyItAll", 120.0).with_delay(Duration::from_millis(5)),
	];
	let finder = finder_for(sources, TrackedResolver::new(Duration::ZERO));

	let prices = finder.collect_prices("myPhone27S").await.unwrap();

	assert_eq!(
		prices,
		vec![
			"BestPrice price is 100.00",
			"LetsSaveBig price is 90.00",
			"MyFavoriteShop price is 110.00",
			"BuyItAll price is 120.00",
		]
	);
}

#[tokio::test]
async fn test_join_all_surfaces_single_failure_as_aggregate() {
	let sources = vec![
		MockSource::fast("BestPrice", 100.0),
		MockSource::failing("LetsSaveBig"),
		MockSource::fast("BuyItAll", 120.0),
	];
	let finder = finder_for(sources, TrackedResolver::new(Duration::ZERO));

	let outcome = finder.collect_prices("myPhone27S").await;

	match outcome {
		Err(PipelineError::Aggregate { total, errors }) => {
			assert_eq!(total, 3);
			assert_eq!(errors.len(), 1);
			assert_eq!(errors[0].source_name(), Some("LetsSaveBig"));
		},
		other => panic!("expected aggregate error, got {:?}", other.map(|v| v.len())),
	}
}

#[tokio::test]
async fn test_join_all_or_substitutes_default_at_failed_position() {
	let sources = vec![
		MockSource::fast("BestPrice", 100.0),
		MockSource::failing("LetsSaveBig"),
		MockSource::fast("BuyItAll", 120.0),
	];
	let finder = finder_for(sources, TrackedResolver::new(Duration::ZERO));

	let prices = finder
		.collect_prices_or("myPhone27S", "price unavailable")
		.await
		.unwrap();

	assert_eq!(
		prices,
		vec![
			"BestPrice price is 100.00",
			"price unavailable",
			"BuyItAll price is 120.00",
		]
	);
}

#[tokio::test]
async fn test_malformed_quote_fails_only_its_own_chain() {
	let tracked = TrackedResolver::new(Duration::ZERO);
	let finder = PriceFinderBuilder::new()
		.with_resolver(Arc::new(tracked))
		.with_source(Arc::new(MockSource::fast("BestPrice", 100.0)))
		.with_source(Arc::new(GarbledSource::new(
			"LetsSaveBig",
			"LetsSaveBig:not-a-price:GOLD",
		)))
		.build();

	let outcome = finder.collect_prices("myPhone27S").await;

	match outcome {
		Err(PipelineError::Aggregate { errors, .. }) => {
			assert_eq!(errors.len(), 1);
			assert!(matches!(
				&errors[0],
				PipelineError::Parse { source, .. } if source == "LetsSaveBig"
			));
		},
		other => panic!("expected aggregate error, got {:?}", other.map(|v| v.len())),
	}
}

#[tokio::test]
async fn test_discount_failure_is_attributed_to_its_stage() {
	let finder = PriceFinderBuilder::new()
		.with_resolver(Arc::new(FailingResolver))
		.with_source(Arc::new(MockSource::fast("BestPrice", 100.0)))
		.build();

	let outcome = finder.collect_prices("myPhone27S").await;

	match outcome {
		Err(PipelineError::Aggregate { errors, .. }) => {
			assert!(matches!(
				&errors[0],
				PipelineError::Discount { source, .. } if source == "BestPrice"
			));
		},
		other => panic!("expected aggregate error, got {:?}", other.map(|v| v.len())),
	}
}

#[tokio::test]
async fn test_first_price_returns_fastest_and_abandons_losers() {
	let resolver = TrackedResolver::new(Duration::ZERO);
	let tracker = resolver.tracker.clone();

	let sources = vec![
		MockSource::slow("SlowShop", 90.0),
		MockSource::fast("FastShop", 100.0),
	];
	let finder = finder_for(sources, resolver);

	let price = finder.first_price("myPhone27S").await.unwrap();
	assert_eq!(price, "FastShop price is 100.00");

	// The losing chain was not cancelled: give it time to finish and
	// confirm its discount stage still ran in the background.
	tokio::time::sleep(Duration::from_millis(300)).await;
	assert_eq!(tracker.count(), 2);
}

#[tokio::test]
async fn test_deadline_expiry_leaves_chains_running() {
	let resolver = TrackedResolver::new(Duration::ZERO);
	let tracker = resolver.tracker.clone();

	let mut settings = Settings::default();
	settings.sources.clear();
	settings.timeouts.global_ms = 50;

	let finder = PriceFinderBuilder::new()
		.with_settings(settings)
		.with_resolver(Arc::new(resolver))
		.with_source(Arc::new(
			MockSource::new("SlowShop", 90.0).with_delay(Duration::from_millis(200)),
		))
		.build();

	let outcome = finder.collect_prices("myPhone27S").await;
	assert!(matches!(
		outcome,
		Err(PipelineError::Timeout { timeout_ms: 50 })
	));
	assert_eq!(tracker.count(), 0);

	// The abandoned chain keeps running to completion.
	tokio::time::sleep(Duration::from_millis(400)).await;
	assert_eq!(tracker.count(), 1);
}

#[tokio::test]
async fn test_discount_tiers_apply_expected_percentages() {
	let sources = vec![
		MockSource::fast("Platinum", 100.0).with_discount_code(DiscountCode::Platinum),
		MockSource::fast("Untiered", 100.0).with_discount_code(DiscountCode::None),
	];
	let finder = finder_for(sources, TrackedResolver::new(Duration::ZERO));

	let prices = finder.collect_prices("myPhone27S").await.unwrap();

	assert_eq!(prices[0], "Platinum price is 85.00");
	assert_eq!(prices[1], "Untiered price is 100.00");
}

#[tokio::test]
async fn test_combined_rate_conversion() {
	// Price in one currency combined with an independently fetched
	// exchange rate: both branches run concurrently, the combiner runs
	// once both are in.
	let pool = ExecutorPool::sized_for(2);

	let price = pool.submit(async {
		tokio::time::sleep(Duration::from_millis(20)).await;
		Ok(100.0_f64)
	});
	let rate = pool.submit(async {
		tokio::time::sleep(Duration::from_millis(10)).await;
		Ok(0.85_f64)
	});

	let converted = price.zip_with(rate, |price, rate| price * rate);
	assert_eq!(converted.await.unwrap(), 85.0);
}
