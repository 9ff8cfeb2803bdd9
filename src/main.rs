//! Best-Price Aggregator demo binary
//!
//! Queries the configured sources for a product and prints each
//! discounted price line as it arrives, then a summary once every
//! source has responded.

use std::time::Instant;

use bestprice_aggregator::{
	init_tracing, load_config, log_service_info, log_startup_complete, PriceFinderBuilder,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	dotenvy::dotenv().ok();

	let settings = load_config().unwrap_or_default();
	init_tracing(&settings.logging);
	log_service_info();

	let product = std::env::args()
		.nth(1)
		.unwrap_or_else(|| "myPhone27S".to_string());

	let finder = PriceFinderBuilder::from_settings(settings)?.build();
	let stats = finder.stats();
	log_startup_complete(stats.total_sources, stats.pool_capacity);

	let start = Instant::now();
	finder
		.for_each_price(&product, |outcome| match outcome {
			Ok(line) => println!("{} (done in {} msecs)", line, start.elapsed().as_millis()),
			Err(err) => println!(
				"{} (after {} msecs)",
				err,
				start.elapsed().as_millis()
			),
		})
		.await?;

	println!(
		"All sources have now responded in {} msecs",
		start.elapsed().as_millis()
	);

	Ok(())
}
