//! Service startup logging
//!
//! Tracing initialization from [`LoggingSettings`] plus the startup
//! banner lines logged by the demo binary.

use tracing::info;

use crate::settings::{LogFormat, LoggingSettings};

/// Initialize the global tracing subscriber from logging settings.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_tracing(settings: &LoggingSettings) {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.level));

	match settings.format {
		LogFormat::Json => {
			let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Pretty => {
			let subscriber = tracing_subscriber::fmt()
				.pretty()
				.with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
		LogFormat::Compact => {
			let subscriber = tracing_subscriber::fmt()
				.compact()
				.with_env_filter(env_filter);
			if settings.structured {
				subscriber.with_target(true).with_thread_ids(true).init();
			} else {
				subscriber.init();
			}
		},
	}
}

/// Log service information at startup.
pub fn log_service_info() {
	let service_name = "bestprice-aggregator";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Best-Price Aggregator Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {}", std::env::consts::OS);
	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Log startup completion once the finder is assembled.
pub fn log_startup_complete(source_count: usize, pool_capacity: usize) {
	info!("✅ Best-Price Aggregator ready");
	info!(
		"📡 {} source(s) registered, pool capacity {}",
		source_count, pool_capacity
	);
}
