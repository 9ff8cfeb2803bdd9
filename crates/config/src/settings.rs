//! Configuration settings structures

use bestprice_types::DiscountCode;
use serde::{Deserialize, Serialize};

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
	/// Quote sources, in registration order. Order is significant:
	/// aggregated results are returned in this order.
	#[serde(default = "default_sources")]
	pub sources: Vec<SourceConfig>,
	#[serde(default)]
	pub timeouts: TimeoutSettings,
	#[serde(default)]
	pub pool: PoolSettings,
	#[serde(default)]
	pub logging: LoggingSettings,
}

/// Individual quote-source configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceConfig {
	pub name: String,
	#[serde(default = "default_enabled")]
	pub enabled: bool,
	/// Base URL of an HTTP quote service. When absent the source is
	/// simulated in-process.
	pub endpoint: Option<String>,
	/// Discount tier a simulated source advertises. Absent means a
	/// random tier per quote.
	pub discount_code: Option<DiscountCode>,
	/// Latency range for a simulated source.
	pub min_latency_ms: Option<u64>,
	pub max_latency_ms: Option<u64>,
}

impl SourceConfig {
	pub fn simulated(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			enabled: true,
			endpoint: None,
			discount_code: None,
			min_latency_ms: None,
			max_latency_ms: None,
		}
	}
}

fn default_enabled() -> bool {
	true
}

/// The classic four-shop demo roster.
fn default_sources() -> Vec<SourceConfig> {
	vec![
		SourceConfig::simulated("BestPrice"),
		SourceConfig::simulated("LetsSaveBig"),
		SourceConfig::simulated("MyFavoriteShop"),
		SourceConfig::simulated("BuyItAll"),
	]
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TimeoutSettings {
	/// Global aggregation deadline in milliseconds
	#[serde(default = "default_global_ms")]
	pub global_ms: u64,
	/// Request timeout for HTTP collaborators
	#[serde(default = "default_request_ms")]
	pub request_ms: u64,
}

fn default_global_ms() -> u64 {
	5000
}

fn default_request_ms() -> u64 {
	3000
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			global_ms: default_global_ms(),
			request_ms: default_request_ms(),
		}
	}
}

/// Executor pool configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PoolSettings {
	/// Upper bound on concurrently executing latency-bearing stages.
	/// The pool is sized to min(source count, this cap).
	#[serde(default = "default_max_workers")]
	pub max_workers: usize,
}

fn default_max_workers() -> usize {
	100
}

impl Default for PoolSettings {
	fn default() -> Self {
		Self {
			max_workers: default_max_workers(),
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSettings {
	#[serde(default = "default_log_level")]
	pub level: String,
	#[serde(default)]
	pub format: LogFormat,
	#[serde(default)]
	pub structured: bool,
}

fn default_log_level() -> String {
	"info".to_string()
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: default_log_level(),
			format: LogFormat::default(),
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	#[default]
	Compact,
}

impl Settings {
	/// Sources that are enabled, in registration order.
	pub fn enabled_sources(&self) -> Vec<&SourceConfig> {
		self.sources.iter().filter(|s| s.enabled).collect()
	}
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			sources: default_sources(),
			timeouts: TimeoutSettings::default(),
			pool: PoolSettings::default(),
			logging: LoggingSettings::default(),
		}
	}
}
