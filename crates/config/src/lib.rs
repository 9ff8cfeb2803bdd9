//! Best-Price Config
//!
//! Settings structures and file/env configuration loading.

pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use loader::load_config;
pub use settings::{
	LogFormat, LoggingSettings, PoolSettings, Settings, SourceConfig, TimeoutSettings,
};
pub use startup_logger::{init_tracing, log_service_info, log_startup_complete};
