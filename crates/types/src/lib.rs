//! Best-Price Types
//!
//! Domain model, boundary traits, and error taxonomy shared by every
//! crate in the workspace. No orchestration logic lives here.

pub mod pipeline;
pub mod quotes;
pub mod sources;

pub use pipeline::{PipelineError, PipelineResult};
pub use quotes::{DiscountCode, Quote, QuoteParseError};
pub use sources::{DiscountResolver, QuoteSource, SourceError, SourceResult};
