//! Chain-level result and error types
//!
//! A chain is the ordered fetch → parse → discount sequence for one
//! quote source. Its outcome is always a value: either the final price
//! line or a [`PipelineError`] attributed to the failing stage. The two
//! terminal states are mutually exclusive and never revisited.

pub mod errors;

pub use errors::PipelineError;

/// Result type for chain outcomes and aggregation operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
