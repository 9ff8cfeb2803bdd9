//! Error taxonomy for pipeline chains and aggregation

use thiserror::Error;

use crate::quotes::QuoteParseError;
use crate::sources::SourceError;

/// Terminal failure of a single chain, a bounded wait, or an aggregation.
///
/// Chain failures carry the stage they occurred in and the name of the
/// source whose chain failed; they are captured as values inside task
/// handles and only surfaced at an explicit observation point.
#[derive(Error, Debug)]
pub enum PipelineError {
	#[error("fetch from '{source}' failed: {error}")]
	Fetch {
		source: String,
		#[source]
		error: SourceError,
	},

	#[error("quote from '{source}' is malformed: {error}")]
	Parse {
		source: String,
		#[source]
		error: QuoteParseError,
	},

	#[error("discount resolution for '{source}' failed: {error}")]
	Discount {
		source: String,
		#[source]
		error: SourceError,
	},

	/// A bounded wait expired. The in-flight chains keep running to
	/// completion in the background; their results are never observed.
	#[error("wait expired after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	/// Join-all surfacing every failed chain together, one attributed
	/// error per failed source, ordered by source registration.
	#[error("{} of {total} chains failed", .errors.len())]
	Aggregate {
		total: usize,
		errors: Vec<PipelineError>,
	},

	#[error("no quote sources registered")]
	NoSources,

	/// A runtime task was lost before producing a value. Stage failures
	/// are captured as values, so this only covers panics inside
	/// collaborator code.
	#[error("background task failed: {reason}")]
	Internal { reason: String },
}

impl PipelineError {
	/// Name of the source whose chain produced this error, when the
	/// error is attributable to a single chain.
	pub fn source_name(&self) -> Option<&str> {
		match self {
			PipelineError::Fetch { source, .. }
			| PipelineError::Parse { source, .. }
			| PipelineError::Discount { source, .. } => Some(source),
			_ => None,
		}
	}

	pub fn is_timeout(&self) -> bool {
		matches!(self, PipelineError::Timeout { .. })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_source_attribution() {
		let err = PipelineError::Parse {
			source: "BestPrice".to_string(),
			error: QuoteParseError::FieldCount { count: 2 },
		};
		assert_eq!(err.source_name(), Some("BestPrice"));

		let timeout = PipelineError::Timeout { timeout_ms: 500 };
		assert_eq!(timeout.source_name(), None);
		assert!(timeout.is_timeout());
	}

	#[test]
	fn test_aggregate_display_counts_failures() {
		let err = PipelineError::Aggregate {
			total: 4,
			errors: vec![PipelineError::Fetch {
				source: "BuyItAll".to_string(),
				error: SourceError::unavailable("BuyItAll", "connection refused"),
			}],
		};
		assert_eq!(err.to_string(), "1 of 4 chains failed");
	}
}
