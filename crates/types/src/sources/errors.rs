//! Error types for quote-source and discount-resolver collaborators

use thiserror::Error;

/// Failures reported by a remote-like collaborator (quote source or
/// discount resolver). Non-retryable inside the pipeline; retry policy,
/// if any, belongs to the collaborator itself.
#[derive(Error, Debug)]
pub enum SourceError {
	#[error("source '{name}' is unavailable: {reason}")]
	Unavailable { name: String, reason: String },

	#[error("HTTP request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("invalid response from '{name}': {reason}")]
	InvalidResponse { name: String, reason: String },

	#[error("source '{name}' is already registered")]
	DuplicateName { name: String },
}

impl SourceError {
	/// Shorthand for the common unavailable-service case.
	pub fn unavailable(name: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::Unavailable {
			name: name.into(),
			reason: reason.into(),
		}
	}
}
