//! Error types for quote parsing

use thiserror::Error;

/// Failures turning a raw wire string into a [`Quote`](super::Quote).
///
/// A malformed quote is terminal for its chain and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteParseError {
	#[error("expected 3 ':'-separated fields, got {count}")]
	FieldCount { count: usize },

	#[error("price field is not a decimal number: '{value}'")]
	InvalidPrice { value: String },

	#[error("unknown discount code: '{code}'")]
	UnknownDiscountCode { code: String },
}
