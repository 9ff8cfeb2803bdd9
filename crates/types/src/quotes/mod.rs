//! Core Quote domain model and wire format

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod errors;

pub use errors::QuoteParseError;

/// Discount tier attached to a quote by its source.
///
/// Each tier maps to a fixed percentage taken off the raw price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountCode {
	None,
	Silver,
	Gold,
	Platinum,
	Diamond,
}

impl DiscountCode {
	/// All tiers, in ascending discount order.
	pub const ALL: [DiscountCode; 5] = [
		DiscountCode::None,
		DiscountCode::Silver,
		DiscountCode::Gold,
		DiscountCode::Platinum,
		DiscountCode::Diamond,
	];

	/// Percentage taken off the raw price for this tier.
	pub fn percentage(&self) -> u8 {
		match self {
			DiscountCode::None => 0,
			DiscountCode::Silver => 5,
			DiscountCode::Gold => 10,
			DiscountCode::Platinum => 15,
			DiscountCode::Diamond => 20,
		}
	}

	/// Apply this tier to a raw price.
	pub fn apply(&self, price: f64) -> f64 {
		price * f64::from(100 - self.percentage()) / 100.0
	}

	/// Wire-format name, as it appears in the raw quote string.
	pub fn as_str(&self) -> &'static str {
		match self {
			DiscountCode::None => "NONE",
			DiscountCode::Silver => "SILVER",
			DiscountCode::Gold => "GOLD",
			DiscountCode::Platinum => "PLATINUM",
			DiscountCode::Diamond => "DIAMOND",
		}
	}
}

impl fmt::Display for DiscountCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for DiscountCode {
	type Err = QuoteParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"NONE" => Ok(DiscountCode::None),
			"SILVER" => Ok(DiscountCode::Silver),
			"GOLD" => Ok(DiscountCode::Gold),
			"PLATINUM" => Ok(DiscountCode::Platinum),
			"DIAMOND" => Ok(DiscountCode::Diamond),
			other => Err(QuoteParseError::UnknownDiscountCode {
				code: other.to_string(),
			}),
		}
	}
}

/// A structured price quote from one source.
///
/// Immutable once constructed; produced by [`Quote::parse`] and consumed
/// by the discount resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
	/// Name of the source that produced the quote.
	pub source: String,

	/// Raw (undiscounted) price.
	pub price: f64,

	/// Discount tier advertised with the quote.
	pub discount_code: DiscountCode,
}

impl Quote {
	pub fn new(source: impl Into<String>, price: f64, discount_code: DiscountCode) -> Self {
		Self {
			source: source.into(),
			price,
			discount_code,
		}
	}

	/// Parse the raw wire format `"<name>:<price>:<DISCOUNT_CODE>"`.
	///
	/// Pure and synchronous; fails without producing a partial quote when
	/// the field count, price, or discount code is invalid.
	pub fn parse(raw: &str) -> Result<Self, QuoteParseError> {
		let fields: Vec<&str> = raw.split(':').collect();
		if fields.len() != 3 {
			return Err(QuoteParseError::FieldCount {
				count: fields.len(),
			});
		}

		let price: f64 = fields[1]
			.parse()
			.map_err(|_| QuoteParseError::InvalidPrice {
				value: fields[1].to_string(),
			})?;
		let discount_code: DiscountCode = fields[2].parse()?;

		Ok(Self {
			source: fields[0].to_string(),
			price,
			discount_code,
		})
	}

	/// Render the quote back into its wire format.
	pub fn to_wire(&self) -> String {
		format!("{}:{}:{}", self.source, self.price, self.discount_code)
	}

	/// The price after applying this quote's discount tier.
	pub fn discounted_price(&self) -> f64 {
		self.discount_code.apply(self.price)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_well_formed_quote() {
		let quote = Quote::parse("BestPrice:123.26:GOLD").unwrap();

		assert_eq!(quote.source, "BestPrice");
		assert_eq!(quote.price, 123.26);
		assert_eq!(quote.discount_code, DiscountCode::Gold);
	}

	#[test]
	fn test_wire_round_trip() {
		for code in DiscountCode::ALL {
			let quote = Quote::new("LetsSaveBig", 171.32, code);
			assert_eq!(Quote::parse(&quote.to_wire()).unwrap(), quote);
		}
	}

	#[test]
	fn test_parse_rejects_wrong_field_count() {
		assert_eq!(
			Quote::parse("BestPrice:123.26"),
			Err(QuoteParseError::FieldCount { count: 2 })
		);
		assert_eq!(
			Quote::parse("BestPrice:123.26:GOLD:extra"),
			Err(QuoteParseError::FieldCount { count: 4 })
		);
	}

	#[test]
	fn test_parse_rejects_non_numeric_price() {
		assert_eq!(
			Quote::parse("BestPrice:abc:GOLD"),
			Err(QuoteParseError::InvalidPrice {
				value: "abc".to_string()
			})
		);
	}

	#[test]
	fn test_parse_rejects_unknown_discount_code() {
		assert_eq!(
			Quote::parse("BestPrice:123.26:BRONZE"),
			Err(QuoteParseError::UnknownDiscountCode {
				code: "BRONZE".to_string()
			})
		);
	}

	#[test]
	fn test_discount_math() {
		assert_eq!(DiscountCode::Platinum.apply(100.0), 85.0);
		assert_eq!(DiscountCode::None.apply(100.0), 100.0);
		assert_eq!(DiscountCode::Silver.apply(100.0), 95.0);
		assert_eq!(DiscountCode::Gold.apply(100.0), 90.0);
		assert_eq!(DiscountCode::Diamond.apply(100.0), 80.0);
	}

	#[test]
	fn test_discounted_price_uses_quote_tier() {
		let quote = Quote::new("MyFavoriteShop", 200.0, DiscountCode::Diamond);
		assert_eq!(quote.discounted_price(), 160.0);
	}
}
