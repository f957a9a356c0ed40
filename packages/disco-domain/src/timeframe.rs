use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A trending aggregation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
	Day,
	Week,
	Month,
	Year,
}
impl Timeframe {
	pub const ALL: [Timeframe; 4] = [Self::Day, Self::Week, Self::Month, Self::Year];

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Day => "day",
			Self::Week => "week",
			Self::Month => "month",
			Self::Year => "year",
		}
	}

	pub fn cache_key(self) -> String {
		format!("trending-{}", self.as_str())
	}
}
impl fmt::Display for Timeframe {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
impl FromStr for Timeframe {
	type Err = Error;

	fn from_str(raw: &str) -> Result<Self> {
		Self::ALL.into_iter().find(|timeframe| timeframe.as_str() == raw).ok_or_else(|| {
			Error::InvalidChoice { parameter: "timeframe", allowed: vec!["day", "week", "month", "year"] }
		})
	}
}
