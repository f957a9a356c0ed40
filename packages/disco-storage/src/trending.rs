use serde::{Deserialize, Serialize};

use disco_domain::timeframe::Timeframe;

use crate::{Error, Result, db::Db};

/// One row of a trending ranking, as stored in the cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrendingEntry {
	pub track_id: i64,
	pub score: f64,
}

/// Runs the `compute_trending` database function for one window.
pub async fn compute_trending(
	db: &Db,
	timeframe: Timeframe,
	limit: u32,
) -> Result<Vec<TrendingEntry>> {
	let limit = i32::try_from(limit)
		.map_err(|_| Error::InvalidArgument(format!("Trending limit {limit} is too large.")))?;
	let entries = sqlx::query_as::<_, TrendingEntry>(
		"SELECT track_id, score FROM compute_trending($1, $2)",
	)
	.bind(timeframe.as_str())
	.bind(limit)
	.fetch_all(&db.pool)
	.await?;

	tracing::debug!(%timeframe, entries = entries.len(), "Trending computed.");

	Ok(entries)
}

/// The cache payload for a trending ranking.
pub fn encode(entries: &[TrendingEntry]) -> Result<String> {
	Ok(serde_json::to_string(entries)?)
}

pub fn decode(raw: &str) -> Result<Vec<TrendingEntry>> {
	Ok(serde_json::from_str(raw)?)
}
