use disco_domain::query;

use crate::{Result, db::Db, models::TagOwner};

const TAG_MATCH: &str = "\
t.is_current = TRUE
	AND t.is_delete = FALSE
	AND t.is_unlisted = FALSE
	AND t.tags ILIKE $1 ESCAPE '\\'
	AND strip(to_tsvector(t.tags)) @@ plainto_tsquery($2)";

/// Ids of public tracks tagged with `tag`, most recently updated first.
pub async fn tracks_with_tag(db: &Db, tag: &str) -> Result<Vec<i64>> {
	let sql = format!(
		"\
SELECT t.track_id
FROM tracks t
WHERE {TAG_MATCH}
ORDER BY t.updated_at DESC, t.track_id DESC"
	);
	let ids = sqlx::query_scalar(&sql)
		.bind(query::contains_pattern(tag))
		.bind(tag)
		.fetch_all(db.reader())
		.await?;

	Ok(ids)
}

/// Owners of at least `min_count` public tracks tagged with `tag`, by tagged-track count.
pub async fn owners_with_tag(db: &Db, tag: &str, min_count: u32) -> Result<Vec<TagOwner>> {
	let sql = format!(
		"\
SELECT t.owner_id, COUNT(DISTINCT t.track_id) AS tag_count
FROM tracks t
JOIN users u ON u.user_id = t.owner_id AND u.is_current = TRUE AND u.is_ready = TRUE
WHERE {TAG_MATCH}
GROUP BY t.owner_id
HAVING COUNT(DISTINCT t.track_id) >= $3
ORDER BY tag_count DESC, t.owner_id"
	);
	let owners = sqlx::query_as(&sql)
		.bind(query::contains_pattern(tag))
		.bind(tag)
		.bind(i64::from(min_count))
		.fetch_all(db.reader())
		.await?;

	Ok(owners)
}
