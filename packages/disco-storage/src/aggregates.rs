//! Per-id counts shown next to full search results. Ids with no rows are absent from the maps.

use std::collections::HashMap;

use disco_domain::kind::ItemType;

use crate::{Result, db::Db};

pub type Counts = HashMap<i64, i64>;

pub async fn play_counts(db: &Db, track_ids: &[i64]) -> Result<Counts> {
	fetch_counts(
		db,
		"\
SELECT play_item_id, COUNT(*)
FROM plays
WHERE play_item_id = ANY($1)
GROUP BY play_item_id",
		track_ids,
		None,
	)
	.await
}

pub async fn repost_counts(db: &Db, item: ItemType, ids: &[i64]) -> Result<Counts> {
	fetch_counts(
		db,
		"\
SELECT repost_item_id, COUNT(*)
FROM reposts
WHERE repost_item_id = ANY($1)
	AND repost_type = $2
	AND is_current = TRUE
	AND is_delete = FALSE
GROUP BY repost_item_id",
		ids,
		Some(item.as_str()),
	)
	.await
}

pub async fn save_counts(db: &Db, item: ItemType, ids: &[i64]) -> Result<Counts> {
	fetch_counts(
		db,
		"\
SELECT save_item_id, COUNT(*)
FROM saves
WHERE save_item_id = ANY($1)
	AND save_type = $2
	AND is_current = TRUE
	AND is_delete = FALSE
GROUP BY save_item_id",
		ids,
		Some(item.as_str()),
	)
	.await
}

pub async fn follower_counts(db: &Db, user_ids: &[i64]) -> Result<Counts> {
	fetch_counts(
		db,
		"\
SELECT followee_user_id, COUNT(*)
FROM follows
WHERE followee_user_id = ANY($1)
	AND is_current = TRUE
	AND is_delete = FALSE
GROUP BY followee_user_id",
		user_ids,
		None,
	)
	.await
}

pub async fn followee_counts(db: &Db, user_ids: &[i64]) -> Result<Counts> {
	fetch_counts(
		db,
		"\
SELECT follower_user_id, COUNT(*)
FROM follows
WHERE follower_user_id = ANY($1)
	AND is_current = TRUE
	AND is_delete = FALSE
GROUP BY follower_user_id",
		user_ids,
		None,
	)
	.await
}

/// Public tracks per owner.
pub async fn track_counts(db: &Db, user_ids: &[i64]) -> Result<Counts> {
	fetch_counts(
		db,
		"\
SELECT owner_id, COUNT(*)
FROM tracks
WHERE owner_id = ANY($1)
	AND is_current = TRUE
	AND is_delete = FALSE
	AND is_unlisted = FALSE
GROUP BY owner_id",
		user_ids,
		None,
	)
	.await
}

/// Public playlists (or albums, when `albums` is set) per owner.
pub async fn playlist_counts(db: &Db, user_ids: &[i64], albums: bool) -> Result<Counts> {
	if user_ids.is_empty() {
		return Ok(Counts::new());
	}

	let rows: Vec<(i64, i64)> = sqlx::query_as(
		"\
SELECT playlist_owner_id, COUNT(*)
FROM playlists
WHERE playlist_owner_id = ANY($1)
	AND is_album = $2
	AND is_current = TRUE
	AND is_delete = FALSE
	AND is_private = FALSE
GROUP BY playlist_owner_id",
	)
	.bind(user_ids)
	.bind(albums)
	.fetch_all(db.reader())
	.await?;

	Ok(rows.into_iter().collect())
}

async fn fetch_counts(
	db: &Db,
	sql: &str,
	ids: &[i64],
	item_type: Option<&str>,
) -> Result<Counts> {
	if ids.is_empty() {
		return Ok(Counts::new());
	}

	let mut query = sqlx::query_as::<_, (i64, i64)>(sql).bind(ids);

	if let Some(item_type) = item_type {
		query = query.bind(item_type);
	}

	let rows = query.fetch_all(db.reader()).await?;

	Ok(rows.into_iter().collect())
}
