use std::collections::HashSet;

use disco_domain::kind::{ItemType, RelationKind};

use crate::{Result, db::Db};

/// The members of `candidates` that `user_id` holds an active `relation` to.
pub async fn active_relation_ids(
	db: &Db,
	user_id: i64,
	relation: RelationKind,
	candidates: &[i64],
) -> Result<HashSet<i64>> {
	if candidates.is_empty() {
		return Ok(HashSet::new());
	}

	let ids: Vec<i64> = match relation {
		RelationKind::Save(item) => sqlx::query_scalar(
			"\
SELECT save_item_id
FROM saves
WHERE user_id = $1
	AND save_type = $2
	AND is_current = TRUE
	AND is_delete = FALSE
	AND save_item_id = ANY($3)",
		)
		.bind(user_id)
		.bind(item.as_str())
		.bind(candidates)
		.fetch_all(db.reader())
		.await?,
		RelationKind::Follow => sqlx::query_scalar(
			"\
SELECT followee_user_id
FROM follows
WHERE follower_user_id = $1
	AND is_current = TRUE
	AND is_delete = FALSE
	AND followee_user_id = ANY($2)",
		)
		.bind(user_id)
		.bind(candidates)
		.fetch_all(db.reader())
		.await?,
	};

	Ok(ids.into_iter().collect())
}

pub async fn reposted_ids(
	db: &Db,
	user_id: i64,
	item: ItemType,
	candidates: &[i64],
) -> Result<HashSet<i64>> {
	if candidates.is_empty() {
		return Ok(HashSet::new());
	}

	let ids: Vec<i64> = sqlx::query_scalar(
		"\
SELECT repost_item_id
FROM reposts
WHERE user_id = $1
	AND repost_type = $2
	AND is_current = TRUE
	AND is_delete = FALSE
	AND repost_item_id = ANY($3)",
	)
	.bind(user_id)
	.bind(item.as_str())
	.bind(candidates)
	.fetch_all(db.reader())
	.await?;

	Ok(ids.into_iter().collect())
}
