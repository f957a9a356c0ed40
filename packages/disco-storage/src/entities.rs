//! Row loaders for hydration. Rows come back in arbitrary order and hidden or unknown ids are
//! simply missing.

use sqlx::{Postgres, QueryBuilder};

use disco_domain::kind::EntityKind;

use crate::{
	Result,
	db::Db,
	filters,
	models::{Playlist, Track, User, UserSummary},
};

pub async fn fetch_tracks(db: &Db, ids: &[i64], viewer_id: Option<i64>) -> Result<Vec<Track>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let mut builder = select_visible(
		"SELECT e.track_id, e.owner_id, e.title, e.tags, e.genre, e.created_at, e.updated_at FROM tracks e WHERE e.track_id = ANY(",
		ids,
		EntityKind::Track,
		viewer_id,
	);

	Ok(builder.build_query_as::<Track>().fetch_all(db.reader()).await?)
}

pub async fn fetch_users(db: &Db, ids: &[i64]) -> Result<Vec<User>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let mut builder = select_visible(
		"SELECT e.user_id, e.handle, e.name, e.bio, e.created_at, e.updated_at FROM users e WHERE e.user_id = ANY(",
		ids,
		EntityKind::User,
		None,
	);

	Ok(builder.build_query_as::<User>().fetch_all(db.reader()).await?)
}

/// Loads playlists or albums, depending on `kind`.
pub async fn fetch_playlists(
	db: &Db,
	kind: EntityKind,
	ids: &[i64],
	viewer_id: Option<i64>,
) -> Result<Vec<Playlist>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let mut builder = select_visible(
		"SELECT e.playlist_id, e.playlist_owner_id, e.playlist_name, e.is_album, e.created_at, e.updated_at FROM playlists e WHERE e.playlist_id = ANY(",
		ids,
		kind,
		viewer_id,
	);

	Ok(builder.build_query_as::<Playlist>().fetch_all(db.reader()).await?)
}

pub async fn fetch_user_summaries(db: &Db, ids: &[i64]) -> Result<Vec<UserSummary>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	// Owners only need to be current. Unready owners still label their items.
	let summaries = sqlx::query_as::<_, UserSummary>(
		"\
SELECT user_id, handle, name
FROM users
WHERE user_id = ANY($1)
	AND is_current = TRUE",
	)
	.bind(ids)
	.fetch_all(db.reader())
	.await?;

	Ok(summaries)
}

fn select_visible<'a>(
	head: &str,
	ids: &[i64],
	kind: EntityKind,
	viewer_id: Option<i64>,
) -> QueryBuilder<'a, Postgres> {
	let mut builder = QueryBuilder::new(head);

	builder.push_bind(ids.to_vec());
	builder.push(") AND ");
	filters::push_visibility(&mut builder, kind, "e", viewer_id);

	builder
}
