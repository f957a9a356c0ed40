use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Track {
	pub track_id: i64,
	pub owner_id: i64,
	pub title: Option<String>,
	pub tags: Option<String>,
	pub genre: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
	pub user_id: i64,
	pub handle: Option<String>,
	pub name: Option<String>,
	pub bio: Option<String>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

/// Playlists and albums share one table, split by `is_album`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Playlist {
	pub playlist_id: i64,
	pub playlist_owner_id: i64,
	pub playlist_name: Option<String>,
	pub is_album: bool,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

/// The public projection of a user attached to autocomplete results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct UserSummary {
	pub user_id: i64,
	pub handle: Option<String>,
	pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct TagOwner {
	pub owner_id: i64,
	pub tag_count: i64,
}
