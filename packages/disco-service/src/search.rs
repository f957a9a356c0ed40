pub(crate) mod hydrate;
pub(crate) mod overlay;

mod scorer;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use disco_domain::{
	kind::{EntityKind, SearchKind},
	query,
	ranking::{self, Window},
};
use disco_storage::models::UserSummary;

use crate::{DiscoService, Result, SearchContext, search::hydrate::Mode};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchRequest {
	pub query: Option<String>,
	/// One of `all`, `tracks`, `users`, `playlists`, `albums`. Defaults to `all`.
	pub kind: Option<String>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

/// Result groups keyed by name. Groups that were not requested, and personalized groups without
/// a current user, are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResponse {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tracks: Option<Vec<TrackItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub saved_tracks: Option<Vec<TrackItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub users: Option<Vec<UserItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub followed_users: Option<Vec<UserItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub playlists: Option<Vec<PlaylistItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub saved_playlists: Option<Vec<PlaylistItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub albums: Option<Vec<PlaylistItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub saved_albums: Option<Vec<PlaylistItem>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackItem {
	pub track_id: i64,
	pub owner_id: i64,
	pub title: Option<String>,
	pub tags: Option<String>,
	pub genre: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
	#[serde(flatten)]
	pub stats: Option<TrackStats>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackStats {
	pub play_count: i64,
	pub repost_count: i64,
	pub save_count: i64,
	pub has_current_user_reposted: bool,
	pub has_current_user_saved: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserItem {
	pub user_id: i64,
	pub handle: Option<String>,
	pub name: Option<String>,
	pub bio: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
	#[serde(flatten)]
	pub stats: Option<UserStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
	pub follower_count: i64,
	pub followee_count: i64,
	pub track_count: i64,
	pub playlist_count: i64,
	pub album_count: i64,
	pub does_current_user_follow: bool,
}

/// A playlist or an album.
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistItem {
	pub playlist_id: i64,
	pub playlist_owner_id: i64,
	pub playlist_name: Option<String>,
	pub is_album: bool,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: OffsetDateTime,
	#[serde(flatten)]
	pub stats: Option<PlaylistStats>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub user: Option<UserSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaylistStats {
	pub repost_count: i64,
	pub save_count: i64,
	pub has_current_user_reposted: bool,
	pub has_current_user_saved: bool,
}

impl DiscoService {
	/// Ranked search with peripheral counts on every item.
	pub async fn search_full(
		&self,
		req: SearchRequest,
		ctx: SearchContext,
	) -> Result<SearchResponse> {
		self.search(req, ctx, Mode::Full).await
	}

	/// Ranked search for type-ahead. Items carry their owner instead of counts.
	pub async fn search_autocomplete(
		&self,
		req: SearchRequest,
		ctx: SearchContext,
	) -> Result<SearchResponse> {
		self.search(req, ctx, Mode::Autocomplete).await
	}

	async fn search(
		&self,
		req: SearchRequest,
		ctx: SearchContext,
		mode: Mode,
	) -> Result<SearchResponse> {
		let query = query::normalize_search_query(req.query.as_deref())?;
		let kind = match req.kind.as_deref() {
			Some(raw) => raw.parse::<SearchKind>()?,
			None => SearchKind::default(),
		};
		let window = self.window(req.limit, req.offset);
		let mut response = SearchResponse::default();

		for &entity in kind.entity_kinds() {
			let base = self.search_group(entity, &query, window, ctx, mode, false).await?;
			let personalized = match ctx.current_user_id {
				Some(_) => Some(self.search_group(entity, &query, window, ctx, mode, true).await?),
				None => None,
			};

			response.fill(entity, base, personalized);
		}

		tracing::info!(
			kind = ?kind,
			limit = window.limit,
			offset = window.offset,
			personalized = ctx.current_user_id.is_some(),
			"Search completed."
		);

		Ok(response)
	}

	async fn search_group(
		&self,
		entity: EntityKind,
		query: &str,
		window: Window,
		ctx: SearchContext,
		mode: Mode,
		personalized: bool,
	) -> Result<Group> {
		let candidates = scorer::score(self, entity, query, window, ctx, personalized).await?;
		let ids = ranking::candidate_ids(&candidates);

		hydrate::group(&self.db, entity, &ids, ctx, mode).await
	}
}

/// Hydrated items of one entity kind, in rank order.
pub(crate) enum Group {
	Tracks(Vec<TrackItem>),
	Users(Vec<UserItem>),
	Playlists(Vec<PlaylistItem>),
}

impl SearchResponse {
	fn fill(&mut self, entity: EntityKind, base: Group, personalized: Option<Group>) {
		match (entity, base) {
			(EntityKind::Track, Group::Tracks(items)) => {
				self.tracks = Some(items);
				self.saved_tracks = personalized.and_then(Group::into_tracks);
			},
			(EntityKind::User, Group::Users(items)) => {
				self.users = Some(items);
				self.followed_users = personalized.and_then(Group::into_users);
			},
			(EntityKind::Playlist, Group::Playlists(items)) => {
				self.playlists = Some(items);
				self.saved_playlists = personalized.and_then(Group::into_playlists);
			},
			(EntityKind::Album, Group::Playlists(items)) => {
				self.albums = Some(items);
				self.saved_albums = personalized.and_then(Group::into_playlists);
			},
			_ => {},
		}
	}
}

impl Group {
	fn into_tracks(self) -> Option<Vec<TrackItem>> {
		match self {
			Self::Tracks(items) => Some(items),
			_ => None,
		}
	}

	fn into_users(self) -> Option<Vec<UserItem>> {
		match self {
			Self::Users(items) => Some(items),
			_ => None,
		}
	}

	fn into_playlists(self) -> Option<Vec<PlaylistItem>> {
		match self {
			Self::Playlists(items) => Some(items),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn absent_groups_are_not_serialized() {
		let response = SearchResponse { users: Some(Vec::new()), ..Default::default() };
		let json = serde_json::to_value(&response).expect("Failed to serialize response.");

		assert_eq!(json, serde_json::json!({ "users": [] }));
	}

	#[test]
	fn counts_flatten_into_items() {
		let item = TrackItem {
			track_id: 5,
			owner_id: 1,
			title: Some("Money".to_string()),
			tags: None,
			genre: None,
			created_at: OffsetDateTime::UNIX_EPOCH,
			updated_at: OffsetDateTime::UNIX_EPOCH,
			stats: Some(TrackStats { play_count: 3, ..Default::default() }),
			user: None,
		};
		let json = serde_json::to_value(&item).expect("Failed to serialize item.");

		assert_eq!(json["play_count"], 3);
		assert_eq!(json["has_current_user_saved"], false);
		assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
		assert!(json.get("user").is_none());
	}
}
