use serde::{Deserialize, Serialize};

use disco_domain::{
	kind::{ItemType, RelationKind, TagSearchKind},
	query,
	ranking,
};
use disco_storage::{aggregates, tags};

use crate::{
	DiscoService, Result, SearchContext,
	search::{
		TrackItem, UserItem,
		hydrate::{self, Mode},
		overlay,
	},
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagSearchRequest {
	pub query: Option<String>,
	/// One of `all`, `tracks`, `users`. Defaults to `all`.
	pub kind: Option<String>,
	/// Minimum number of tagged tracks a user needs to be listed.
	pub user_tag_count: Option<u32>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TagSearchResponse {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub tracks: Option<Vec<TrackItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub saved_tracks: Option<Vec<TrackItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub users: Option<Vec<UserItem>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub followed_users: Option<Vec<UserItem>>,
}

impl DiscoService {
	/// Finds tracks carrying a tag, and users who use it often.
	///
	/// Tracks are ranked by play count and users by how many of their tracks carry the tag. Both
	/// lists are paged in memory after ranking.
	pub async fn search_tags(
		&self,
		req: TagSearchRequest,
		ctx: SearchContext,
	) -> Result<TagSearchResponse> {
		let tag = query::normalize_tag_query(req.query.as_deref())?;
		let kind = match req.kind.as_deref() {
			Some(raw) => raw.parse::<TagSearchKind>()?,
			None => TagSearchKind::default(),
		};
		let user_tag_count = req.user_tag_count.unwrap_or(self.cfg.search.default_user_tag_count);
		let window = self.window(req.limit, req.offset);
		let mut response = TagSearchResponse::default();

		if kind.includes_tracks() {
			let ranked = self.tracks_by_plays(&tag).await?;
			let saved =
				overlay::personalize(&self.db, ctx, RelationKind::Save(ItemType::Track), &ranked)
					.await?;

			response.tracks =
				Some(hydrate::tracks(&self.db, window.apply(&ranked), ctx, Mode::Full).await?);

			if let Some(saved) = saved {
				response.saved_tracks =
					Some(hydrate::tracks(&self.db, window.apply(&saved), ctx, Mode::Full).await?);
			}
		}
		if kind.includes_users() {
			let owners = tags::owners_with_tag(&self.db, &tag, user_tag_count).await?;
			let ranked = owners.iter().map(|owner| owner.owner_id).collect::<Vec<_>>();
			let followed =
				overlay::personalize(&self.db, ctx, RelationKind::Follow, &ranked).await?;

			response.users =
				Some(hydrate::users(&self.db, window.apply(&ranked), ctx, Mode::Full).await?);

			if let Some(followed) = followed {
				response.followed_users =
					Some(hydrate::users(&self.db, window.apply(&followed), ctx, Mode::Full).await?);
			}
		}

		tracing::info!(
			kind = ?kind,
			user_tag_count,
			limit = window.limit,
			offset = window.offset,
			"Tag search completed."
		);

		Ok(response)
	}

	async fn tracks_by_plays(&self, tag: &str) -> Result<Vec<i64>> {
		let mut ids = tags::tracks_with_tag(&self.db, tag).await?;
		let plays = aggregates::play_counts(&self.db, &ids).await?;

		ranking::rank_by_count(&mut ids, |id| plays.get(id).copied().unwrap_or(0));

		Ok(ids)
	}
}
