//! Turns rank-ordered ids into response items.
//!
//! Items always come back in the order of the ids passed in. Ids that no longer resolve to a
//! visible row are dropped, as are autocomplete items whose owner is gone.

use std::collections::{HashMap, HashSet};

use disco_domain::{
	kind::{EntityKind, ItemType, RelationKind},
	ranking,
};
use disco_storage::{aggregates, db::Db, entities, models::UserSummary, relations};

use crate::{
	Result, SearchContext,
	search::{Group, PlaylistItem, PlaylistStats, TrackItem, TrackStats, UserItem, UserStats},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
	Full,
	Autocomplete,
}

pub(crate) async fn group(
	db: &Db,
	kind: EntityKind,
	ids: &[i64],
	ctx: SearchContext,
	mode: Mode,
) -> Result<Group> {
	Ok(match kind {
		EntityKind::Track => Group::Tracks(tracks(db, ids, ctx, mode).await?),
		EntityKind::User => Group::Users(users(db, ids, ctx, mode).await?),
		EntityKind::Playlist | EntityKind::Album =>
			Group::Playlists(playlists(db, kind, ids, ctx, mode).await?),
	})
}

pub(crate) async fn tracks(
	db: &Db,
	ids: &[i64],
	ctx: SearchContext,
	mode: Mode,
) -> Result<Vec<TrackItem>> {
	let rows = entities::fetch_tracks(db, ids, ctx.current_user_id).await?;
	let rows = ranking::restore_order(ids, rows, |row| row.track_id);
	let mut items = rows
		.into_iter()
		.map(|row| TrackItem {
			track_id: row.track_id,
			owner_id: row.owner_id,
			title: row.title,
			tags: row.tags,
			genre: row.genre,
			created_at: row.created_at,
			updated_at: row.updated_at,
			stats: None,
			user: None,
		})
		.collect::<Vec<_>>();
	let found = items.iter().map(|item| item.track_id).collect::<Vec<_>>();

	match mode {
		Mode::Full => {
			let plays = aggregates::play_counts(db, &found).await?;
			let counts = ItemCounts::load(db, ItemType::Track, &found, ctx).await?;

			for item in &mut items {
				item.stats = Some(TrackStats {
					play_count: count(&plays, item.track_id),
					repost_count: count(&counts.reposts, item.track_id),
					save_count: count(&counts.saves, item.track_id),
					has_current_user_reposted: counts.reposted.contains(&item.track_id),
					has_current_user_saved: counts.saved.contains(&item.track_id),
				});
			}

			Ok(items)
		},
		Mode::Autocomplete => {
			let owners = items.iter().map(|item| item.owner_id).collect::<Vec<_>>();
			let summaries = owner_summaries(db, &owners).await?;

			Ok(items
				.into_iter()
				.filter_map(|mut item| {
					item.user = Some(summaries.get(&item.owner_id)?.clone());

					Some(item)
				})
				.collect())
		},
	}
}

pub(crate) async fn users(
	db: &Db,
	ids: &[i64],
	ctx: SearchContext,
	mode: Mode,
) -> Result<Vec<UserItem>> {
	let rows = entities::fetch_users(db, ids).await?;
	let rows = ranking::restore_order(ids, rows, |row| row.user_id);
	let mut items = rows
		.into_iter()
		.map(|row| UserItem {
			user_id: row.user_id,
			handle: row.handle,
			name: row.name,
			bio: row.bio,
			created_at: row.created_at,
			updated_at: row.updated_at,
			stats: None,
		})
		.collect::<Vec<_>>();

	if mode == Mode::Autocomplete {
		return Ok(items);
	}

	let found = items.iter().map(|item| item.user_id).collect::<Vec<_>>();
	let followers = aggregates::follower_counts(db, &found).await?;
	let followees = aggregates::followee_counts(db, &found).await?;
	let tracks = aggregates::track_counts(db, &found).await?;
	let playlists = aggregates::playlist_counts(db, &found, false).await?;
	let albums = aggregates::playlist_counts(db, &found, true).await?;
	let followed = match ctx.current_user_id {
		Some(user_id) =>
			relations::active_relation_ids(db, user_id, RelationKind::Follow, &found).await?,
		None => Default::default(),
	};

	for item in &mut items {
		item.stats = Some(UserStats {
			follower_count: count(&followers, item.user_id),
			followee_count: count(&followees, item.user_id),
			track_count: count(&tracks, item.user_id),
			playlist_count: count(&playlists, item.user_id),
			album_count: count(&albums, item.user_id),
			does_current_user_follow: followed.contains(&item.user_id),
		});
	}

	Ok(items)
}

async fn playlists(
	db: &Db,
	kind: EntityKind,
	ids: &[i64],
	ctx: SearchContext,
	mode: Mode,
) -> Result<Vec<PlaylistItem>> {
	let rows = entities::fetch_playlists(db, kind, ids, ctx.current_user_id).await?;
	let rows = ranking::restore_order(ids, rows, |row| row.playlist_id);
	let mut items = rows
		.into_iter()
		.map(|row| PlaylistItem {
			playlist_id: row.playlist_id,
			playlist_owner_id: row.playlist_owner_id,
			playlist_name: row.playlist_name,
			is_album: row.is_album,
			created_at: row.created_at,
			updated_at: row.updated_at,
			stats: None,
			user: None,
		})
		.collect::<Vec<_>>();

	match mode {
		Mode::Full => {
			let item_type =
				if kind == EntityKind::Album { ItemType::Album } else { ItemType::Playlist };
			let found = items.iter().map(|item| item.playlist_id).collect::<Vec<_>>();
			let counts = ItemCounts::load(db, item_type, &found, ctx).await?;

			for item in &mut items {
				item.stats = Some(PlaylistStats {
					repost_count: count(&counts.reposts, item.playlist_id),
					save_count: count(&counts.saves, item.playlist_id),
					has_current_user_reposted: counts.reposted.contains(&item.playlist_id),
					has_current_user_saved: counts.saved.contains(&item.playlist_id),
				});
			}

			Ok(items)
		},
		Mode::Autocomplete => {
			let owners = items.iter().map(|item| item.playlist_owner_id).collect::<Vec<_>>();
			let summaries = owner_summaries(db, &owners).await?;

			Ok(items
				.into_iter()
				.filter_map(|mut item| {
					item.user = Some(summaries.get(&item.playlist_owner_id)?.clone());

					Some(item)
				})
				.collect())
		},
	}
}

/// Repost and save counts for saveable items, with the current user's own flags.
struct ItemCounts {
	reposts: aggregates::Counts,
	saves: aggregates::Counts,
	reposted: HashSet<i64>,
	saved: HashSet<i64>,
}
impl ItemCounts {
	async fn load(db: &Db, item: ItemType, ids: &[i64], ctx: SearchContext) -> Result<Self> {
		let reposts = aggregates::repost_counts(db, item, ids).await?;
		let saves = aggregates::save_counts(db, item, ids).await?;
		let (reposted, saved) = match ctx.current_user_id {
			Some(user_id) => (
				relations::reposted_ids(db, user_id, item, ids).await?,
				relations::active_relation_ids(db, user_id, RelationKind::Save(item), ids).await?,
			),
			None => Default::default(),
		};

		Ok(Self { reposts, saves, reposted, saved })
	}
}

async fn owner_summaries(db: &Db, owner_ids: &[i64]) -> Result<HashMap<i64, UserSummary>> {
	let mut unique = owner_ids.to_vec();

	unique.sort_unstable();
	unique.dedup();

	let summaries = entities::fetch_user_summaries(db, &unique).await?;

	Ok(summaries.into_iter().map(|summary| (summary.user_id, summary)).collect())
}

fn count(counts: &aggregates::Counts, id: i64) -> i64 {
	counts.get(&id).copied().unwrap_or(0)
}
