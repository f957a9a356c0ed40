use sqlx::{Postgres, QueryBuilder};

use disco_domain::kind::{EntityKind, RelationKind};

/// Appends the searchable-row predicate for `kind`, with the entity table aliased as `alias`.
///
/// Unlisted tracks and private playlists stay visible to their owner. A missing viewer compares
/// as NULL, so only public rows pass.
pub(crate) fn push_visibility(
	builder: &mut QueryBuilder<'_, Postgres>,
	kind: EntityKind,
	alias: &str,
	viewer_id: Option<i64>,
) {
	match kind {
		EntityKind::Track => {
			builder.push(format!(
				"{alias}.is_current = TRUE AND {alias}.is_delete = FALSE AND ({alias}.is_unlisted = FALSE OR {alias}.owner_id = "
			));
			builder.push_bind(viewer_id);
			builder.push(")");
		},
		EntityKind::User => {
			builder.push(format!("{alias}.is_current = TRUE AND {alias}.is_ready = TRUE"));
		},
		EntityKind::Playlist | EntityKind::Album => {
			builder.push(format!(
				"{alias}.is_current = TRUE AND {alias}.is_delete = FALSE AND {alias}.is_album = {} AND ({alias}.is_private = FALSE OR {alias}.playlist_owner_id = ",
				kind == EntityKind::Album
			));
			builder.push_bind(viewer_id);
			builder.push(")");
		},
	}
}

/// Appends an `EXISTS` test for an active relation from `user_id` to the row named by `target`.
pub(crate) fn push_relation_exists(
	builder: &mut QueryBuilder<'_, Postgres>,
	relation: RelationKind,
	user_id: i64,
	target: &str,
) {
	match relation {
		RelationKind::Save(item) => {
			builder.push(
				"EXISTS (SELECT 1 FROM saves s WHERE s.is_current = TRUE AND s.is_delete = FALSE AND s.user_id = ",
			);
			builder.push_bind(user_id);
			builder.push(" AND s.save_type = ");
			builder.push_bind(item.as_str());
			builder.push(format!(" AND s.save_item_id = {target})"));
		},
		RelationKind::Follow => {
			builder.push(
				"EXISTS (SELECT 1 FROM follows f WHERE f.is_current = TRUE AND f.is_delete = FALSE AND f.follower_user_id = ",
			);
			builder.push_bind(user_id);
			builder.push(format!(" AND f.followee_user_id = {target})"));
		},
	}
}
