//! Trigram ranking over the per-kind lexeme dictionaries.

use sqlx::{Postgres, QueryBuilder};

use disco_domain::{
	kind::{EntityKind, RelationKind},
	ranking::{RankedCandidate, Window},
};

use crate::{Result, db::Db, filters};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreParams {
	/// Lexemes below this similarity are ignored.
	pub min_similarity: f32,
	/// Multiplier on the similarity between the query and the entity's display field.
	pub field_weight: f32,
}

/// Restricts scoring to entities `user_id` holds `relation` to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelatedTo {
	pub user_id: i64,
	pub relation: RelationKind,
}

#[derive(Debug, Clone)]
pub struct ScoreRequest<'a> {
	pub kind: EntityKind,
	pub query: &'a str,
	pub params: ScoreParams,
	pub window: Window,
	pub viewer_id: Option<i64>,
	pub related_to: Option<RelatedTo>,
}

struct LexemeSource {
	dictionary: &'static str,
	dictionary_id: &'static str,
	table: &'static str,
	table_id: &'static str,
	field: &'static str,
}

const TRACKS: LexemeSource = LexemeSource {
	dictionary: "track_lexeme_dict",
	dictionary_id: "track_id",
	table: "tracks",
	table_id: "track_id",
	field: "title",
};
const USERS: LexemeSource = LexemeSource {
	dictionary: "user_lexeme_dict",
	dictionary_id: "user_id",
	table: "users",
	table_id: "user_id",
	field: "name",
};
const PLAYLISTS: LexemeSource = LexemeSource {
	dictionary: "playlist_lexeme_dict",
	dictionary_id: "playlist_id",
	table: "playlists",
	table_id: "playlist_id",
	field: "playlist_name",
};
const ALBUMS: LexemeSource = LexemeSource {
	dictionary: "album_lexeme_dict",
	dictionary_id: "playlist_id",
	table: "playlists",
	table_id: "playlist_id",
	field: "playlist_name",
};

fn source(kind: EntityKind) -> &'static LexemeSource {
	match kind {
		EntityKind::Track => &TRACKS,
		EntityKind::User => &USERS,
		EntityKind::Playlist => &PLAYLISTS,
		EntityKind::Album => &ALBUMS,
	}
}

/// Ranks entities of one kind against `req.query`, best first, windowed in SQL.
pub async fn rank_candidates(db: &Db, req: &ScoreRequest<'_>) -> Result<Vec<RankedCandidate>> {
	let mut builder = build_rank_query(req);
	let rows: Vec<(i64, f32)> = builder.build_query_as().fetch_all(db.reader()).await?;

	Ok(rows.into_iter().map(|(id, score)| RankedCandidate { id, score }).collect())
}

fn build_rank_query<'a>(req: &ScoreRequest<'a>) -> QueryBuilder<'a, Postgres> {
	let src = source(req.kind);
	let target = format!("d.{}", src.dictionary_id);
	let mut builder = QueryBuilder::new(format!("SELECT {target} AS id, (SUM(similarity(d.word, "));

	builder.push_bind(req.query);
	builder.push(")) + ");
	builder.push_bind(req.params.field_weight);
	builder.push(format!(" * similarity(COALESCE(e.{}, ''), ", src.field));
	builder.push_bind(req.query);
	builder.push(format!(
		"))::real AS score FROM {} d JOIN {} e ON e.{} = {target} WHERE similarity(d.word, ",
		src.dictionary, src.table, src.table_id
	));
	builder.push_bind(req.query);
	builder.push(") >= ");
	builder.push_bind(req.params.min_similarity);
	builder.push(" AND ");
	filters::push_visibility(&mut builder, req.kind, "e", req.viewer_id);

	if let Some(related) = req.related_to {
		builder.push(" AND ");
		filters::push_relation_exists(&mut builder, related.relation, related.user_id, &target);
	}

	builder.push(format!(" GROUP BY {target}, e.{} ORDER BY score DESC LIMIT ", src.field));
	builder.push_bind(req.window.sql_limit());
	builder.push(" OFFSET ");
	builder.push_bind(req.window.sql_offset());

	builder
}
