use disco_config::Search;
use disco_domain::{
	kind::EntityKind,
	ranking::{RankedCandidate, Window},
};
use disco_storage::scoring::{self, RelatedTo, ScoreParams, ScoreRequest};

use crate::{DiscoService, Result, SearchContext};

/// Ranks one entity kind. The personalized variant keeps only entities the current user saved or
/// follows, and yields nothing for an anonymous caller.
pub(super) async fn score(
	service: &DiscoService,
	kind: EntityKind,
	query: &str,
	window: Window,
	ctx: SearchContext,
	personalized: bool,
) -> Result<Vec<RankedCandidate>> {
	let related_to = match (personalized, ctx.current_user_id) {
		(false, _) => None,
		(true, Some(user_id)) => Some(RelatedTo { user_id, relation: kind.relation() }),
		(true, None) => {
			tracing::debug!(
				group = kind.personalized_field(),
				"Personalized search skipped without a current user."
			);

			return Ok(Vec::new());
		},
	};
	let req = ScoreRequest {
		kind,
		query,
		params: score_params(&service.cfg.search, kind),
		window,
		viewer_id: ctx.current_user_id,
		related_to,
	};
	let candidates = scoring::rank_candidates(&service.db, &req).await?;

	tracing::debug!(
		kind = ?kind,
		personalized,
		candidates = candidates.len(),
		top_score = candidates.first().map(|candidate| candidate.score),
		"Scored search candidates."
	);

	Ok(candidates)
}

fn score_params(cfg: &Search, kind: EntityKind) -> ScoreParams {
	let field_weight = match kind {
		EntityKind::Track => cfg.weights.track_title,
		EntityKind::User => cfg.weights.user_name,
		EntityKind::Playlist => cfg.weights.playlist_name,
		EntityKind::Album => cfg.weights.album_name,
	};

	ScoreParams { min_similarity: cfg.min_similarity, field_weight }
}
