use std::collections::HashSet;

use disco_domain::{
	Error,
	kind::{EntityKind, ItemType, RelationKind, SearchKind, TagSearchKind},
	query,
	ranking::{self, RankedCandidate, Window},
	timeframe::Timeframe,
};

#[derive(Debug, PartialEq)]
struct Row {
	id: i64,
	title: &'static str,
}

fn ranked(scores: &[(i64, f32)]) -> Vec<RankedCandidate> {
	scores.iter().map(|(id, score)| RankedCandidate { id: *id, score: *score }).collect()
}

#[test]
fn all_kind_covers_every_entity_once() {
	let kinds = SearchKind::All.entity_kinds();
	let unique = kinds.iter().collect::<HashSet<_>>();

	assert_eq!(kinds.len(), 4);
	assert_eq!(unique.len(), 4);
}

#[test]
fn invalid_kind_lists_allowed_values() {
	let err = "songs".parse::<SearchKind>().expect_err("songs is not a kind");

	assert_eq!(
		err.to_string(),
		"Invalid value for parameter 'kind' must be in [\"all\", \"tracks\", \"users\", \"playlists\", \"albums\"]."
	);
}

#[test]
fn tag_kinds_select_groups() {
	assert!(TagSearchKind::All.includes_tracks() && TagSearchKind::All.includes_users());
	assert!(TagSearchKind::Tracks.includes_tracks() && !TagSearchKind::Tracks.includes_users());
	assert!(!TagSearchKind::Users.includes_tracks() && TagSearchKind::Users.includes_users());
}

#[test]
fn relations_follow_entity_kind() {
	assert_eq!(EntityKind::Track.relation(), RelationKind::Save(ItemType::Track));
	assert_eq!(EntityKind::User.relation(), RelationKind::Follow);
	assert_eq!(EntityKind::Album.relation(), RelationKind::Save(ItemType::Album));
	assert_eq!(EntityKind::Playlist.personalized_field(), "saved_playlists");
	assert_eq!(EntityKind::User.personalized_field(), "followed_users");
}

#[test]
fn empty_query_is_rejected() {
	assert_eq!(query::normalize_search_query(None), Err(Error::EmptyQuery));
	assert_eq!(query::normalize_search_query(Some("   ")), Err(Error::EmptyQuery));
	assert_eq!(query::normalize_tag_query(Some("")), Err(Error::EmptyQuery));
	assert_eq!(query::normalize_tag_query(Some(" house ")).as_deref(), Ok("house"));
}

#[test]
fn window_matches_slicing_of_full_list() {
	let full = (0..25).collect::<Vec<i64>>();

	for offset in [0_u32, 3, 10, 24, 25, 40] {
		for limit in [0_u32, 1, 5, 10, 100] {
			let window = Window::new(limit, offset);
			let start = (offset as usize).min(full.len());
			let end = (start + limit as usize).min(full.len());
			let expected = full[start..end].to_vec();

			assert_eq!(window.apply(&full), expected.as_slice());
		}
	}
}

#[test]
fn unresolved_ids_are_dropped_in_rank_order() {
	let ids = [5, 3, 9];
	let rows = vec![Row { id: 9, title: "nine" }, Row { id: 5, title: "five" }];
	let hydrated = ranking::restore_order(&ids, rows, |row| row.id);

	assert_eq!(hydrated, vec![Row { id: 5, title: "five" }, Row { id: 9, title: "nine" }]);
}

#[test]
fn restore_order_ignores_rows_that_were_not_requested() {
	let rows = vec![Row { id: 1, title: "one" }, Row { id: 2, title: "two" }];
	let hydrated = ranking::restore_order(&[2], rows, |row| row.id);

	assert_eq!(hydrated, vec![Row { id: 2, title: "two" }]);
}

#[test]
fn related_subset_keeps_candidate_order() {
	let related = HashSet::from([9, 1, 4]);
	let personalized = ranking::retain_related(&[4, 7, 1, 3, 9], &related);

	assert_eq!(personalized, vec![4, 1, 9]);
}

#[test]
fn rank_by_count_is_stable() {
	let mut rows = vec![(1, 3), (2, 10), (3, 3), (4, 0)];

	ranking::rank_by_count(&mut rows, |row| row.1);

	assert_eq!(rows, vec![(2, 10), (1, 3), (3, 3), (4, 0)]);
}

#[test]
fn candidate_ids_keep_rank_order() {
	assert_eq!(ranking::candidate_ids(&ranked(&[(7, 1.0), (2, 0.5), (4, 0.5)])), vec![7, 2, 4]);
	assert!(ranking::candidate_ids(&[]).is_empty());
}

#[test]
fn timeframes_map_to_cache_keys() {
	let keys = Timeframe::ALL.iter().map(|timeframe| timeframe.cache_key()).collect::<Vec<_>>();

	assert_eq!(keys, vec!["trending-day", "trending-week", "trending-month", "trending-year"]);
	assert_eq!("month".parse::<Timeframe>(), Ok(Timeframe::Month));
	assert!("decade".parse::<Timeframe>().is_err());
	assert_eq!(serde_json::to_string(&Timeframe::Week).unwrap(), "\"week\"");
}
