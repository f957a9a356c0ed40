use disco_config::Postgres;
use disco_domain::{
	kind::{EntityKind, ItemType, RelationKind},
	ranking::{self, Window},
	timeframe::Timeframe,
};
use disco_storage::{
	aggregates,
	db::Db,
	entities, relations,
	scoring::{self, RelatedTo, ScoreParams, ScoreRequest},
	tags, trending,
};
use disco_testkit::TestDatabase;

const SEED: &str = "\
INSERT INTO users (user_id, handle, name) VALUES (1, 'kdot', 'Kendrick'), (2, 'deepfan', 'Deep Fan'), (3, 'lurker', 'Lurker');
INSERT INTO users (user_id, handle, name, is_ready) VALUES (4, 'pending', 'Pending', FALSE);
INSERT INTO tracks (track_id, owner_id, title, tags, updated_at) VALUES
	(10, 1, 'Money', 'hiphop', now() - interval '3 days'),
	(11, 1, 'Money Trees', 'hiphop,house', now() - interval '2 days'),
	(12, 2, 'Honey', 'deep house', now() - interval '1 day'),
	(13, 2, 'Warehouse Nights', 'house', now());
INSERT INTO tracks (track_id, owner_id, title, tags, is_unlisted) VALUES (14, 3, 'Money Secret', 'house', TRUE);
INSERT INTO tracks (track_id, owner_id, title, tags, is_delete) VALUES (15, 3, 'Money Gone', 'house', TRUE);
INSERT INTO track_lexeme_dict (track_id, word) VALUES
	(10, 'money'), (11, 'money'), (11, 'trees'), (12, 'honey'), (13, 'warehouse'), (13, 'nights'),
	(14, 'money'), (14, 'secret'), (15, 'money'), (15, 'gone');
INSERT INTO saves (user_id, save_item_id, save_type) VALUES (3, 11, 'track'), (3, 12, 'track');
INSERT INTO saves (user_id, save_item_id, save_type, is_delete) VALUES (3, 10, 'track', TRUE);
INSERT INTO reposts (user_id, repost_item_id, repost_type) VALUES (3, 12, 'track'), (2, 12, 'track');
INSERT INTO follows (follower_user_id, followee_user_id) VALUES (3, 1), (2, 1);
INSERT INTO plays (play_item_id) VALUES (12), (12), (12), (11), (13), (13);
INSERT INTO plays (play_item_id, created_at) VALUES (10, now() - interval '3 weeks');";

async fn seeded(test_db: &TestDatabase) -> Db {
	let cfg = Postgres {
		dsn: test_db.dsn().to_string(),
		pool_max_conns: 2,
		read_replica_dsn: None,
	};
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	disco_testkit::apply_catalog_schema(&db.pool).await.expect("Failed to apply catalog schema.");
	sqlx::raw_sql(SEED).execute(&db.pool).await.expect("Failed to seed catalog.");

	db
}

fn money(
	window: Window,
	viewer_id: Option<i64>,
	related_to: Option<RelatedTo>,
) -> ScoreRequest<'static> {
	ScoreRequest {
		kind: EntityKind::Track,
		query: "money",
		params: ScoreParams { min_similarity: 0.1, field_weight: 0.7 },
		window,
		viewer_id,
		related_to,
	}
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DISCO_PG_DSN to run."]
async fn scorer_ranks_visible_tracks_and_windows_in_sql() {
	let Some(base_dsn) = disco_testkit::env_dsn() else {
		eprintln!("Skipping scorer_ranks_visible_tracks_and_windows_in_sql; set DISCO_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = seeded(&test_db).await;
	let full = scoring::rank_candidates(&db, &money(Window::new(100, 0), None, None))
		.await
		.expect("Failed to rank tracks.");
	let ids = ranking::candidate_ids(&full);

	assert_eq!(ids.first(), Some(&10));
	assert!(full.windows(2).all(|pair| pair[0].score >= pair[1].score));
	assert!(ids.contains(&11) && ids.contains(&12));
	assert!(!ids.contains(&14) && !ids.contains(&15));

	for (limit, offset) in [(1, 0), (2, 1), (5, 2), (3, 9)] {
		let window = Window::new(limit, offset);
		let page = scoring::rank_candidates(&db, &money(window, None, None))
			.await
			.expect("Failed to rank tracks.");

		assert_eq!(ranking::candidate_ids(&page), ranking::candidate_ids(window.apply(&full)));
	}

	let owner_view = scoring::rank_candidates(&db, &money(Window::new(100, 0), Some(3), None))
		.await
		.expect("Failed to rank tracks.");

	assert!(ranking::candidate_ids(&owner_view).contains(&14));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DISCO_PG_DSN to run."]
async fn personalized_scores_match_base_scores() {
	let Some(base_dsn) = disco_testkit::env_dsn() else {
		eprintln!("Skipping personalized_scores_match_base_scores; set DISCO_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = seeded(&test_db).await;
	let related = RelatedTo { user_id: 3, relation: RelationKind::Save(ItemType::Track) };
	let base = scoring::rank_candidates(&db, &money(Window::new(100, 0), Some(3), None))
		.await
		.expect("Failed to rank tracks.");
	let saved = scoring::rank_candidates(&db, &money(Window::new(100, 0), Some(3), Some(related)))
		.await
		.expect("Failed to rank saved tracks.");

	assert_eq!(ranking::candidate_ids(&saved), vec![11, 12]);

	for candidate in &saved {
		let same = base.iter().find(|row| row.id == candidate.id).expect("Saved id is a base id.");

		assert_eq!(same.score, candidate.score);
	}

	let active = relations::active_relation_ids(
		&db,
		3,
		RelationKind::Save(ItemType::Track),
		&ranking::candidate_ids(&base),
	)
	.await
	.expect("Failed to read saves.");

	assert_eq!(ranking::retain_related(&ranking::candidate_ids(&base), &active), vec![11, 12]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DISCO_PG_DSN to run."]
async fn hydration_fetch_skips_unknown_and_hidden_ids() {
	let Some(base_dsn) = disco_testkit::env_dsn() else {
		eprintln!("Skipping hydration_fetch_skips_unknown_and_hidden_ids; set DISCO_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = seeded(&test_db).await;
	let ids = [12, 999, 14, 10];
	let rows = entities::fetch_tracks(&db, &ids, None).await.expect("Failed to fetch tracks.");
	let hydrated = ranking::restore_order(&ids, rows, |track| track.track_id);

	assert_eq!(hydrated.iter().map(|track| track.track_id).collect::<Vec<_>>(), vec![12, 10]);

	let users = entities::fetch_users(&db, &[4, 1]).await.expect("Failed to fetch users.");

	assert_eq!(users.iter().map(|user| user.user_id).collect::<Vec<_>>(), vec![1]);

	let mut owners = entities::fetch_user_summaries(&db, &[4, 1, 999])
		.await
		.expect("Failed to fetch owner summaries.")
		.into_iter()
		.map(|owner| owner.user_id)
		.collect::<Vec<_>>();

	owners.sort_unstable();

	assert_eq!(owners, vec![1, 4]);

	let plays = aggregates::play_counts(&db, &[10, 12, 13]).await.expect("Failed to count plays.");
	let reposts = aggregates::repost_counts(&db, ItemType::Track, &[12])
		.await
		.expect("Failed to count reposts.");
	let followers =
		aggregates::follower_counts(&db, &[1, 2]).await.expect("Failed to count followers.");

	assert_eq!(plays.get(&12), Some(&3));
	assert_eq!(plays.get(&10), Some(&1));
	assert_eq!(reposts.get(&12), Some(&2));
	assert_eq!(followers.get(&1), Some(&2));
	assert_eq!(followers.get(&2), None);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DISCO_PG_DSN to run."]
async fn tag_matching_filters_tokens_and_owner_threshold() {
	let Some(base_dsn) = disco_testkit::env_dsn() else {
		eprintln!(
			"Skipping tag_matching_filters_tokens_and_owner_threshold; set DISCO_PG_DSN to run."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = seeded(&test_db).await;
	let tracks = tags::tracks_with_tag(&db, "house").await.expect("Failed to match tags.");

	// Tracks 14 and 15 carry the tag but are unlisted or deleted.
	assert_eq!(tracks, vec![13, 12, 11]);

	let owners = tags::owners_with_tag(&db, "house", 2).await.expect("Failed to match owners.");

	assert_eq!(
		owners.iter().map(|owner| (owner.owner_id, owner.tag_count)).collect::<Vec<_>>(),
		vec![(2, 2)]
	);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set DISCO_PG_DSN to run."]
async fn trending_reads_plays_inside_the_window() {
	let Some(base_dsn) = disco_testkit::env_dsn() else {
		eprintln!("Skipping trending_reads_plays_inside_the_window; set DISCO_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = seeded(&test_db).await;
	let week = trending::compute_trending(&db, Timeframe::Week, 100)
		.await
		.expect("Failed to compute trending.");
	let month = trending::compute_trending(&db, Timeframe::Month, 2)
		.await
		.expect("Failed to compute trending.");

	assert_eq!(week.iter().map(|entry| entry.track_id).collect::<Vec<_>>(), vec![12, 13, 11]);
	assert_eq!(month.len(), 2);
	assert_eq!(
		trending::encode(&month[..1]).expect("Failed to encode."),
		r#"[{"track_id":12,"score":3.0}]"#
	);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
