use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub search: Search,
	#[serde(default)]
	pub cache_refresh: CacheRefresh,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub redis: Redis,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// Optional. Search queries are read-only and run here when set.
	#[serde(default)]
	pub read_replica_dsn: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Redis {
	pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	/// Lexemes scoring below this trigram similarity never contribute to a candidate.
	pub min_similarity: f32,
	pub default_limit: u32,
	#[serde(default = "default_user_tag_count")]
	pub default_user_tag_count: u32,
	#[serde(default)]
	pub weights: SearchWeights,
}

/// Weight applied to the similarity between the query and an entity's whole display field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchWeights {
	pub track_title: f32,
	pub user_name: f32,
	pub playlist_name: f32,
	pub album_name: f32,
}
impl Default for SearchWeights {
	fn default() -> Self {
		Self { track_title: 0.7, user_name: 0.7, playlist_name: 0.7, album_name: 0.7 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheRefresh {
	pub interval_seconds: u64,
	pub lock_name: String,
	/// Must outlast a full recomputation of every timeframe.
	pub lease_seconds: u64,
	pub trending_limit: u32,
	pub timeframes: Vec<String>,
}
impl Default for CacheRefresh {
	fn default() -> Self {
		Self {
			interval_seconds: 60,
			lock_name: "update_discovery_lock".to_string(),
			lease_seconds: 7_200,
			trending_limit: 100,
			timeframes: ["day", "week", "month", "year"].map(String::from).to_vec(),
		}
	}
}

fn default_user_tag_count() -> u32 {
	2
}
