pub mod search;
pub mod tags;
pub mod time_serde;

mod error;

pub use error::{Error, Result};
pub use search::{
	PlaylistItem, PlaylistStats, SearchRequest, SearchResponse, TrackItem, TrackStats, UserItem,
	UserStats,
};
pub use tags::{TagSearchRequest, TagSearchResponse};

use disco_config::Config;
use disco_domain::ranking::Window;
use disco_storage::db::Db;

pub struct DiscoService {
	pub cfg: Config,
	pub db: Db,
}
impl DiscoService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}

	fn window(&self, limit: Option<u32>, offset: Option<u32>) -> Window {
		Window::new(limit.unwrap_or(self.cfg.search.default_limit), offset.unwrap_or(0))
	}
}

/// Who is asking. Personalized result groups and owner-only rows need a current user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchContext {
	pub current_user_id: Option<i64>,
}
impl SearchContext {
	pub fn anonymous() -> Self {
		Self::default()
	}

	pub fn user(user_id: i64) -> Self {
		Self { current_user_id: Some(user_id) }
	}
}
