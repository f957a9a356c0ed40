mod error;
mod types;

pub use error::{Error, Result};
pub use types::{CacheRefresh, Config, Postgres, Redis, Search, SearchWeights, Service, Storage};

use std::{collections::HashSet, fs, path::Path};

pub const TIMEFRAMES: [&str; 4] = ["day", "week", "month", "year"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (field, value) in [
		("service.log_level", &cfg.service.log_level),
		("storage.postgres.dsn", &cfg.storage.postgres.dsn),
		("storage.redis.url", &cfg.storage.redis.url),
		("cache_refresh.lock_name", &cfg.cache_refresh.lock_name),
	] {
		if value.trim().is_empty() {
			return Err(Error::invalid(field, "must be non-empty"));
		}
	}

	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::invalid("storage.postgres.pool_max_conns", "must be greater than zero"));
	}

	validate_search(&cfg.search)?;
	validate_cache_refresh(&cfg.cache_refresh)?;

	Ok(())
}

fn validate_search(search: &Search) -> Result<()> {
	if !search.min_similarity.is_finite() {
		return Err(Error::invalid("search.min_similarity", "must be a finite number"));
	}
	if !(0.0..=1.0).contains(&search.min_similarity) {
		return Err(Error::invalid("search.min_similarity", "must be in the range 0.0-1.0"));
	}
	if search.default_limit == 0 {
		return Err(Error::invalid("search.default_limit", "must be greater than zero"));
	}
	if search.default_user_tag_count == 0 {
		return Err(Error::invalid("search.default_user_tag_count", "must be at least one"));
	}

	for (field, weight) in [
		("search.weights.track_title", search.weights.track_title),
		("search.weights.user_name", search.weights.user_name),
		("search.weights.playlist_name", search.weights.playlist_name),
		("search.weights.album_name", search.weights.album_name),
	] {
		if !weight.is_finite() {
			return Err(Error::invalid(field, "must be a finite number"));
		}
		if weight < 0.0 {
			return Err(Error::invalid(field, "must be zero or greater"));
		}
	}

	Ok(())
}

fn validate_cache_refresh(refresh: &CacheRefresh) -> Result<()> {
	if refresh.interval_seconds == 0 {
		return Err(Error::invalid("cache_refresh.interval_seconds", "must be greater than zero"));
	}
	if refresh.lease_seconds == 0 {
		return Err(Error::invalid("cache_refresh.lease_seconds", "must be greater than zero"));
	}
	if refresh.trending_limit == 0 {
		return Err(Error::invalid("cache_refresh.trending_limit", "must be greater than zero"));
	}
	if refresh.timeframes.is_empty() {
		return Err(Error::invalid("cache_refresh.timeframes", "must be non-empty"));
	}

	let mut seen = HashSet::new();

	for timeframe in &refresh.timeframes {
		if !TIMEFRAMES.contains(&timeframe.as_str()) {
			return Err(Error::invalid(
				"cache_refresh.timeframes",
				format!("must only contain day, week, month, or year, found {timeframe:?}"),
			));
		}
		if !seen.insert(timeframe.as_str()) {
			return Err(Error::invalid(
				"cache_refresh.timeframes",
				format!("must not repeat {timeframe:?}"),
			));
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.storage
		.postgres
		.read_replica_dsn
		.as_deref()
		.map(|dsn| dsn.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.storage.postgres.read_replica_dsn = None;
	}

	for timeframe in &mut cfg.cache_refresh.timeframes {
		*timeframe = timeframe.trim().to_ascii_lowercase();
	}
}
