//! Trending cache refresh under a cross-process lease lock.
//!
//! Only one process refreshes at a time. Each tick either takes the lock, recomputes every
//! configured timeframe in order and overwrites its cache key, or finds the lock held and does
//! nothing. A failure stops the pass: timeframes already written stay written and the rest keep
//! their previous values until a later tick.

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use tokio::runtime::Handle;

use disco_config::CacheRefresh;
use disco_domain::timeframe::Timeframe;
use disco_storage::{
	cache::RedisCache,
	db::Db,
	lock::{Lease, RedisLeaseLock},
	trending::{self, TrendingEntry},
};

use crate::{Error, Result};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait LeaseLock
where
	Self: Send + Sync,
{
	/// Returns `None` immediately when another holder owns `name`.
	fn try_acquire<'a>(
		&'a self,
		name: &'a str,
		lease: Duration,
	) -> BoxFuture<'a, Result<Option<Lease>>>;

	/// Returns false when the lease was no longer held.
	fn release<'a>(&'a self, lease: &'a Lease) -> BoxFuture<'a, Result<bool>>;
}

pub trait CacheStore
where
	Self: Send + Sync,
{
	fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<()>>;

	fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>>>;
}

pub trait TrendingSource
where
	Self: Send + Sync,
{
	fn compute(
		&self,
		timeframe: Timeframe,
		limit: u32,
	) -> BoxFuture<'_, Result<Vec<TrendingEntry>>>;
}

impl LeaseLock for RedisLeaseLock {
	fn try_acquire<'a>(
		&'a self,
		name: &'a str,
		lease: Duration,
	) -> BoxFuture<'a, Result<Option<Lease>>> {
		Box::pin(async move { Ok(RedisLeaseLock::try_acquire(self, name, lease).await?) })
	}

	fn release<'a>(&'a self, lease: &'a Lease) -> BoxFuture<'a, Result<bool>> {
		Box::pin(async move { Ok(RedisLeaseLock::release(self, lease).await?) })
	}
}

impl CacheStore for RedisCache {
	fn set<'a>(&'a self, key: &'a str, value: &'a str) -> BoxFuture<'a, Result<()>> {
		Box::pin(async move { Ok(RedisCache::set(self, key, value).await?) })
	}

	fn get<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Result<Option<String>>> {
		Box::pin(async move { Ok(RedisCache::get(self, key).await?) })
	}
}

impl TrendingSource for Db {
	fn compute(
		&self,
		timeframe: Timeframe,
		limit: u32,
	) -> BoxFuture<'_, Result<Vec<TrendingEntry>>> {
		Box::pin(async move { Ok(trending::compute_trending(self, timeframe, limit).await?) })
	}
}

/// A held lease that is released exactly once.
///
/// Call [`LeaseGuard::release`] on every normal path. If the guard is dropped while still held,
/// for example when the refresh future is cancelled or panics, the release is spawned on the
/// current Tokio runtime instead.
pub struct LeaseGuard {
	lock: Arc<dyn LeaseLock>,
	lease: Option<Lease>,
}
impl LeaseGuard {
	pub fn new(lock: Arc<dyn LeaseLock>, lease: Lease) -> Self {
		Self { lock, lease: Some(lease) }
	}

	pub async fn release(mut self) -> Result<bool> {
		match self.lease.take() {
			Some(lease) => self.lock.release(&lease).await,
			None => Ok(false),
		}
	}
}
impl Drop for LeaseGuard {
	fn drop(&mut self) {
		let Some(lease) = self.lease.take() else {
			return;
		};
		let lock = self.lock.clone();

		match Handle::try_current() {
			Ok(handle) => {
				handle.spawn(async move {
					if let Err(err) = lock.release(&lease).await {
						tracing::error!(
							lock = %lease.name,
							error = %err,
							"Deferred lease release failed."
						);
					}
				});
			},
			Err(_) => {
				tracing::warn!(
					lock = %lease.name,
					"No runtime to release the lease; it will expire."
				);
			},
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSettings {
	pub lock_name: String,
	pub lease: Duration,
	pub trending_limit: u32,
	pub timeframes: Vec<Timeframe>,
}
impl RefreshSettings {
	pub fn from_config(cfg: &CacheRefresh) -> Result<Self> {
		let timeframes = cfg
			.timeframes
			.iter()
			.map(|raw| raw.parse::<Timeframe>())
			.collect::<Result<Vec<_>, _>>()?;

		Ok(Self {
			lock_name: cfg.lock_name.clone(),
			lease: Duration::from_secs(cfg.lease_seconds),
			trending_limit: cfg.trending_limit,
			timeframes,
		})
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
	Refreshed { timeframes: Vec<Timeframe> },
	/// Another process holds the lock. Nothing was computed or written.
	LockDenied,
}

pub struct CacheRefreshJob {
	lock: Arc<dyn LeaseLock>,
	cache: Arc<dyn CacheStore>,
	trending: Arc<dyn TrendingSource>,
	settings: RefreshSettings,
}
impl CacheRefreshJob {
	pub fn new(
		lock: Arc<dyn LeaseLock>,
		cache: Arc<dyn CacheStore>,
		trending: Arc<dyn TrendingSource>,
		settings: RefreshSettings,
	) -> Self {
		Self { lock, cache, trending, settings }
	}

	/// One scheduled tick.
	pub async fn run_once(&self) -> Result<RefreshOutcome> {
		let lock_name = self.settings.lock_name.as_str();
		let Some(lease) = self.lock.try_acquire(lock_name, self.settings.lease).await? else {
			tracing::info!(lock = lock_name, "Cache refresh skipped; lock is held elsewhere.");

			return Ok(RefreshOutcome::LockDenied);
		};
		let guard = LeaseGuard::new(self.lock.clone(), lease);
		let result = self.refresh_all().await;

		match guard.release().await {
			Ok(true) => {},
			Ok(false) => {
				tracing::warn!(lock = lock_name, "Lease expired before the refresh finished.");
			},
			Err(err) => {
				tracing::error!(
					lock = lock_name,
					error = %err,
					"Lease release failed; it will expire."
				);
			},
		}

		result
	}

	/// Reads back the cached ranking for `timeframe`, if one has been written.
	pub async fn cached(&self, timeframe: Timeframe) -> Result<Option<Vec<TrendingEntry>>> {
		let Some(raw) = self.cache.get(&timeframe.cache_key()).await? else {
			return Ok(None);
		};

		Ok(Some(trending::decode(&raw)?))
	}

	async fn refresh_all(&self) -> Result<RefreshOutcome> {
		let mut refreshed = Vec::with_capacity(self.settings.timeframes.len());

		for &timeframe in &self.settings.timeframes {
			let entries = self
				.trending
				.compute(timeframe, self.settings.trending_limit)
				.await
				.map_err(|err| {
					tracing::error!(%timeframe, error = %err, "Trending computation failed.");

					Error::Trending { timeframe, message: err.to_string() }
				})?;
			let payload = trending::encode(&entries)?;

			self.cache.set(&timeframe.cache_key(), &payload).await?;

			tracing::info!(%timeframe, entries = entries.len(), "Trending cache updated.");

			refreshed.push(timeframe);
		}

		Ok(RefreshOutcome::Refreshed { timeframes: refreshed })
	}
}
