use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use crate::refresh::{CacheRefreshJob, RefreshOutcome};

/// Runs the refresh job on a fixed schedule. A failed tick is logged and the next tick proceeds.
pub async fn run_worker(job: CacheRefreshJob, every: Duration) {
	let mut ticker = time::interval(every);

	ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

	tracing::info!(interval_seconds = every.as_secs(), "Cache refresh worker started.");

	loop {
		ticker.tick().await;

		match job.run_once().await {
			Ok(RefreshOutcome::Refreshed { timeframes }) => {
				tracing::info!(refreshed = timeframes.len(), "Cache refresh tick finished.");
			},
			Ok(RefreshOutcome::LockDenied) => {},
			Err(err) => {
				tracing::error!(error = %err, "Cache refresh tick failed.");
			},
		}
	}
}
