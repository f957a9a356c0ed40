pub mod refresh;
pub mod worker;

mod error;

pub use error::{Error, Result};

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use disco_storage::{
	cache::{self, RedisCache},
	db::Db,
	lock::RedisLeaseLock,
};
use refresh::{CacheRefreshJob, RefreshSettings};

#[derive(Debug, Parser)]
#[command(
	version = disco_cli::VERSION,
	rename_all = "kebab",
	styles = disco_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Run a single refresh tick and exit.
	#[arg(long)]
	pub once: bool,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = disco_config::load(&args.config)?;
	let filter = EnvFilter::try_new(&config.service.log_level)
		.unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let db = Db::connect(&config.storage.postgres).await?;
	let conn = cache::connect(&config.storage.redis).await?;
	let settings = RefreshSettings::from_config(&config.cache_refresh)?;
	let job = CacheRefreshJob::new(
		Arc::new(RedisLeaseLock::new(conn.clone())),
		Arc::new(RedisCache::new(conn)),
		Arc::new(db),
		settings,
	);

	if args.once {
		let outcome = job.run_once().await?;

		tracing::info!(?outcome, "Single cache refresh tick finished.");

		return Ok(());
	}

	worker::run_worker(job, Duration::from_secs(config.cache_refresh.interval_seconds)).await;

	Ok(())
}
