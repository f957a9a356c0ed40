use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::Result;

pub struct Db {
	pub pool: PgPool,
	replica: Option<PgPool>,
}
impl Db {
	pub async fn connect(cfg: &disco_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;
		let replica = match cfg.read_replica_dsn.as_deref() {
			Some(dsn) => Some(
				PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(dsn).await?,
			),
			None => None,
		};

		Ok(Self { pool, replica })
	}

	/// Builds the pools without opening a connection. Nothing is dialed until the first query.
	pub fn connect_lazy(cfg: &disco_config::Postgres) -> Result<Self> {
		let pool = PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect_lazy(&cfg.dsn)?;
		let replica = cfg
			.read_replica_dsn
			.as_deref()
			.map(|dsn| PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect_lazy(dsn))
			.transpose()?;

		Ok(Self { pool, replica })
	}

	/// Pool for read-only search queries.
	pub fn reader(&self) -> &PgPool {
		self.replica.as_ref().unwrap_or(&self.pool)
	}
}
