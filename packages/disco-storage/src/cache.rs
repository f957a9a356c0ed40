use redis::{AsyncCommands, aio::ConnectionManager};

use crate::Result;

/// Opens a reconnecting Redis connection shared by the cache and the lease lock.
pub async fn connect(cfg: &disco_config::Redis) -> Result<ConnectionManager> {
	let client = redis::Client::open(cfg.url.as_str())?;
	let conn = ConnectionManager::new(client).await?;

	Ok(conn)
}

/// String values keyed by name. Writes overwrite and never expire.
#[derive(Clone)]
pub struct RedisCache {
	conn: ConnectionManager,
}
impl RedisCache {
	pub fn new(conn: ConnectionManager) -> Self {
		Self { conn }
	}

	pub async fn set(&self, key: &str, value: &str) -> Result<()> {
		let mut conn = self.conn.clone();

		conn.set::<_, _, ()>(key, value).await?;

		Ok(())
	}

	pub async fn get(&self, key: &str) -> Result<Option<String>> {
		let mut conn = self.conn.clone();
		let value = conn.get::<_, Option<String>>(key).await?;

		Ok(value)
	}
}
