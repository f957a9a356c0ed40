//! A named mutual-exclusion lease in Redis.
//!
//! The holder is identified by a random token. Expiry is the only recovery when a holder dies
//! without releasing.

use std::time::Duration;

use redis::{Script, aio::ConnectionManager};
use uuid::Uuid;

use crate::Result;

const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
	return redis.call("DEL", KEYS[1])
else
	return 0
end
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lease {
	pub name: String,
	pub token: String,
	pub lease: Duration,
}

#[derive(Clone)]
pub struct RedisLeaseLock {
	conn: ConnectionManager,
}
impl RedisLeaseLock {
	pub fn new(conn: ConnectionManager) -> Self {
		Self { conn }
	}

	/// Takes the lock if nobody holds it. Returns `None` without waiting when it is held.
	pub async fn try_acquire(&self, name: &str, lease: Duration) -> Result<Option<Lease>> {
		let token = Uuid::new_v4().to_string();
		let lease_ms = u64::try_from(lease.as_millis()).unwrap_or(u64::MAX).max(1);
		let mut conn = self.conn.clone();
		let reply = redis::cmd("SET")
			.arg(name)
			.arg(&token)
			.arg("NX")
			.arg("PX")
			.arg(lease_ms)
			.query_async::<Option<String>>(&mut conn)
			.await?;

		tracing::debug!(lock = name, acquired = reply.is_some(), "Lease lock attempt.");

		Ok(reply.map(|_| Lease { name: name.to_string(), token, lease }))
	}

	/// Deletes the lock only while `lease` still owns it. Returns false when it had already
	/// expired or passed to another holder.
	pub async fn release(&self, lease: &Lease) -> Result<bool> {
		let script = Script::new(RELEASE_SCRIPT);
		let mut conn = self.conn.clone();
		let deleted = script
			.key(&lease.name)
			.arg(&lease.token)
			.invoke_async::<i64>(&mut conn)
			.await?;

		Ok(deleted == 1)
	}
}
