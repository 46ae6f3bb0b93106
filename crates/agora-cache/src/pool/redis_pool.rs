//! deadpool-redis pool plus the JSON helpers the member cache uses

use agora_common::RedisConfig;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

/// Keys fetched per SCAN round while clearing a prefix
const SCAN_BATCH: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum RedisPoolError {
    #[error("Invalid Redis pool settings: {0}")]
    Setup(String),

    #[error("No Redis connection available: {0}")]
    Checkout(#[from] deadpool_redis::PoolError),

    #[error("Redis command failed: {0}")]
    Command(#[from] redis::RedisError),

    #[error("Cached value is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RedisResult<T> = Result<T, RedisPoolError>;

/// Strip credentials so the URL can be logged
fn loggable_url(url: &str) -> &str {
    url.rsplit_once('@').map_or(url, |(_, host)| host)
}

/// Shared handle to a lazily connecting Redis pool
#[derive(Clone)]
pub struct RedisPool {
    pool: Pool,
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisPool")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

impl RedisPool {
    /// Build the pool; no connection is opened until the first command
    pub fn from_config(config: &RedisConfig) -> RedisResult<Self> {
        let max_size = config.max_connections.max(1) as usize;
        let pool = Config::from_url(config.url.as_str())
            .builder()
            .map_err(|e| RedisPoolError::Setup(e.to_string()))?
            .max_size(max_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RedisPoolError::Setup(e.to_string()))?;

        tracing::info!(url = %loggable_url(&config.url), max_size, "Redis pool ready");
        Ok(Self { pool })
    }

    async fn connection(&self) -> RedisResult<Connection> {
        Ok(self.pool.get().await?)
    }

    /// `PING` round trip, used by the readiness probe
    pub async fn health_check(&self) -> RedisResult<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }

    /// `SET key json EX ttl`
    pub async fn put_json<V: Serialize>(&self, key: &str, value: &V, ttl_seconds: u64) -> RedisResult<()> {
        let json = serde_json::to_string(value)?;
        let mut conn = self.connection().await?;
        conn.set_ex::<_, _, ()>(key, json, ttl_seconds).await?;
        Ok(())
    }

    pub async fn get_json<V: DeserializeOwned>(&self, key: &str) -> RedisResult<Option<V>> {
        let mut conn = self.connection().await?;
        let raw: Option<String> = conn.get(key).await?;
        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(Into::into)
    }

    /// Remove the given keys; returns how many existed
    pub async fn remove(&self, keys: &[String]) -> RedisResult<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.connection().await?;
        Ok(conn.del(keys).await?)
    }

    /// Remove every key under `prefix`, walking the keyspace with SCAN
    pub async fn remove_prefix(&self, prefix: &str) -> RedisResult<usize> {
        let pattern = format!("{prefix}*");
        let mut conn = self.connection().await?;
        let mut cursor = 0_u64;
        let mut removed = 0;

        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await?;

            if !batch.is_empty() {
                removed += conn.del::<_, usize>(&batch).await?;
            }
            if next == 0 {
                return Ok(removed);
            }
            cursor = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loggable_url_hides_credentials() {
        assert_eq!(loggable_url("redis://user:pw@cache:6379"), "cache:6379");
        assert_eq!(loggable_url("redis://cache:6379"), "redis://cache:6379");
    }

    #[tokio::test]
    async fn test_pool_is_lazy() {
        let pool = RedisPool::from_config(&RedisConfig {
            url: "redis://127.0.0.1:1".to_string(),
            max_connections: 1,
            ttl_seconds: 60,
        });
        assert!(pool.is_ok());
    }
}
