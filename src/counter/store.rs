use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tokio::sync::OnceCell;
use tokio::time::timeout;
use tracing::{debug, info};

use crate::error::{AppError, Result};

/// Key holding the page view counter.
pub const VIEW_COUNT_KEY: &str = "viewCount";

/// A key-value store that can atomically increment a counter.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increment `key` by one and return the new value.
    async fn increment(&self, key: &str) -> Result<i64>;
}

/// Redis-backed counter. Connects on first use and keeps the connection for
/// the life of the process; `ConnectionManager` re-establishes it if it drops.
pub struct RedisCounter {
    client: redis::Client,
    connection: OnceCell<ConnectionManager>,
    op_timeout: Duration,
}

impl std::fmt::Debug for RedisCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCounter")
            .field("client", &self.client)
            .field("connected", &self.connection.initialized())
            .field("op_timeout", &self.op_timeout)
            .finish()
    }
}

impl RedisCounter {
    pub fn new(redis_url: &str, op_timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| AppError::Config(format!("Invalid REDIS_URL: {}", e)))?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
            op_timeout,
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        // A failed connect leaves the cell empty, so the next call retries.
        let conn = self
            .connection
            .get_or_try_init(|| async {
                debug!("Connecting to counter store");
                let conn = timeout(self.op_timeout, ConnectionManager::new(self.client.clone()))
                    .await
                    .map_err(|_| AppError::StoreConnection("connect timed out".into()))??;
                info!("Connected to counter store");
                Ok::<_, AppError>(conn)
            })
            .await?;

        Ok(conn.clone())
    }
}

#[async_trait]
impl CounterStore for RedisCounter {
    async fn increment(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection().await?;

        let count = timeout(self.op_timeout, conn.incr::<_, _, i64>(key, 1))
            .await
            .map_err(|_| AppError::StoreConnection(format!("INCR {} timed out", key)))??;

        Ok(count)
    }
}
