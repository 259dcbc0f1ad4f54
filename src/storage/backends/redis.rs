use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, RedisResult, aio::MultiplexedConnection};
use tokio::sync::RwLock;
use tracing::{debug, error, trace};

use super::KvBackend;
use crate::errors::{LinkError, Result};

/// Redis 后端
///
/// 所有请求共享一条多路复用连接；连接出错后丢弃，下次调用时重建。
pub struct RedisBackend {
    client: redis::Client,
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
}

impl RedisBackend {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            LinkError::config(format!("Invalid Redis address '{}': {}", url, e))
        })?;

        let backend = Self {
            client,
            connection: Arc::new(RwLock::new(None)),
        };

        backend.get_connection().await.map_err(|e| {
            error!(
                "Failed to connect to Redis: {}. Check Redis server status and address: {}",
                e, url
            );
            LinkError::backend(format!("Redis connection failed: {e}"))
        })?;

        debug!("RedisBackend connected to {}", url);
        Ok(backend)
    }

    /// 获取或建立持久连接
    async fn get_connection(&self) -> RedisResult<MultiplexedConnection> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let mut conn_guard = self.connection.write().await;

        // 双重检查，避免竞态条件
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self.client.get_multiplexed_async_connection().await?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established and cached");

        Ok(new_conn)
    }

    /// 重置连接（在连接错误时调用）
    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        match self.get_connection().await {
            Ok(conn) => Ok(conn),
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                Err(e.into())
            }
        }
    }

    async fn checked<T>(&self, op: &str, key: &str, result: RedisResult<T>) -> Result<T> {
        match result {
            Ok(value) => {
                trace!("Redis {} succeeded for key: {}", op, key);
                Ok(value)
            }
            Err(e) => {
                error!("Redis {} failed for key '{}': {}", op, key, e);
                // 连接可能已断开，重置连接
                self.reset_connection().await;
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl KvBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        let result: RedisResult<Option<String>> = conn.get(key).await;
        self.checked("GET", key, result).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        let result = conn.set::<&str, &str, ()>(key, value).await;
        self.checked("SET", key, result).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection().await?;
        let result = conn.incr::<&str, i64, i64>(key, 1).await;
        self.checked("INCR", key, result).await
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.connection().await?;
        let result = conn.keys::<&str, Vec<String>>(pattern).await;
        self.checked("KEYS", pattern, result).await
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let result = redis::cmd("PING").query_async::<String>(&mut conn).await;
        let response = self.checked("PING", "-", result).await?;
        debug!("Redis connection test successful: {}", response);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
