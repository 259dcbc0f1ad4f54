use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::BackendConfig;
use crate::errors::{LinkError, Result};

pub mod memory;
pub mod redis;

pub use self::memory::MemoryBackend;
pub use self::redis::RedisBackend;

/// The key-value primitives the link store is built on.
///
/// `incr` must be atomic with respect to concurrent callers.
#[async_trait]
pub trait KvBackend: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    /// 原子自增 1，键不存在时从 0 开始
    async fn incr(&self, key: &str) -> Result<i64>;
    /// Glob-style pattern (`*`, `?`), like Redis `KEYS`.
    async fn keys(&self, pattern: &str) -> Result<Vec<String>>;
    async fn ping(&self) -> Result<()>;
    fn backend_name(&self) -> &'static str;
}

/// 根据配置创建后端
pub async fn create_backend(config: &BackendConfig) -> Result<Arc<dyn KvBackend>> {
    let backend: Arc<dyn KvBackend> = match config.backend_type.as_str() {
        "redis" => Arc::new(RedisBackend::connect(&config.redis.url()).await?),
        "memory" => Arc::new(MemoryBackend::new()),
        other => {
            return Err(LinkError::config(format!(
                "Unknown backend type: '{}'. Valid: redis, memory",
                other
            )));
        }
    };

    backend.ping().await?;
    info!("Using storage backend: {}", backend.backend_name());
    Ok(backend)
}
