//! Link store
//!
//! Owns the `link:*` key namespace. The target URL and the view counter live
//! under separate keys so a redirect is a single point lookup and hits can use
//! the backend's atomic increment.

use std::sync::Arc;

use tracing::{debug, info, trace};

use super::backends::KvBackend;
use super::models::{Link, URL_KEY_PATTERN, id_from_url_key, url_key, views_key};
use crate::errors::{LinkError, Result};

#[derive(Clone)]
pub struct LinkStore {
    backend: Arc<dyn KvBackend>,
}

impl LinkStore {
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.backend_name()
    }

    /// Sets `link:<id>:url`, overwriting any previous target.
    pub async fn create(&self, id: &str, long_url: &str) -> Result<()> {
        if id.is_empty() {
            return Err(LinkError::validation("short_id must not be empty"));
        }
        if long_url.is_empty() {
            return Err(LinkError::validation("long_url must not be empty"));
        }

        self.backend.set(&url_key(id), long_url).await?;
        info!("Link created: {} -> {}", id, long_url);
        Ok(())
    }

    pub async fn resolve(&self, id: &str) -> Result<String> {
        match self.backend.get(&url_key(id)).await? {
            Some(long_url) => {
                trace!("Resolved {} -> {}", id, long_url);
                Ok(long_url)
            }
            None => Err(LinkError::not_found(format!("Short link not found: {}", id))),
        }
    }

    /// 原子自增 `link:<id>:views`，返回自增后的值
    ///
    /// Does not check that the url key exists.
    pub async fn record_hit(&self, id: &str) -> Result<u64> {
        let views = self.backend.incr(&views_key(id)).await?;
        trace!("Recorded hit for {}: {}", id, views);
        Ok(views.max(0) as u64)
    }

    /// Missing counters read as zero.
    pub async fn view_count(&self, id: &str) -> Result<u64> {
        match self.backend.get(&views_key(id)).await? {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                LinkError::backend(format!(
                    "View counter for '{}' is not a non-negative integer: {}",
                    id, raw
                ))
            }),
            None => Ok(0),
        }
    }

    /// Lists every link in backend enumeration order.
    ///
    /// One extra round trip per link for the counter. Counters without a url
    /// key are never listed.
    pub async fn list_all(&self) -> Result<Vec<Link>> {
        let keys = self.backend.keys(URL_KEY_PATTERN).await?;
        let mut links = Vec::with_capacity(keys.len());

        for key in keys {
            let Some(id) = id_from_url_key(&key) else {
                continue;
            };

            let long_url = match self.resolve(id).await {
                Ok(url) => url,
                Err(LinkError::NotFound(_)) => {
                    debug!("Link {} vanished during listing, skipping", id);
                    continue;
                }
                Err(e) => return Err(e),
            };
            let views = self.view_count(id).await?;

            links.push(Link {
                short_id: id.to_string(),
                long_url,
                views,
            });
        }

        Ok(links)
    }
}
