use async_trait::async_trait;
use dashmap::DashMap;
use tracing::trace;

use super::KvBackend;
use crate::errors::{LinkError, Result};

/// 进程内后端，用于本地开发和测试
#[derive(Default)]
pub struct MemoryBackend {
    data: DashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.data.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        // entry 持有分片写锁，读-改-写在锁内完成
        let mut entry = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| "0".to_string());

        let next = entry
            .parse::<i64>()
            .ok()
            .and_then(|current| current.checked_add(1))
            .ok_or_else(|| LinkError::backend("ERR value is not an integer or out of range"))?;

        *entry = next.to_string();
        trace!("INCR {} -> {}", key, next);
        Ok(next)
    }

    async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        Ok(self
            .data
            .iter()
            .filter(|entry| glob_match(pattern, entry.key()))
            .map(|entry| entry.key().clone())
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

/// Redis-style glob matching supporting `*` and `?`.
fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();

    let (mut pi, mut ti) = (0, 0);
    let mut star: Option<usize> = None;
    let mut mark = 0;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '?' || p[pi] == t[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some(pi);
            mark = ti;
            pi += 1;
        } else if let Some(s) = star {
            pi = s + 1;
            mark += 1;
            ti = mark;
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_match() {
        assert!(glob_match("link:*:url", "link:abc:url"));
        assert!(glob_match("link:*:url", "link:a:b:url"));
        assert!(glob_match("link:*:url", "link::url"));
        assert!(!glob_match("link:*:url", "link:abc:views"));
        assert!(!glob_match("link:*:url", "xlink:abc:url"));
        assert!(glob_match("a?c", "abc"));
        assert!(!glob_match("a?c", "ac"));
        assert!(glob_match("*", ""));
    }

    #[tokio::test]
    async fn test_incr_creates_at_one() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.incr("counter").await.unwrap(), 1);
        assert_eq!(backend.incr("counter").await.unwrap(), 2);
        assert_eq!(backend.get("counter").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn test_incr_on_non_integer_fails_without_mutation() {
        let backend = MemoryBackend::new();
        backend.set("k", "hello").await.unwrap();

        let err = backend.incr("k").await.unwrap_err();
        assert!(matches!(err, LinkError::Backend(_)));
        assert_eq!(backend.get("k").await.unwrap().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_keys_filters_by_pattern() {
        let backend = MemoryBackend::new();
        backend.set("link:a:url", "x").await.unwrap();
        backend.set("link:a:views", "1").await.unwrap();
        backend.set("link:b:url", "y").await.unwrap();

        let mut keys = backend.keys("link:*:url").await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["link:a:url", "link:b:url"]);
    }
}
