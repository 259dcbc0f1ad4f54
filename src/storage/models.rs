/// 所有短链键的公共前缀
pub const KEY_PREFIX: &str = "link:";
const URL_SUFFIX: &str = ":url";
const VIEWS_SUFFIX: &str = ":views";

/// 枚举全部短链时使用的匹配模式
pub const URL_KEY_PATTERN: &str = "link:*:url";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub short_id: String,
    pub long_url: String,
    pub views: u64,
}

/// `link:<id>:url`
pub fn url_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}{URL_SUFFIX}")
}

/// `link:<id>:views`
pub fn views_key(id: &str) -> String {
    format!("{KEY_PREFIX}{id}{VIEWS_SUFFIX}")
}

/// Recovers the id from a url key. Ids may themselves contain `:`.
pub fn id_from_url_key(key: &str) -> Option<&str> {
    key.strip_prefix(KEY_PREFIX)?.strip_suffix(URL_SUFFIX)
}
