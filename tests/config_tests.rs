//! Configuration loading tests
//!
//! File, environment and flag layering. Every test that loads configuration
//! holds `ENV_LOCK`, since the process environment is shared between tests.

use clap::Parser;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;

use redlink::api::services::LinkSettings;
use redlink::config::{Args, StaticConfig};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Sets `REDLINK__*` variables for the lifetime of the guard.
struct EnvVars {
    keys: Vec<&'static str>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVars {
    fn set(vars: &[(&'static str, &str)]) -> Self {
        let lock = env_lock();
        for (key, value) in vars {
            // SAFETY: ENV_LOCK serializes every environment access in this binary
            unsafe { std::env::set_var(key, value) };
        }
        Self {
            keys: vars.iter().map(|(key, _)| *key).collect(),
            _lock: lock,
        }
    }
}

impl Drop for EnvVars {
    fn drop(&mut self) {
        for key in &self.keys {
            // SAFETY: still holding ENV_LOCK
            unsafe { std::env::remove_var(key) };
        }
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp config");
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_missing_file_uses_defaults() {
    let _env = env_lock();
    let config = StaticConfig::load(Some("definitely-not-here.toml")).unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.base_url, "http://localhost/");
    assert_eq!(config.backend.redis.address, "localhost:6379");
}

#[test]
fn test_load_from_file() {
    let _env = env_lock();
    let file = write_config(
        r#"
[server]
host = "0.0.0.0"
port = 9090
base_url = "https://sho.rt/"

[backend]
type = "memory"

[auth]
auth_code = "from-file"

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = StaticConfig::load(file.path().to_str()).unwrap();

    assert_eq!(config.bind_address(), "0.0.0.0:9090");
    assert_eq!(config.server.base_url, "https://sho.rt/");
    assert_eq!(config.backend.backend_type, "memory");
    assert_eq!(config.auth.auth_code, "from-file");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
    // 未配置的字段使用默认值
    assert_eq!(config.backend.redis.address, "localhost:6379");
}

#[test]
fn test_invalid_file_is_an_error() {
    let _env = env_lock();
    let file = write_config("[server]\nport = \"not a number\"\n");

    assert!(StaticConfig::load(file.path().to_str()).is_err());
}

#[test]
fn test_flags_override_file() {
    let _env = env_lock();
    let file = write_config(
        r#"
[server]
port = 9090

[auth]
auth_code = "from-file"
"#,
    );

    let args = Args::parse_from([
        "redlink",
        "-c",
        file.path().to_str().unwrap(),
        "-p",
        "7000",
        "-a",
        "from-flag",
    ]);
    let mut config = StaticConfig::load(args.config.as_deref()).unwrap();
    config.apply_args(&args);

    assert_eq!(config.server.port, 7000);
    assert_eq!(config.auth.auth_code, "from-flag");
}

#[test]
fn test_link_settings_from_config() {
    let mut config = StaticConfig::default();
    config.server.base_url = "https://sho.rt/".to_string();
    config.auth.auth_code = "secret".to_string();

    let settings = LinkSettings::from_config(&config);

    assert_eq!(settings.short_url("abc"), "https://sho.rt/abc");
    assert!(settings.authorize("secret"));
}

#[test]
fn test_env_overrides_file_and_keeps_strings_verbatim() {
    let file = write_config(
        r#"
[server]
port = 9090

[auth]
auth_code = "from-file"
"#,
    );
    let _env = EnvVars::set(&[
        ("REDLINK__AUTH__AUTH_CODE", "007"),
        ("REDLINK__SERVER__PORT", "9000"),
        ("REDLINK__SERVER__BASE_URL", "True"),
    ]);

    let config = StaticConfig::load(file.path().to_str()).unwrap();

    assert_eq!(config.auth.auth_code, "007");
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.base_url, "True");

    let settings = LinkSettings::from_config(&config);
    assert!(settings.authorize("007"));
    assert!(!settings.authorize("7"));
}

#[test]
fn test_flags_override_env() {
    let _env = EnvVars::set(&[("REDLINK__AUTH__AUTH_CODE", "from-env")]);

    let args = Args::parse_from(["redlink", "-a", "from-flag"]);
    let mut config = StaticConfig::load(Some("definitely-not-here.toml")).unwrap();
    assert_eq!(config.auth.auth_code, "from-env");

    config.apply_args(&args);
    assert_eq!(config.auth.auth_code, "from-flag");
}
