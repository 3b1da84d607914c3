//! Server configuration file.
//!
//! ```toml
//! [storage]
//! data_dir = "/var/lib/pictweet"
//!
//! [session]
//! secret = "change-me"
//! expire_secs = 604800
//! secure_cookie = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory holding named contexts (`<name>.toml`).
pub const CONFIG_DIR: &str = "/etc/pictweet";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the SQLite database.
    pub data_dir: String,

    /// Explicit database file; defaults to `{data_dir}/data.sqlite`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sqlite_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// HS256 signing secret for session tokens.
    pub secret: String,

    /// Session lifetime in seconds.
    #[serde(default = "default_expire_secs")]
    pub expire_secs: i64,

    /// Mark the session cookie `Secure` (serve over HTTPS only).
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_expire_secs() -> i64 {
    604800
}

impl ServerConfig {
    /// Resolve `-c` to a file: a bare context name maps to
    /// `/etc/pictweet/<name>.toml`, anything path-like is used as is.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.ends_with(".toml") {
            PathBuf::from(name_or_path)
        } else {
            Path::new(CONFIG_DIR).join(format!("{}.toml", name_or_path))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            ServerConfig::resolve_path("prod"),
            PathBuf::from("/etc/pictweet/prod.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("./local.toml"),
            PathBuf::from("./local.toml")
        );
        assert_eq!(
            ServerConfig::resolve_path("dev.toml"),
            PathBuf::from("dev.toml")
        );
    }

    #[test]
    fn test_parse_with_defaults() {
        let config = ServerConfig::parse(
            r#"
            [storage]
            data_dir = "/tmp/pictweet"

            [session]
            secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.data_dir, "/tmp/pictweet");
        assert!(config.storage.sqlite_path.is_none());
        assert_eq!(config.session.expire_secs, 604800);
        assert!(!config.session.secure_cookie);
    }

    #[test]
    fn test_parse_missing_section_fails() {
        assert!(ServerConfig::parse("[storage]\ndata_dir = \"/tmp\"\n").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/data\"\nsqlite_path = \"/db/p.sqlite\"\n\n[session]\nsecret = \"x\"\nexpire_secs = 60\n",
        )
        .unwrap();

        let config = ServerConfig::load(&path).unwrap();
        assert_eq!(config.storage.sqlite_path.as_deref(), Some("/db/p.sqlite"));
        assert_eq!(config.session.expire_secs, 60);

        assert!(ServerConfig::load(&dir.path().join("missing.toml")).is_err());
    }
}
