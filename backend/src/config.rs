//! Runtime configuration, read once from the environment at startup.
//!
//! Every key is optional and falls back to a local-development default, so
//! `cargo run -p backend` works without any setup. A key that is present but
//! unparsable is a startup error rather than a silent default.

use std::env;
use std::path::PathBuf;

const ENV_PREFIX: &str = "REVIEWZONE_";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database holding products, surveys and issued short codes.
    pub db_path: PathBuf,
    /// Root directory of the object store; one subdirectory per bucket.
    pub storage_dir: PathBuf,
    /// Base of the public URLs handed out for stored objects.
    pub public_storage_url: String,
    /// Hard cap on the raw size of an uploaded logo part.
    pub max_upload_bytes: usize,
    pub open_browser: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Builds the configuration from an arbitrary key lookup (keys without prefix).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", 8080u16)?;
        let db_path = lookup("DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("reviewzone.sqlite"));
        let storage_dir = lookup("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("storage"));
        let public_storage_url = lookup("PUBLIC_STORAGE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://{}:{}/storage", host, port));
        let max_upload_bytes = parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024usize)?;
        let open_browser = parse_or(&lookup, "OPEN_BROWSER", false)?;

        Ok(Self {
            host,
            port,
            db_path,
            storage_dir,
            public_storage_url,
            max_upload_bytes,
            open_browser,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("invalid {}{}={:?}: {}", ENV_PREFIX, key, raw, e)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.public_storage_url, "http://127.0.0.1:8080/storage");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(!config.open_browser);
    }

    #[test]
    fn public_url_follows_host_and_port_unless_overridden() {
        let config = config_from(&[("HOST", "0.0.0.0"), ("PORT", "9000")]).unwrap();
        assert_eq!(config.public_storage_url, "http://0.0.0.0:9000/storage");

        let config = config_from(&[("PUBLIC_STORAGE_URL", "https://cdn.reviewzone.ai/")]).unwrap();
        assert_eq!(config.public_storage_url, "https://cdn.reviewzone.ai");
    }

    #[test]
    fn unparsable_values_are_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.contains("REVIEWZONE_PORT"));
        assert!(config_from(&[("OPEN_BROWSER", "maybe")]).is_err());
    }
}
