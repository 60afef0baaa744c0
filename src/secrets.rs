// secrets
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

const DEFAULT_PORT: &str = "8080";
const DEFAULT_REAL_IP: &str = "116.25.146.177";
const DEFAULT_LEVEL: &str = "exhigh";
const DEFAULT_MUSIC_API: &str = "https://example.com";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("NETEASE_COOKIE is required in environment variables or .env file")]
    MissingCookie,
    #[error("UPSTREAM_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

/// Runtime settings for the relay. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub listen_port: String,
    pub upstream_base_url: String,
    pub default_level: String,
    pub default_client_ip: String,
    pub auth_cookie: String,
    pub upstream_timeout: Duration,
}

impl RelayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves every setting through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let auth_cookie = get("NETEASE_COOKIE").ok_or(ConfigError::MissingCookie)?;

        let upstream_timeout = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let config = RelayConfig {
            listen_port: or_default("PORT", DEFAULT_PORT),
            upstream_base_url: or_default("NETEASE_MUSIC_API", DEFAULT_MUSIC_API),
            default_level: or_default("LEVEL", DEFAULT_LEVEL),
            default_client_ip: or_default("REAL_IP", DEFAULT_REAL_IP),
            auth_cookie,
            upstream_timeout,
        };

        // Log which settings came from the environment (NOT their values!)
        let configured: Vec<&str> = [
            "PORT",
            "NETEASE_COOKIE",
            "REAL_IP",
            "LEVEL",
            "NETEASE_MUSIC_API",
            "UPSTREAM_TIMEOUT_SECS",
        ]
        .into_iter()
        .filter(|key| get(*key).is_some())
        .collect();
        info!("Settings configured from environment: {:?}", configured);

        Ok(config)
    }
}

/// What to log after trying to load `.env`. A missing file is only a warning;
/// a file that exists but fails to parse reports the parse error.
pub fn dotenv_warning(result: &Result<PathBuf, dotenvy::Error>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(e) if e.not_found() => {
            Some("Warning: .env file not found, using environment variables".to_string())
        }
        Err(e) => Some(format!("Failed to load .env file: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_cookie_is_set() {
        let config = RelayConfig::from_lookup(lookup_from(&[("NETEASE_COOKIE", "MUSIC_U=abc")])).unwrap();

        assert_eq!(config.listen_port, "8080");
        assert_eq!(config.upstream_base_url, "https://example.com");
        assert_eq!(config.default_level, "exhigh");
        assert_eq!(config.default_client_ip, "116.25.146.177");
        assert_eq!(config.auth_cookie, "MUSIC_U=abc");
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = RelayConfig::from_lookup(lookup_from(&[
            ("NETEASE_COOKIE", "c"),
            ("PORT", "9090"),
            ("REAL_IP", "1.2.3.4"),
            ("LEVEL", "lossless"),
            ("NETEASE_MUSIC_API", "http://music.internal"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.listen_port, "9090");
        assert_eq!(config.default_client_ip, "1.2.3.4");
        assert_eq!(config.default_level, "lossless");
        assert_eq!(config.upstream_base_url, "http://music.internal");
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = RelayConfig::from_lookup(lookup_from(&[
            ("NETEASE_COOKIE", "c"),
            ("PORT", ""),
            ("LEVEL", ""),
        ]))
        .unwrap();

        assert_eq!(config.listen_port, "8080");
        assert_eq!(config.default_level, "exhigh");
    }

    #[test]
    fn missing_cookie_is_fatal() {
        let err = RelayConfig::from_lookup(lookup_from(&[("PORT", "9090")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingCookie);
    }

    #[test]
    fn empty_cookie_is_fatal() {
        let err = RelayConfig::from_lookup(lookup_from(&[("NETEASE_COOKIE", "")])).unwrap_err();
        assert_eq!(err, ConfigError::MissingCookie);
    }

    #[test]
    fn bad_timeout_is_rejected() {
        for raw in ["zero", "0", "-5"] {
            let err = RelayConfig::from_lookup(lookup_from(&[
                ("NETEASE_COOKIE", "c"),
                ("UPSTREAM_TIMEOUT_SECS", raw),
            ]))
            .unwrap_err();
            assert_eq!(err, ConfigError::InvalidTimeout(raw.to_string()));
        }
    }

    #[test]
    fn dotenv_outcomes() {
        assert_eq!(dotenv_warning(&Ok(PathBuf::from(".env"))), None);

        let missing = Err(dotenvy::Error::Io(std::io::Error::from(std::io::ErrorKind::NotFound)));
        assert_eq!(
            dotenv_warning(&missing).unwrap(),
            "Warning: .env file not found, using environment variables"
        );

        let broken = Err(dotenvy::Error::LineParse("NETEASE_COOKIE 'abc".to_string(), 15));
        let message = dotenv_warning(&broken).unwrap();
        assert!(message.starts_with("Failed to load .env file: "), "{message}");
        assert!(!message.contains("not found"), "{message}");
    }
}
