//! Central module for application-wide configuration settings.
//!
//! Configuration comes from environment variables and is validated once at
//! startup. Missing required values fail fast with a clear error.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default cookie lifetime: seven days.
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

pub const DEFAULT_PROTECTED_PATHS: &[&str] = &["/dashboard", "/profile", "/settings", "/admin"];

pub const DEFAULT_ADMIN_ROLE: &str = "admin";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" | "" => Ok(Self::Development),
            other => Err(ConfigError::Invalid {
                key: "APP_ENV",
                reason: format!("unknown environment '{other}'"),
            }),
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => f.write_str("development"),
            Self::Production => f.write_str("production"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Attributes shared by every session cookie this server writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieSettings {
    pub secure: bool,
    pub max_age_secs: i64,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub upstream_url: String,
    pub upstream_timeout: Option<Duration>,
    pub app_env: AppEnvironment,
    pub log_filter: String,
    pub log_format: LogFormat,
    pub session_max_age_secs: i64,
    /// `None` turns off role gating of admin paths.
    pub admin_role: Option<String>,
    pub protected_paths: Vec<String>,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup, so tests never touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream_url = lookup("AUTH_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("AUTH_API_URL"))?;
        if !(upstream_url.starts_with("http://") || upstream_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "AUTH_API_URL",
                reason: "must start with http:// or https://".to_string(),
            });
        }

        let host = match lookup("SSOGATE_HOST") {
            Some(v) => v.parse().map_err(|_| ConfigError::Invalid {
                key: "SSOGATE_HOST",
                reason: format!("'{v}' is not an IP address"),
            })?,
            None => IpAddr::from([127, 0, 0, 1]),
        };

        let port = parse_or("SSOGATE_PORT", lookup("SSOGATE_PORT"), 3000u16)?;

        let upstream_timeout = match lookup("UPSTREAM_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(parse_or(
                "UPSTREAM_TIMEOUT_SECS",
                Some(v),
                0u64,
            )?)),
            None => None,
        };

        let app_env = AppEnvironment::parse(&lookup("APP_ENV").unwrap_or_default())?;

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    reason: format!("expected 'json' or 'pretty', got '{other}'"),
                })
            }
        };

        let session_max_age_secs = parse_or(
            "SESSION_MAX_AGE_SECS",
            lookup("SESSION_MAX_AGE_SECS"),
            DEFAULT_SESSION_MAX_AGE_SECS,
        )?;
        if session_max_age_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "SESSION_MAX_AGE_SECS",
                reason: "must be positive".to_string(),
            });
        }

        let admin_role = match lookup("ADMIN_ROLE") {
            Some(v) if v.trim().is_empty() => None,
            Some(v) => Some(v.trim().to_string()),
            None => Some(DEFAULT_ADMIN_ROLE.to_string()),
        };

        let protected_paths = match lookup("PROTECTED_PATHS") {
            Some(v) => parse_paths(&v)?,
            None => DEFAULT_PROTECTED_PATHS.iter().map(|p| p.to_string()).collect(),
        };

        Ok(Self {
            host,
            port,
            upstream_url,
            upstream_timeout,
            app_env,
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            log_format,
            session_max_age_secs,
            admin_role,
            protected_paths,
            static_dir: lookup("STATIC_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn cookie_settings(&self) -> CookieSettings {
        CookieSettings {
            secure: self.app_env.is_production(),
            max_age_secs: self.session_max_age_secs,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            reason: format!("'{v}' is not a valid number"),
        }),
        None => Ok(default),
    }
}

fn parse_paths(value: &str) -> Result<Vec<String>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.starts_with('/') {
                Ok(p.trim_end_matches('/').to_string())
            } else {
                Err(ConfigError::Invalid {
                    key: "PROTECTED_PATHS",
                    reason: format!("'{p}' must start with '/'"),
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_with_only_upstream() {
        let config = config_from(&[("AUTH_API_URL", "http://idp.local")]).unwrap();
        assert_eq!(config.addr(), "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.app_env, AppEnvironment::Development);
        assert_eq!(config.session_max_age_secs, 604_800);
        assert_eq!(config.admin_role.as_deref(), Some("admin"));
        assert_eq!(
            config.protected_paths,
            vec!["/dashboard", "/profile", "/settings", "/admin"]
        );
        assert_eq!(config.upstream_timeout, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert!(config.static_dir.is_none());
        assert!(!config.cookie_settings().secure);
    }

    #[test]
    fn missing_upstream_fails() {
        assert_eq!(
            config_from(&[]).unwrap_err(),
            ConfigError::Missing("AUTH_API_URL")
        );
        assert!(matches!(
            config_from(&[("AUTH_API_URL", "idp.local")]),
            Err(ConfigError::Invalid { key: "AUTH_API_URL", .. })
        ));
    }

    #[test]
    fn production_turns_on_secure_cookies() {
        let config = config_from(&[
            ("AUTH_API_URL", "https://idp.example.com"),
            ("APP_ENV", "production"),
            ("SESSION_MAX_AGE_SECS", "3600"),
        ])
        .unwrap();
        assert_eq!(
            config.cookie_settings(),
            CookieSettings {
                secure: true,
                max_age_secs: 3600
            }
        );
    }

    #[test]
    fn empty_admin_role_disables_gating() {
        let config = config_from(&[("AUTH_API_URL", "http://idp"), ("ADMIN_ROLE", " ")]).unwrap();
        assert_eq!(config.admin_role, None);
    }

    #[test]
    fn protected_paths_are_parsed() {
        let config = config_from(&[
            ("AUTH_API_URL", "http://idp"),
            ("PROTECTED_PATHS", "/dashboard/, /account ,"),
        ])
        .unwrap();
        assert_eq!(config.protected_paths, vec!["/dashboard", "/account"]);

        assert!(matches!(
            config_from(&[("AUTH_API_URL", "http://idp"), ("PROTECTED_PATHS", "dashboard")]),
            Err(ConfigError::Invalid { key: "PROTECTED_PATHS", .. })
        ));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(matches!(
            config_from(&[("AUTH_API_URL", "http://idp"), ("SSOGATE_PORT", "http")]),
            Err(ConfigError::Invalid { key: "SSOGATE_PORT", .. })
        ));
        assert!(matches!(
            config_from(&[("AUTH_API_URL", "http://idp"), ("SESSION_MAX_AGE_SECS", "0")]),
            Err(ConfigError::Invalid { key: "SESSION_MAX_AGE_SECS", .. })
        ));
        let config = config_from(&[
            ("AUTH_API_URL", "http://idp"),
            ("UPSTREAM_TIMEOUT_SECS", "15"),
        ])
        .unwrap();
        assert_eq!(config.upstream_timeout, Some(Duration::from_secs(15)));
    }
}
