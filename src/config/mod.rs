//! Process configuration.
//!
//! Values come from, in increasing priority:
//! 1. built-in defaults,
//! 2. a TOML file (`--config <path>`, or `~/.config/sitewatch/config.toml` if present),
//! 3. environment variables (a `.env` file is loaded into the environment by `main`).
//!
//! Missing fields in the file fall back to defaults. Required mail credentials are
//! only enforced for the long-running `serve` mode.

pub mod interval;

pub use interval::{format_interval, parse_interval};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::notifier::smtp::SmtpSettings;

pub const DEFAULT_TARGET_URL: &str = "https://www.stwdo.de/wohnen/aktuelle-wohnangebote";
pub const DEFAULT_PORT: u16 = 3000;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub target_url: String,
    pub port: u16,
    pub check_interval: String,
    pub ping_interval: String,
    pub request_timeout: String,
    pub companion_url: Option<String>,
    pub mail: MailConfig,
}

/// Outbound mail account and recipient.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Defaults to `username` when unset.
    pub recipient: Option<String>,
    pub sender_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            port: DEFAULT_PORT,
            check_interval: "5m".to_string(),
            ping_interval: "2m".to_string(),
            request_timeout: "10s".to_string(),
            companion_url: None,
            mail: MailConfig::default(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 465,
            username: None,
            password: None,
            recipient: None,
            sender_name: "Tracker Bot".to_string(),
        }
    }
}

impl Config {
    /// Load defaults, then the config file, then the process environment.
    ///
    /// An explicit `path` must exist; the default path is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Get the default config file path: `~/.config/sitewatch/config.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sitewatch").join("config.toml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Overlay environment variables. Empty values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("TARGET_URL") {
            self.target_url = v;
        }
        if let Some(v) = get("PORT") {
            self.port = parse_port("PORT", &v)?;
        }
        if let Some(v) = get("CHECK_INTERVAL") {
            self.check_interval = v;
        }
        if let Some(v) = get("PING_INTERVAL") {
            self.ping_interval = v;
        }
        if let Some(v) = get("REQUEST_TIMEOUT") {
            self.request_timeout = v;
        }
        if let Some(v) = get("COMPANION_URL") {
            self.companion_url = Some(v);
        }
        if let Some(v) = get("SMTP_HOST") {
            self.mail.smtp_host = v;
        }
        if let Some(v) = get("SMTP_PORT") {
            self.mail.smtp_port = parse_port("SMTP_PORT", &v)?;
        }
        if let Some(v) = get("EMAIL_USER") {
            self.mail.username = Some(v);
        }
        if let Some(v) = get("EMAIL_PASS") {
            self.mail.password = Some(v);
        }
        if let Some(v) = get("NOTIFY_RECIPIENT") {
            self.mail.recipient = Some(v);
        }
        if let Some(v) = get("EMAIL_SENDER_NAME") {
            self.mail.sender_name = v;
        }

        Ok(())
    }

    pub fn target_url(&self) -> Result<Url, ConfigError> {
        parse_url("target_url", &self.target_url)
    }

    pub fn companion_url(&self) -> Result<Option<Url>, ConfigError> {
        self.companion_url
            .as_deref()
            .map(|v| parse_url("companion_url", v))
            .transpose()
    }

    pub fn check_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration("check_interval", &self.check_interval)
    }

    pub fn ping_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration("ping_interval", &self.ping_interval)
    }

    pub fn request_timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("request_timeout", &self.request_timeout)
    }

    /// Where change notices go: the configured recipient, else the sending account.
    pub fn recipient(&self) -> Option<&str> {
        self.mail
            .recipient
            .as_deref()
            .or(self.mail.username.as_deref())
    }

    pub fn smtp_settings(&self) -> Result<SmtpSettings, ConfigError> {
        let username = self
            .mail
            .username
            .clone()
            .ok_or(ConfigError::Missing { key: "EMAIL_USER" })?;
        let password = self
            .mail
            .password
            .clone()
            .ok_or(ConfigError::Missing { key: "EMAIL_PASS" })?;

        Ok(SmtpSettings {
            host: self.mail.smtp_host.clone(),
            port: self.mail.smtp_port,
            username,
            password,
            sender_name: self.mail.sender_name.clone(),
        })
    }

    /// Check every value up front so the process never starts half-configured.
    pub fn validate(&self, require_mail: bool) -> Result<(), ConfigError> {
        self.target_url()?;
        self.companion_url()?;
        self.check_interval()?;
        self.ping_interval()?;
        self.request_timeout()?;

        if require_mail {
            self.smtp_settings()?;
        }
        Ok(())
    }
}

fn parse_port(key: &'static str, value: &str) -> Result<u16, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: "expected a port number".to_string(),
    })
}

fn parse_url(key: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
            reason: format!("unsupported scheme {}", other),
        }),
    }
}

fn parse_duration(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    parse_interval(value).map_err(|reason| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason,
    })
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing required setting {key}")]
    Missing { key: &'static str },

    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
