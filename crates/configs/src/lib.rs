//! # configs
//! derm-centre/crates/configs/src/lib.rs
//!
//! Typed runtime settings. Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. `config/derm-centre.toml` (optional)
//! 3. `DC__SECTION__KEY` environment variables (after `.env` is loaded)

use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config/derm-centre";
pub const ENV_PREFIX: &str = "DC";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub site: SiteSettings,
    pub booking: BookingSettings,
    pub session: SessionSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`.
    pub static_dir: String,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// Absolute origin used in the sitemap and structured data.
    pub base_url: String,
}

/// Simulated front desk behaviour.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingSettings {
    pub latency_ms: u64,
    /// When set, every booking and contact submission fails.
    pub fail_submissions: bool,
}

impl BookingSettings {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
    /// Adds `Secure` to the session cookie.
    pub secure_cookie: bool,
}

impl SessionSettings {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub filter: String,
    pub format: LogFormat,
}

fn with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000)?
        .set_default("server.static_dir", "static")?
        .set_default("site.base_url", "https://drdermatology.com")?
        .set_default("booking.latency_ms", 2000)?
        .set_default("booking.fail_submissions", false)?
        .set_default("session.idle_timeout_secs", 3600)?
        .set_default("session.sweep_interval_secs", 300)?
        .set_default("session.secure_cookie", false)?
        .set_default("log.filter", "info,tower_http=debug")?
        .set_default("log.format", "pretty")
}

impl Settings {
    /// Loads `.env`, then layers the config file and environment over the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env"),
        }

        let built = with_defaults()?
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::finish(built)
    }

    /// Defaults overlaid with a TOML document. Used by tests and tooling.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let built = with_defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::finish(built)
    }

    fn finish(built: Config) -> Result<Self, ConfigError> {
        let settings: Settings = built.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.site.base_url.starts_with("http://") || self.site.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "site.base_url",
                reason: format!("`{}` is not an http(s) URL", self.site.base_url),
            });
        }
        if self.session.idle_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "session.idle_timeout_secs",
                reason: "must be greater than zero".into(),
            });
        }
        if self.session.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "session.sweep_interval_secs",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.server.bind_addr(), "127.0.0.1:3000");
        assert_eq!(settings.booking.latency(), Duration::from_secs(2));
        assert!(!settings.booking.fail_submissions);
        assert_eq!(settings.log.format, LogFormat::Pretty);
    }

    #[test]
    fn file_overrides_defaults() {
        let settings = Settings::from_toml(
            r#"
            [server]
            port = 8080

            [log]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.log.format, LogFormat::Json);
    }

    #[test]
    fn rejects_relative_base_url() {
        let err = Settings::from_toml("[site]\nbase_url = \"drdermatology.com\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "site.base_url", .. }));
    }

    #[test]
    fn rejects_zero_idle_timeout() {
        let err = Settings::from_toml("[session]\nidle_timeout_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "session.idle_timeout_secs", .. }));
    }
}
