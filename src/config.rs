use chrono::FixedOffset;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "NEXT_STOP_CONFIG";

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub time: TimeSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON file with the stop catalog; the built-in sample set when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeSettings {
    /// Offset applied to timestamps that carry none
    #[serde(default)]
    pub default_utc_offset_minutes: i32,
}

impl TimeSettings {
    /// The default offset, or `None` when it is out of range
    pub fn default_offset(&self) -> Option<FixedOffset> {
        FixedOffset::east_opt(self.default_utc_offset_minutes.checked_mul(60)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

/// Output shape of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LogFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" => Some(LogFormat::Pretty),
            "compact" | "text" => Some(LogFormat::Compact),
            _ => None,
        }
    }
}

impl LoggingSettings {
    /// The configured format; unknown names fall back to compact text
    pub fn log_format(&self) -> LogFormat {
        LogFormat::parse(&self.format).unwrap_or(LogFormat::Compact)
    }
}

impl Settings {
    /// Load configuration, honouring `NEXT_STOP_CONFIG` as an explicit file path
    pub fn load_default_or_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load_from(path.trim()),
            _ => Self::load(),
        }
    }

    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with NEXT_STOP)
    /// 4. `PORT`, for hosts that only hand out a port
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., NEXT_STOP__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("NEXT_STOP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_port_override(settings, std::env::var("PORT").ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    ///
    /// The file must exist; environment variables and `PORT` still apply on top.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("NEXT_STOP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_port_override(settings, std::env::var("PORT").ok())?;

        settings.try_deserialize()
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.time.default_offset().is_none() {
            return Err(ConfigError::Message(format!(
                "time.default_utc_offset_minutes out of range: {}",
                self.time.default_utc_offset_minutes
            )));
        }
        if LogFormat::parse(&self.logging.format).is_none() {
            return Err(ConfigError::Message(format!(
                "logging.format must be json, pretty or compact, got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}

/// Let a bare `PORT` variable win over every other source
fn apply_port_override(settings: Config, port: Option<String>) -> Result<Config, ConfigError> {
    let Some(port) = port else {
        return Ok(settings);
    };

    let port: u16 = port
        .trim()
        .parse()
        .map_err(|e| ConfigError::Message(format!("invalid PORT {:?}: {}", port, e)))?;

    Config::builder()
        .add_source(settings)
        .set_override("server.port", i64::from(port))?
        .build()
}
