//! Application configuration loaded from environment variables.

use serde::{Deserialize, Deserializer};

/// Port used when `PORT` is unset or not a valid port number.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment name used when `NODE_ENV` is unset.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP listening port.
    #[serde(default = "default_port", deserialize_with = "lenient_port")]
    pub port: u16,

    // === Reporting ===
    /// Environment name, display only (read from `NODE_ENV`).
    #[serde(rename = "node_env", default = "default_environment")]
    pub environment: String,

    /// Version reported by `/health` (read from `APP_VERSION`).
    #[serde(rename = "app_version", default = "default_version")]
    pub version: String,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_environment() -> String {
    DEFAULT_ENVIRONMENT.to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Accept any string for `PORT`, falling back to the default when it does not parse.
fn lenient_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().parse().unwrap_or(DEFAULT_PORT))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            environment: default_environment(),
            version: default_version(),
            rust_log: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env::<Self>().map(Self::with_fallbacks)
    }

    /// Build configuration from explicit key/value pairs instead of the process environment.
    pub fn from_iter<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Self>(vars).map(Self::with_fallbacks)
    }

    /// Treat empty values the same as unset ones.
    fn with_fallbacks(mut self) -> Self {
        if self.environment.trim().is_empty() {
            self.environment = default_environment();
        }
        if self.version.trim().is_empty() {
            self.version = default_version();
        }
        if self.rust_log.trim().is_empty() {
            self.rust_log = default_log_level();
        }
        self
    }
}
