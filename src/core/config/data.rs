use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8787";
pub const ENDPOINT_ENV_VAR: &str = "ROLECHAT_ENDPOINT";
/// Lines the reader may sit above the bottom before auto-follow stops.
pub const DEFAULT_SCROLL_THRESHOLD: u16 = 3;
pub const DEFAULT_GRID_COLUMNS: u16 = 3;

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Inference endpoint each turn is POSTed to
    pub endpoint: Option<String>,
    /// TOML catalog file; the built-in personas are used when unset
    pub catalog: Option<PathBuf>,
    /// Distance from the bottom, in lines, that still counts as "following"
    pub scroll_threshold: Option<u16>,
    /// Per-request timeout; the transport default applies when unset
    pub request_timeout_secs: Option<u64>,
    /// Cards per row in the catalog grid
    pub grid_columns: Option<u16>,
}

/// Errors from `rolechat set` / `rolechat unset`.
#[derive(Debug, PartialEq, Eq)]
pub enum SettingError {
    UnknownKey(String),
    InvalidNumber { key: &'static str, input: String },
    MissingValue { key: &'static str, example: &'static str },
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => write!(f, "Unknown config key: {key}"),
            SettingError::InvalidNumber { key, input } => {
                write!(f, "Invalid value for {key}: '{input}' is not a positive number")
            }
            SettingError::MissingValue { key, example } => {
                write!(f, "Missing value for {key}. Example: {example}")
            }
        }
    }
}

impl std::error::Error for SettingError {}

impl Config {
    /// Endpoint precedence: explicit override, then `ROLECHAT_ENDPOINT`, then
    /// the config file, then [`DEFAULT_ENDPOINT`].
    pub fn resolve_endpoint(&self, cli_override: Option<&str>) -> String {
        let env_value = std::env::var(ENDPOINT_ENV_VAR).ok();
        Self::pick_endpoint(cli_override, env_value.as_deref(), self.endpoint.as_deref())
    }

    fn pick_endpoint(
        cli_override: Option<&str>,
        env_value: Option<&str>,
        configured: Option<&str>,
    ) -> String {
        [cli_override, env_value, configured]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
            .to_string()
    }

    pub fn scroll_threshold(&self) -> u16 {
        self.scroll_threshold.unwrap_or(DEFAULT_SCROLL_THRESHOLD)
    }

    pub fn grid_columns(&self) -> u16 {
        self.grid_columns.unwrap_or(DEFAULT_GRID_COLUMNS).max(1)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), SettingError> {
        let value = value.trim();
        match key {
            "endpoint" => {
                if value.is_empty() {
                    return Err(SettingError::MissingValue {
                        key: "endpoint",
                        example: "rolechat set endpoint http://127.0.0.1:8787",
                    });
                }
                self.endpoint = Some(value.to_string());
            }
            "catalog" => {
                if value.is_empty() {
                    return Err(SettingError::MissingValue {
                        key: "catalog",
                        example: "rolechat set catalog ~/characters.toml",
                    });
                }
                self.catalog = Some(PathBuf::from(value));
            }
            "scroll-threshold" => {
                self.scroll_threshold = Some(parse_number("scroll-threshold", value)?);
            }
            "request-timeout" => {
                self.request_timeout_secs = Some(parse_number("request-timeout", value)?);
            }
            "grid-columns" => {
                let columns: u16 = parse_number("grid-columns", value)?;
                if columns == 0 {
                    return Err(SettingError::InvalidNumber {
                        key: "grid-columns",
                        input: value.to_string(),
                    });
                }
                self.grid_columns = Some(columns);
            }
            other => return Err(SettingError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: &str) -> Result<(), SettingError> {
        match key {
            "endpoint" => self.endpoint = None,
            "catalog" => self.catalog = None,
            "scroll-threshold" => self.scroll_threshold = None,
            "request-timeout" => self.request_timeout_secs = None,
            "grid-columns" => self.grid_columns = None,
            other => return Err(SettingError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, SettingError> {
    value.parse().map_err(|_| SettingError::InvalidNumber {
        key,
        input: value.to_string(),
    })
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
