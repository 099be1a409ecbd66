use serde::Deserialize;
use std::env;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Per-controller settings
///
/// Deserializable so hosts can embed it in their own configuration files,
/// or read from the environment with [`ControllerConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Where [`GenericController::mount`](crate::GenericController::mount) nests the routes
    pub path: String,
    /// Field the bulk lookup filters on, when it differs from the record's id field
    pub id_field_name: Option<String>,
    /// Page size when a listing request omits `limit`
    pub default_limit: usize,
    /// Upper bound for a requested `limit`
    pub max_limit: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            id_field_name: None,
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl ControllerConfig {
    pub fn new(path: impl Into<String>) -> Self {
        Self::default().with_path(path)
    }

    /// Load from `{PREFIX}_PATH`, `{PREFIX}_ID_FIELD_NAME`, `{PREFIX}_DEFAULT_LIMIT`
    /// and `{PREFIX}_MAX_LIMIT`, falling back to the defaults for unset keys.
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = var(prefix, "PATH") {
            config.path = path;
        }
        if let Some(name) = var(prefix, "ID_FIELD_NAME") {
            config.id_field_name = Some(name);
        }
        if let Some(limit) = parse_var(prefix, "DEFAULT_LIMIT")? {
            config.default_limit = limit;
        }
        if let Some(limit) = parse_var(prefix, "MAX_LIMIT")? {
            config.max_limit = limit;
        }
        Ok(config)
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_id_field_name(mut self, name: impl Into<String>) -> Self {
        self.id_field_name = Some(name.into());
        self
    }

    pub fn with_limits(mut self, default_limit: usize, max_limit: usize) -> Self {
        self.default_limit = default_limit;
        self.max_limit = max_limit;
        self
    }

    /// `path` as a nest target: one leading slash, no trailing one
    ///
    /// An empty result means the routes sit at the router's root.
    pub fn mount_path(&self) -> String {
        let trimmed = self.path.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        }
    }

    /// The page size to use for a requested limit
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

fn var(prefix: &str, key: &str) -> Option<String> {
    env::var(format!("{prefix}_{key}")).ok()
}

fn parse_var<T: FromStr>(prefix: &str, key: &str) -> Result<Option<T>, ConfigError> {
    match var(prefix, key) {
        Some(value) => value.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
            key: format!("{prefix}_{key}"),
            value,
        }),
        None => Ok(None),
    }
}
