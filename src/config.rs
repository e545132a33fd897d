// src/config.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::sort::{SortDirection, SortKey, SortOrder};
use crate::domain::tree::PathTermination;
use crate::infrastructure::repositories::http_source::DEFAULT_TIMEOUT_MS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace, warn};

pub const ENV_SOURCE: &str = "BMTREE_SOURCE";
pub const ENV_SORT: &str = "BMTREE_SORT";
pub const ENV_HTTP_TIMEOUT_MS: &str = "BMTREE_HTTP_TIMEOUT_MS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DisplayOpts {
    /// Default listing order (`name`, `date` or `type`)
    #[serde(default)]
    pub sort_by: SortKey,

    #[serde(default)]
    pub order: SortDirection,

    /// Print urls next to link names in listings
    #[serde(default)]
    pub show_urls: bool,
}

impl DisplayOpts {
    pub fn sort_order(&self) -> SortOrder {
        SortOrder::new(self.sort_by, self.order)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Local JSON file or `http(s)://` URL. Unset: built-in sample data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default = "default_http_timeout_ms")]
    pub http_timeout_ms: u64,

    /// Where breadcrumbs stop: `primary` (parent "0" only) or `any` ("0" or "1")
    #[serde(default)]
    pub path_termination: PathTermination,

    #[serde(default)]
    pub display: DisplayOpts,
}

fn default_http_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: None,
            http_timeout_ms: default_http_timeout_ms(),
            path_termination: PathTermination::default(),
            display: DisplayOpts::default(),
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config/bmtree/config.toml"))
}

/// Settings from the config file (explicit path or `~/.config/bmtree/config.toml`),
/// then environment overrides.
///
/// An explicitly given file must exist and parse; the default file is optional.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => read_config_file(path)?,
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => read_config_file(&path).unwrap_or_else(|e| {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Settings::default()
            }),
            None => Settings::default(),
        },
    };

    apply_env_overrides(&mut settings)?;

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    debug!("Loading config from: {:?}", path);
    let text = std::fs::read_to_string(path)
        .map_err(|e| DomainError::from(e).context(format!("reading {}", path.display())))?;
    toml::from_str::<Settings>(&text).map_err(|e| {
        DomainError::InvalidInput(format!("config file {}: {}", path.display(), e))
    })
}

fn apply_env_overrides(settings: &mut Settings) -> DomainResult<()> {
    if let Ok(source) = std::env::var(ENV_SOURCE) {
        trace!("Using {} from environment: {}", ENV_SOURCE, source);
        settings.source = Some(source).filter(|s| !s.trim().is_empty());
    }

    if let Ok(sort) = std::env::var(ENV_SORT) {
        trace!("Using {} from environment: {}", ENV_SORT, sort);
        let order: SortOrder = sort.parse().map_err(|e: DomainError| e.context(ENV_SORT))?;
        settings.display.sort_by = order.key;
        settings.display.order = order.direction;
    }

    if let Ok(timeout) = std::env::var(ENV_HTTP_TIMEOUT_MS) {
        trace!("Using {} from environment: {}", ENV_HTTP_TIMEOUT_MS, timeout);
        settings.http_timeout_ms = timeout.trim().parse().map_err(|_| {
            DomainError::InvalidInput(format!(
                "{}: expected milliseconds, got '{}'",
                ENV_HTTP_TIMEOUT_MS, timeout
            ))
        })?;
    }
    Ok(())
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
