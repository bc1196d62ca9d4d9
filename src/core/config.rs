//! Configuration management for docsift.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{DocsiftError, Result};
use crate::core::xdg::XdgDirs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const DEFAULT_NO_DATA: &str = "No Results!";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Which documents an indexing pass covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPaths", into = "RawPaths")]
pub enum PathsSetting {
    /// Discover documents from the sidebar (or the docs tree)
    Auto,
    /// Explicit document paths
    List(Vec<String>),
    /// Location of a JSON array of paths (`*.json`)
    Manifest(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPaths {
    List(Vec<String>),
    Text(String),
}

impl TryFrom<RawPaths> for PathsSetting {
    type Error = String;

    fn try_from(raw: RawPaths) -> std::result::Result<Self, Self::Error> {
        match raw {
            RawPaths::List(paths) => Ok(PathsSetting::List(paths)),
            RawPaths::Text(text) => text.parse(),
        }
    }
}

impl From<PathsSetting> for RawPaths {
    fn from(setting: PathsSetting) -> Self {
        match setting {
            PathsSetting::Auto => RawPaths::Text("auto".to_string()),
            PathsSetting::List(paths) => RawPaths::List(paths),
            PathsSetting::Manifest(location) => RawPaths::Text(location),
        }
    }
}

impl FromStr for PathsSetting {
    type Err = String;

    /// Parses `auto`, a `*.json` manifest location, or a comma-separated list
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("auto") {
            Ok(PathsSetting::Auto)
        } else if trimmed.ends_with(".json") {
            Ok(PathsSetting::Manifest(trimmed.to_string()))
        } else if trimmed.is_empty() {
            Err("paths must be \"auto\", a list, or a *.json manifest".to_string())
        } else {
            Ok(PathsSetting::List(
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from)
                    .collect(),
            ))
        }
    }
}

impl fmt::Display for PathsSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathsSetting::Auto => write!(f, "auto"),
            PathsSetting::List(paths) => write!(f, "{} explicit path(s)", paths.len()),
            PathsSetting::Manifest(location) => write!(f, "manifest {location}"),
        }
    }
}

/// Text shown when a query has no results
///
/// Either one string, or a map from route-path fragment to text. The
/// first key contained in the current route wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoDataText {
    Text(String),
    ByPath(IndexMap<String, String>),
}

impl NoDataText {
    /// Text for `route`; an unmatched route falls back to the default
    pub fn resolve(&self, route: &str) -> &str {
        match self {
            NoDataText::Text(text) => text,
            NoDataText::ByPath(texts) => texts
                .iter()
                .find(|(fragment, _)| route.contains(fragment.as_str()))
                .map(|(_, text)| text.as_str())
                .unwrap_or(DEFAULT_NO_DATA),
        }
    }
}

impl Default for NoDataText {
    fn default() -> Self {
        NoDataText::Text(DEFAULT_NO_DATA.to_string())
    }
}

impl fmt::Display for NoDataText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoDataText::Text(text) => write!(f, "{text:?}"),
            NoDataText::ByPath(texts) => write!(f, "{} route text(s)", texts.len()),
        }
    }
}

/// Whether a build may reuse a non-expired persisted index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// Always discard the persisted copy and rebuild
    #[default]
    Rebuild,
    /// Reuse the persisted copy while it is fresh
    TrustFresh,
}

impl FromStr for CachePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rebuild" => Ok(CachePolicy::Rebuild),
            "trust-fresh" | "trust_fresh" => Ok(CachePolicy::TrustFresh),
            other => Err(format!("unknown cache policy '{other}'")),
        }
    }
}

impl fmt::Display for CachePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CachePolicy::Rebuild => write!(f, "rebuild"),
            CachePolicy::TrustFresh => write!(f, "trust-fresh"),
        }
    }
}

/// Search index configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Documents to index
    #[serde(default = "default_paths")]
    pub paths: PathsSetting,

    /// Deepest heading level that starts a new entry
    #[serde(default = "default_depth")]
    pub depth: u8,

    /// Lifetime of the persisted index in milliseconds
    #[serde(default = "default_max_age_ms")]
    pub max_age_ms: i64,

    /// Scopes the persisted keys so several indexes can coexist
    #[serde(default)]
    pub namespace: Option<String>,

    /// Carried for site tooling; not interpreted by the engine
    #[serde(default)]
    pub path_namespaces: Option<Vec<String>>,

    /// Rebuild on every pass, or trust a fresh persisted copy
    #[serde(default)]
    pub cache_policy: CachePolicy,

    /// Text shown when a query has no results
    #[serde(default)]
    pub no_data: NoDataText,
}

/// Where documents are read from
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Local docs root (used when `base_url` is unset)
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Remote docs site; documents are fetched over HTTP when set
    #[serde(default)]
    pub base_url: Option<String>,

    /// Headers sent with every document fetch
    #[serde(default)]
    pub request_headers: BTreeMap<String, String>,

    /// Sidebar document used for `paths = "auto"`
    #[serde(default = "default_sidebar")]
    pub sidebar: String,

    /// Patterns for local discovery when no sidebar is available
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// Patterns excluded from local discovery
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory for the persisted index and expiry keys
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,
}

/// Limits configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// HTTP request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_sec: u64,

    /// Upper bound on results printed by the CLI
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

// Default value functions
fn default_paths() -> PathsSetting {
    PathsSetting::Auto
}

fn default_depth() -> u8 {
    2
}

fn default_max_age_ms() -> i64 {
    3_600_000
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_sidebar() -> String {
    "_sidebar.md".to_string()
}

fn default_include_patterns() -> Vec<String> {
    vec!["*.md".to_string()]
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/.git/**".to_string(),
        "**/_*.md".to_string(),
    ]
}

fn default_index_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_results() -> usize {
    100
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            paths: default_paths(),
            depth: default_depth(),
            max_age_ms: default_max_age_ms(),
            namespace: None,
            path_namespaces: None,
            cache_policy: CachePolicy::default(),
            no_data: NoDataText::default(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            base_url: None,
            request_headers: BTreeMap::new(),
            sidebar: default_sidebar(),
            include_patterns: default_include_patterns(),
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            index_dir: default_index_dir(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_sec: default_request_timeout(),
            max_results: default_max_results(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| DocsiftError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. DOCSIFT_CONFIG env var
    /// 2. XDG config file (~/.config/docsift/config.toml)
    /// 3. Legacy ./docsift.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("DOCSIFT_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("docsift.toml").exists() {
                Self::from_file("docsift.toml")?
            } else {
                Self::default()
            }
        };

        // Keep the index under XDG data unless configured explicitly
        if env::var("DOCSIFT_DATA_DIR").is_err() && config.storage.index_dir == default_index_dir()
        {
            config.storage.index_dir = xdg.index_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Search configuration
        if let Ok(paths) = env::var("DOCSIFT_PATHS") {
            match paths.parse() {
                Ok(setting) => self.search.paths = setting,
                Err(e) => tracing::warn!("Ignoring DOCSIFT_PATHS: {}", e),
            }
        }
        if let Ok(depth) = env::var("DOCSIFT_DEPTH") {
            if let Ok(d) = depth.parse() {
                self.search.depth = d;
            }
        }
        if let Ok(max_age) = env::var("DOCSIFT_MAX_AGE_MS") {
            if let Ok(ms) = max_age.parse() {
                self.search.max_age_ms = ms;
            }
        }
        if let Ok(namespace) = env::var("DOCSIFT_NAMESPACE") {
            self.search.namespace = if namespace.is_empty() {
                None
            } else {
                Some(namespace)
            };
        }
        if let Ok(policy) = env::var("DOCSIFT_CACHE_POLICY") {
            match policy.parse() {
                Ok(p) => self.search.cache_policy = p,
                Err(e) => tracing::warn!("Ignoring DOCSIFT_CACHE_POLICY: {}", e),
            }
        }

        // Source configuration
        if let Ok(root) = env::var("DOCSIFT_SOURCE_ROOT") {
            self.source.root = PathBuf::from(root);
        }
        if let Ok(base_url) = env::var("DOCSIFT_BASE_URL") {
            self.source.base_url = if base_url.is_empty() {
                None
            } else {
                Some(base_url)
            };
        }

        // Storage configuration
        if let Ok(data_dir) = env::var("DOCSIFT_DATA_DIR") {
            self.storage.index_dir = PathBuf::from(data_dir).join("index");
        }

        // Limits configuration
        if let Ok(timeout) = env::var("DOCSIFT_REQUEST_TIMEOUT_SEC") {
            if let Ok(t) = timeout.parse() {
                self.limits.request_timeout_sec = t;
            }
        }
        if let Ok(max_results) = env::var("DOCSIFT_MAX_RESULTS") {
            if let Ok(n) = max_results.parse() {
                self.limits.max_results = n;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !(1..=6).contains(&self.search.depth) {
            return Err(DocsiftError::ConfigError(format!(
                "Depth must be between 1 and 6, got {}",
                self.search.depth
            )));
        }

        if self.search.max_age_ms <= 0 {
            return Err(DocsiftError::ConfigError(
                "Max age must be positive".to_string(),
            ));
        }

        if let PathsSetting::List(paths) = &self.search.paths {
            if paths.is_empty() {
                return Err(DocsiftError::ConfigError(
                    "Explicit path list must not be empty".to_string(),
                ));
            }
        }

        if let Some(base_url) = &self.source.base_url {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(DocsiftError::ConfigError(format!(
                    "Base URL must start with http:// or https://, got '{base_url}'"
                )));
            }
        }

        if self.limits.request_timeout_sec == 0 {
            return Err(DocsiftError::ConfigError(
                "Request timeout must be non-zero".to_string(),
            ));
        }

        if self.limits.max_results == 0 {
            return Err(DocsiftError::ConfigError(
                "Max results must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration (header values are not logged)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Paths: {}", self.search.paths);
        tracing::info!("  Depth: {}", self.search.depth);
        tracing::info!("  Max age: {} ms", self.search.max_age_ms);
        tracing::info!(
            "  Namespace: {}",
            self.search.namespace.as_deref().unwrap_or("(default)")
        );
        tracing::info!("  Cache policy: {}", self.search.cache_policy);
        match &self.source.base_url {
            Some(url) => tracing::info!("  Source: {}", url),
            None => tracing::info!("  Source: {:?}", self.source.root),
        }
        tracing::info!(
            "  Request headers: {} configured",
            self.source.request_headers.len()
        );
        tracing::info!("  Index dir: {:?}", self.storage.index_dir);
        tracing::info!("  Request timeout: {}s", self.limits.request_timeout_sec);
    }
}
