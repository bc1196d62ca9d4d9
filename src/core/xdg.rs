//! XDG Base Directory Support
//!
//! Resolves where docsift keeps its config file and persisted search
//! index. Copies a legacy `./docsift.toml` into the XDG config dir on
//! first run.

use std::env;
use std::fs;
use std::path::PathBuf;

const APP_DIR: &str = "docsift";

/// XDG directory structure for docsift
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub state_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit DOCSIFT_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.local/share, etc.)
    pub fn new() -> Self {
        Self {
            config_dir: resolve("DOCSIFT_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            data_dir: resolve("DOCSIFT_DATA_DIR", "XDG_DATA_HOME", &[".local", "share"]),
            state_dir: resolve("DOCSIFT_STATE_DIR", "XDG_STATE_HOME", &[".local", "state"]),
            cache_dir: resolve("DOCSIFT_CACHE_DIR", "XDG_CACHE_HOME", &[".cache"]),
        }
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        // DOCSIFT_CONFIG_FILE is an explicit override
        if let Ok(file) = env::var("DOCSIFT_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Directory holding the persisted index and expiry keys
    pub fn index_dir(&self) -> PathBuf {
        self.data_dir.join("index")
    }

    /// Get logs directory path
    pub fn logs_dir(&self) -> PathBuf {
        self.state_dir.join("logs")
    }

    /// Create all XDG directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(self.index_dir())?;
        fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::debug!("XDG directories resolved:");
        tracing::debug!("  Config: {:?}", self.config_dir);
        tracing::debug!("  Data: {:?}", self.data_dir);
        tracing::debug!("  State: {:?}", self.state_dir);
        tracing::debug!("  Cache: {:?}", self.cache_dir);
        tracing::debug!("  Config file: {:?}", self.config_file());
        tracing::debug!("  Index: {:?}", self.index_dir());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(override_var: &str, xdg_var: &str, home_suffix: &[&str]) -> PathBuf {
    if let Ok(dir) = env::var(override_var) {
        return PathBuf::from(dir);
    }

    if let Ok(xdg) = env::var(xdg_var) {
        return PathBuf::from(xdg).join(APP_DIR);
    }

    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    for part in home_suffix {
        path.push(part);
    }
    path.join(APP_DIR)
}

/// Migrate legacy paths to XDG structure
///
/// Copies `./docsift.toml` to the XDG config file when the latter
/// does not exist yet. Never deletes the original.
pub fn migrate_legacy_paths(xdg: &XdgDirs) -> std::io::Result<()> {
    let legacy_config = PathBuf::from("./docsift.toml");
    let new_config = xdg.config_file();

    if legacy_config.exists() && !new_config.exists() {
        fs::create_dir_all(&xdg.config_dir)?;
        fs::copy(&legacy_config, &new_config)?;
        tracing::info!("Migrated config: {:?} → {:?}", legacy_config, new_config);
        tracing::info!(
            "Legacy config file preserved at {:?} (safe to delete after verification)",
            legacy_config
        );
    }

    Ok(())
}
