//! Driver configuration (TOML)
//!
//! Loaded from `$XDG_CONFIG_HOME/gmk67/driver.toml` when present; every key
//! is optional and command-line flags override the file.
//!
//! ```toml
//! vid = 0x258A
//! pid = 0x010C
//! frame_interval_ms = 400
//! color_refresh_secs = 10
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use gmk67_transport::protocol::{device, timing};
use serde::Deserialize;

/// Driver settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// USB vendor ID of the keyboard
    pub vid: u16,
    /// USB product ID of the keyboard
    pub pid: u16,
    /// Period between direct-mode frames
    pub frame_interval_ms: u64,
    /// Period between random color recomputations in the direct demo
    pub color_refresh_secs: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            vid: device::VENDOR_ID,
            pid: device::PRODUCT_ID,
            frame_interval_ms: timing::DIRECT_FRAME_INTERVAL_MS,
            color_refresh_secs: 10,
        }
    }
}

impl DriverConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parse from TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let config: DriverConfig =
            toml::from_str(content).map_err(|e| format!("parse TOML: {e}"))?;
        Ok(config.clamped())
    }

    /// Load `path` if given, else the default file if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, String> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let path = default_config_path();
                if path.exists() {
                    Self::load(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Direct-mode frame period, with an optional command-line override.
    /// Never shorter than [`timing::MIN_FRAME_INTERVAL_MS`].
    pub fn frame_interval(&self, override_ms: Option<u64>) -> Duration {
        let ms = override_ms.unwrap_or(self.frame_interval_ms);
        Duration::from_millis(ms.max(timing::MIN_FRAME_INTERVAL_MS))
    }

    /// Color recomputation period, with an optional command-line override
    pub fn color_refresh(&self, override_secs: Option<u64>) -> Duration {
        Duration::from_secs(override_secs.unwrap_or(self.color_refresh_secs).max(1))
    }

    fn clamped(mut self) -> Self {
        self.frame_interval_ms = self.frame_interval_ms.max(timing::MIN_FRAME_INTERVAL_MS);
        self.color_refresh_secs = self.color_refresh_secs.max(1);
        self
    }
}

/// Path to the default driver config file.
pub fn default_config_path() -> PathBuf {
    dirs_path().join("driver.toml")
}

fn dirs_path() -> PathBuf {
    if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(config).join("gmk67")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config/gmk67")
    } else {
        PathBuf::from("/tmp/gmk67")
    }
}
