//! Application path management for portable and installed modes.
//!
//! ## Mode Detection
//!
//! - **Dev mode** (debug builds only): `config.yaml` in the current working
//!   directory is used as-is.
//! - **Portable mode**: a `.portable` marker file next to the executable keeps
//!   config and logs in the executable's directory.
//! - **Installed mode** (default): config and logs live in the platform config
//!   directory (`%APPDATA%\Stick Trail`, `~/.config/Stick Trail`, ...).

use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::AppConfig;

/// Application name used for directories in installed mode
const APP_NAME: &str = "Stick Trail";

/// Application paths for config and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct AppPaths {
    /// Path to the configuration file
    pub config: PathBuf,
    /// Path to the logs directory
    pub logs_dir: PathBuf,
    /// Whether files live next to the executable (or in the dev directory)
    pub is_portable: bool,
}

impl AppPaths {
    /// Detect the appropriate paths based on environment.
    ///
    /// Called before logging is initialized, so diagnostics go to stderr.
    pub fn detect() -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        #[cfg(debug_assertions)]
        {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            if cwd.join("config.yaml").exists() {
                eprintln!("[paths] Running in DEV mode (config.yaml in {})", cwd.display());
                return Self::portable(&cwd);
            }
        }

        if exe_dir.join(".portable").exists() {
            #[cfg(debug_assertions)]
            eprintln!("[paths] Running in PORTABLE mode (.portable marker found)");
            return Self::portable(&exe_dir);
        }

        let base = dirs::config_dir().unwrap_or_else(|| {
            eprintln!("[paths] WARNING: no config directory found, falling back to exe dir");
            exe_dir.clone()
        });

        #[cfg(debug_assertions)]
        eprintln!("[paths] Running in INSTALLED mode (base: {})", base.display());

        Self::installed(&base)
    }

    /// Files directly in `dir`
    pub fn portable(dir: &Path) -> Self {
        Self {
            config: dir.join("config.yaml"),
            logs_dir: dir.join("logs"),
            is_portable: true,
        }
    }

    /// Files in an application folder under `base`
    pub fn installed(base: &Path) -> Self {
        let app_dir = base.join(APP_NAME);
        Self {
            config: app_dir.join("config.yaml"),
            logs_dir: app_dir.join("logs"),
            is_portable: false,
        }
    }

    /// Override the config file; logs follow it
    pub fn with_config(config: PathBuf) -> Self {
        let base = config
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            logs_dir: base.join("logs"),
            config,
            is_portable: true,
        }
    }

    /// Get the base directory (for displaying in logs)
    pub fn base_dir(&self) -> PathBuf {
        self.config
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Create the logs directory and, in installed mode, a default config file
    pub fn ensure_directories(&self) -> anyhow::Result<()> {
        if !self.logs_dir.exists() {
            debug!("Creating logs directory: {}", self.logs_dir.display());
            std::fs::create_dir_all(&self.logs_dir).with_context(|| {
                format!("Failed to create logs directory: {}", self.logs_dir.display())
            })?;
        }

        if !self.is_portable && !self.config.exists() {
            info!("Writing default config to {}", self.config.display());
            AppConfig::default().save(&self.config)?;
        }

        Ok(())
    }
}
