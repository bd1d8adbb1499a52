//! Configuration file watcher for hot-reload support

use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver, TryRecvError};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use super::AppConfig;

/// Wait after a modify event so editors finish writing
const RELOAD_DEBOUNCE: Duration = Duration::from_millis(100);

/// Config watcher that monitors file changes and delivers reloaded configs
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<AppConfig>,
}

impl ConfigWatcher {
    /// Load the config at `config_path` and start watching it
    pub fn new(config_path: impl Into<PathBuf>) -> Result<(Self, AppConfig)> {
        let config_path = config_path.into();
        let (tx, rx) = channel::bounded(10);

        let initial_config =
            AppConfig::load(&config_path).context("Failed to load initial config")?;

        let reload_path = config_path.clone();

        // notify calls back on its own thread, so blocking here is fine
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    if !matches!(event.kind, EventKind::Modify(_)) {
                        return;
                    }
                    debug!("Config file modified: {:?}", event.paths);

                    thread::sleep(RELOAD_DEBOUNCE);

                    match AppConfig::load(&reload_path) {
                        Ok(new_config) => {
                            info!("Configuration reloaded successfully");
                            if let Err(e) = tx.try_send(new_config) {
                                warn!("Dropping config update: {}", e);
                            }
                        },
                        Err(e) => {
                            warn!("Failed to reload config (keeping old config): {:#}", e);
                        },
                    }
                },
                Err(e) => {
                    error!("Watch error: {}", e);
                },
            }
        })?;

        watcher
            .watch(Path::new(&config_path), RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch config file: {}", config_path.display()))?;

        info!("Config file watcher started for: {}", config_path.display());

        Ok((
            Self {
                _watcher: watcher,
                rx,
            },
            initial_config,
        ))
    }

    /// Newest pending config, skipping older queued ones; never blocks
    pub fn poll(&self) -> Option<AppConfig> {
        let mut latest = None;
        loop {
            match self.rx.try_recv() {
                Ok(config) => latest = Some(config),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        latest
    }

    /// Block until the next config arrives or `timeout` passes
    pub fn wait_for(&self, timeout: Duration) -> Option<AppConfig> {
        self.rx.recv_timeout(timeout).ok()
    }
}
