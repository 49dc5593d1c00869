use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use mnemo_lib::config::MnemoConfig;
use mnemo_lib::mnemonics::MnemonicStore;

/// Shared application state for CLI commands
pub struct App {
    pub config: MnemoConfig,
    pub store: MnemonicStore,
}

impl App {
    /// Load config and store from `data_dir`, or the default data directory
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => MnemoConfig::default_data_dir().context("Failed to get data directory")?,
        };

        let config = MnemoConfig::load(&data_dir)
            .with_context(|| format!("Failed to load config from {}", data_dir.display()))?;
        config
            .ensure_dirs()
            .context("Failed to create data directories")?;

        let store = MnemonicStore::load(&config.store_path)
            .with_context(|| format!("Failed to load store {}", config.store_path.display()))?;

        Ok(Self { config, store })
    }

    /// Resolve an import path, falling back to the imports directory for
    /// bare file names that don't exist relative to the working directory
    pub fn resolve_import_path(&self, path: &Path) -> PathBuf {
        if path.exists() || path.is_absolute() {
            return path.to_path_buf();
        }
        let candidate = self.config.imports_dir.join(path);
        if candidate.exists() {
            candidate
        } else {
            path.to_path_buf()
        }
    }
}
