//! Paths used by the store and the CLI
//!
//! Everything lives under one data directory (by default
//! `~/.local/share/mnemo` or the platform equivalent). An optional
//! `mnemo.toml` in that directory overrides individual paths:
//!
//! ```toml
//! store_path = "korean_mnemonics.csv"
//! exports_dir = "/home/me/Anki/imports"
//! ```
//!
//! Relative paths resolve against the data directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config file {}: {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Data directory not found")]
    DataDirNotFound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MnemoConfig {
    /// The persisted record table
    pub store_path: PathBuf,
    /// Where import files are looked up when given by bare name
    pub imports_dir: PathBuf,
    /// Holding area for consumed import files
    pub processed_dir: PathBuf,
    /// Default destination for flashcard exports
    pub exports_dir: PathBuf,
}

/// Per-field overrides read from `mnemo.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    store_path: Option<PathBuf>,
    imports_dir: Option<PathBuf>,
    processed_dir: Option<PathBuf>,
    exports_dir: Option<PathBuf>,
}

impl MnemoConfig {
    pub const FILE_NAME: &'static str = "mnemo.toml";

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
        dirs::data_local_dir()
            .map(|p| p.join("mnemo"))
            .ok_or(ConfigError::DataDirNotFound)
    }

    /// Default layout under `data_dir`
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        let imports_dir = data_dir.join("imports");
        Self {
            store_path: data_dir.join("mnemonics.csv"),
            processed_dir: imports_dir.join("processed"),
            imports_dir,
            exports_dir: data_dir.join("exports"),
        }
    }

    /// Default layout under `data_dir`, with overrides from its config file
    /// if one exists
    pub fn load(data_dir: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data_dir = data_dir.as_ref();
        let mut config = Self::with_data_dir(data_dir);

        let path = data_dir.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(config);
        }

        let content = fs::read_to_string(&path)?;
        let file: ConfigFile = toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.clone(),
            source,
        })?;
        log::debug!("Loaded config overrides from {:?}", path);

        let resolve = |p: PathBuf| if p.is_absolute() { p } else { data_dir.join(p) };
        if let Some(p) = file.store_path {
            config.store_path = resolve(p);
        }
        if let Some(p) = file.imports_dir {
            config.imports_dir = resolve(p);
        }
        if let Some(p) = file.processed_dir {
            config.processed_dir = resolve(p);
        }
        if let Some(p) = file.exports_dir {
            config.exports_dir = resolve(p);
        }

        Ok(config)
    }

    /// Create every directory the store and CLI write into
    pub fn ensure_dirs(&self) -> io::Result<()> {
        if let Some(parent) = self.store_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::create_dir_all(&self.imports_dir)?;
        fs::create_dir_all(&self.processed_dir)?;
        fs::create_dir_all(&self.exports_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let config = MnemoConfig::with_data_dir("/data");
        assert_eq!(config.store_path, PathBuf::from("/data/mnemonics.csv"));
        assert_eq!(config.processed_dir, PathBuf::from("/data/imports/processed"));
        assert_eq!(config.exports_dir, PathBuf::from("/data/exports"));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = MnemoConfig::load(temp.path()).unwrap();
        assert_eq!(config, MnemoConfig::with_data_dir(temp.path()));
    }

    #[test]
    fn test_load_applies_overrides() {
        let temp = TempDir::new().unwrap();
        let absolute = temp.path().join("elsewhere");
        fs::write(
            temp.path().join(MnemoConfig::FILE_NAME),
            format!(
                "store_path = \"korean.csv\"\nexports_dir = {:?}\n",
                absolute.to_string_lossy()
            ),
        )
        .unwrap();

        let config = MnemoConfig::load(temp.path()).unwrap();
        assert_eq!(config.store_path, temp.path().join("korean.csv"));
        assert_eq!(config.exports_dir, absolute);
        assert_eq!(config.imports_dir, temp.path().join("imports"));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(MnemoConfig::FILE_NAME), "stor_path = \"x\"\n").unwrap();

        assert!(matches!(
            MnemoConfig::load(temp.path()),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp = TempDir::new().unwrap();
        let config = MnemoConfig::with_data_dir(temp.path().join("nested"));
        config.ensure_dirs().unwrap();

        assert!(config.processed_dir.is_dir());
        assert!(config.exports_dir.is_dir());
    }
}
