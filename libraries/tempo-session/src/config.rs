/// Shuffle session settings
use crate::error::{Result, SessionError};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use tempo_shuffle::{ShufflerConfig, DEFAULT_CHUNK_SIZE};

/// Default settings file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "tempo.toml";

/// Environment variable prefix (`TEMPO_CHUNK_SIZE`, `TEMPO_STATE_DIR`, ...)
pub const ENV_PREFIX: &str = "TEMPO";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShuffleSettings {
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
}

impl ShuffleSettings {
    /// Load settings from `tempo.toml` (if it exists) and environment
    pub fn load() -> Result<Self> {
        let path = PathBuf::from(DEFAULT_CONFIG_FILE);
        let file = path.exists().then_some(path);
        Self::build(file.as_deref())
    }

    /// Load settings from an explicit file, then environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SessionError::Config(format!(
                "Settings file not found at {:?}",
                path
            )));
        }
        Self::build(Some(path))
    }

    fn build(file: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = file {
            tracing::debug!("Loading shuffle settings from {:?}", path);
            settings = settings.add_source(config::File::from(path));
        }

        // Override with environment variables (prefixed with TEMPO_)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        );

        let settings: Self = settings.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(SessionError::config(
                "chunk_size must be at least 1 (set TEMPO_CHUNK_SIZE)",
            ));
        }

        if self.storage_key.trim().is_empty() {
            return Err(SessionError::config("storage_key must not be empty"));
        }

        Ok(())
    }

    /// Shuffler configuration derived from these settings
    pub fn shuffler_config(&self) -> Result<ShufflerConfig> {
        NonZeroUsize::new(self.chunk_size)
            .map(ShufflerConfig::with_chunk_size)
            .ok_or_else(|| SessionError::config("chunk_size must be at least 1"))
    }
}

impl Default for ShuffleSettings {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            storage_key: default_storage_key(),
            state_dir: default_state_dir(),
        }
    }
}

// Default values
fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE.get()
}

fn default_storage_key() -> String {
    "shuffle-state".to_string()
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("./data/state")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_settings() {
        let settings = ShuffleSettings::default();
        assert_eq!(settings.chunk_size, 100);
        assert_eq!(settings.storage_key, "shuffle-state");
        assert_eq!(settings.state_dir, PathBuf::from("./data/state"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tempo.toml");
        fs::write(&path, "chunk_size = 25\nstorage_key = \"focus-shuffle\"\n").unwrap();

        let settings = ShuffleSettings::load_from(&path).unwrap();
        assert_eq!(settings.chunk_size, 25);
        assert_eq!(settings.storage_key, "focus-shuffle");
        assert_eq!(settings.state_dir, PathBuf::from("./data/state"));
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ShuffleSettings::load_from(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tempo.toml");
        fs::write(&path, "chunk_size = 0\n").unwrap();

        let err = ShuffleSettings::load_from(&path).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn empty_storage_key_rejected() {
        let settings = ShuffleSettings {
            storage_key: "  ".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn shuffler_config_uses_chunk_size() {
        let settings = ShuffleSettings {
            chunk_size: 7,
            ..Default::default()
        };
        assert_eq!(settings.shuffler_config().unwrap().chunk_size.get(), 7);
    }
}
