//! Application configuration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{ensure, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{dictionary::LETTER_COUNTS, models::Difficulty};

/// Directory under the platform config/data/cache roots.
pub const APP_DIR: &str = "lettrus";
/// Prefix for environment overrides, e.g. `LETTRUS_LETTER_COUNT=8`.
pub const ENV_PREFIX: &str = "LETTRUS";

const DEFAULT_CONFIG: &str = r#"# Lettrus configuration

# Directory holding words_<n>.txt and words_<n>_<easy|hard>.txt.
# Defaults to <data dir>/lettrus/words when that exists, otherwise the
# lists bundled with the source tree (data/words).
# words_dir = "/path/to/words"

# Word length for new games: 7, 8 or 9
letter_count = 7

# Target pool: "easy" or "hard"
difficulty = "easy"

# Per-turn countdown
timer_enabled = true
"#;

/// Settings for the game frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the word lists.
    pub words_dir: PathBuf,
    /// Word length for new games.
    pub letter_count: usize,
    /// Target pool for new games.
    pub difficulty: Difficulty,
    /// Whether new games run the turn countdown.
    pub timer_enabled: bool,
    /// Directory for log files.
    pub log_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            words_dir: default_words_dir(),
            letter_count: 7,
            difficulty: Difficulty::Easy,
            timer_enabled: true,
            log_dir: dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("logs"),
        }
    }
}

impl AppConfig {
    /// Default location of the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Load from the default file plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load from `path` (optional) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the game cannot be played with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            LETTER_COUNTS.contains(&self.letter_count),
            "letter_count must be 7, 8 or 9 (got {})",
            self.letter_count
        );
        Ok(())
    }
}

/// Word lists shipped in the source tree under `data/words`.
pub fn bundled_words_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("data")
        .join("words")
}

fn default_words_dir() -> PathBuf {
    let installed = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("words");
    if installed.is_dir() {
        installed
    } else {
        bundled_words_dir()
    }
}

/// Write a commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(AppConfig::config_path())
}

fn write_default_config(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!("wrote default config to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{FileWordStore, WordStore};
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;
        assert_eq!(config.letter_count, 7);
        assert_eq!(config.difficulty, Difficulty::Easy);
        assert!(config.timer_enabled);
        Ok(())
    }

    #[test]
    fn default_file_parses() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("lettrus").join("config.toml");
        write_default_config(&path)?;
        assert!(path.exists());

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "letter_count = 9\ndifficulty = \"hard\"\ntimer_enabled = false\nwords_dir = \"/srv/words\"\n",
        )?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.letter_count, 9);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert!(!config.timer_enabled);
        assert_eq!(config.words_dir, PathBuf::from("/srv/words"));
        Ok(())
    }

    #[test]
    fn unsupported_letter_count_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "letter_count = 5\n")?;

        let err = AppConfig::load_from(&path).expect_err("5 letters is not a game");
        assert!(err.to_string().contains("letter_count"));
        Ok(())
    }

    #[test]
    fn existing_file_is_not_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "letter_count = 8\n")?;
        write_default_config(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "letter_count = 8\n");
        Ok(())
    }

    #[test]
    fn bundled_word_lists_are_playable() -> Result<()> {
        let store = FileWordStore::new(bundled_words_dir());
        store.load()?;
        for letter_count in LETTER_COUNTS {
            for difficulty in Difficulty::ALL {
                assert!(store.word_count(letter_count, difficulty)? > 0);
                let word = store.random_word(letter_count, difficulty)?;
                assert!(store.contains(&word), "{word} missing from vocabulary");
            }
        }
        Ok(())
    }

    #[test]
    fn default_words_dir_exists() {
        assert!(AppConfig::default().words_dir.is_dir());
    }
}
