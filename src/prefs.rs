//! Client Preferences
//!
//! Small TOML file kept between runs: the chosen interface language and
//! whether the investment disclaimer was acknowledged.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::i18n::Language;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prefs {
    /// Language code as stored; unsupported codes are ignored on read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default)]
    pub disclaimer_acknowledged: bool,
}

impl Prefs {
    pub fn language(&self) -> Option<Language> {
        self.language.as_deref().and_then(Language::from_code)
    }
}

/// Preferences errors
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("Failed to access preferences {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse preferences {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Failed to serialize preferences: {0}")]
    Serialize(String),
}

/// File-backed preferences
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the preferences; a missing file yields the defaults
    pub fn load(&self) -> Result<Prefs, PrefsError> {
        if !self.path.exists() {
            return Ok(Prefs::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        toml::from_str(&content).map_err(|e| PrefsError::Parse {
            path: self.path.clone(),
            error: e.to_string(),
        })
    }

    /// Like [`load`](Self::load), but an unreadable file falls back to the
    /// defaults so the next save replaces it
    pub fn load_or_default(&self) -> Result<Prefs, PrefsError> {
        match self.load() {
            Err(PrefsError::Parse { path, error }) => {
                tracing::warn!(path = ?path, error = %error, "Ignoring unreadable preferences");
                Ok(Prefs::default())
            }
            other => other,
        }
    }

    /// Write the preferences, creating the parent directory if needed
    pub fn save(&self, prefs: &Prefs) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let content = toml::to_string(prefs).map_err(|e| PrefsError::Serialize(e.to_string()))?;

        // Replace via a sibling temp file
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, content).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = ?self.path, "Saved preferences");
        Ok(())
    }

    pub fn set_language(&self, language: Language) -> Result<Prefs, PrefsError> {
        self.update(|prefs| prefs.language = Some(language.code().to_string()))
    }

    pub fn acknowledge_disclaimer(&self) -> Result<Prefs, PrefsError> {
        self.update(|prefs| prefs.disclaimer_acknowledged = true)
    }

    fn update(&self, change: impl FnOnce(&mut Prefs)) -> Result<Prefs, PrefsError> {
        let mut prefs = self.load_or_default()?;
        change(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }

    fn io_error(&self, error: std::io::Error) -> PrefsError {
        PrefsError::Io {
            path: self.path.clone(),
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = PrefsStore::new(dir.path().join("prefs.toml"));

        let prefs = store.load().unwrap();
        assert_eq!(prefs, Prefs::default());
        assert_eq!(prefs.language(), None);
    }

    #[test]
    fn test_updates_persist_across_stores() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.toml");

        let store = PrefsStore::new(&path);
        store.set_language(Language::En).unwrap();
        store.acknowledge_disclaimer().unwrap();

        let reopened = PrefsStore::new(&path).load().unwrap();
        assert_eq!(reopened.language(), Some(Language::En));
        assert!(reopened.disclaimer_acknowledged);
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_unsupported_language_is_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "language = \"de\"\n").unwrap();

        let prefs = PrefsStore::new(&path).load().unwrap();
        assert_eq!(prefs.language(), None);
        assert!(!prefs.disclaimer_acknowledged);
    }

    #[test]
    fn test_corrupt_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "disclaimer_acknowledged = maybe").unwrap();

        assert!(matches!(PrefsStore::new(&path).load(), Err(PrefsError::Parse { .. })));
    }

    #[test]
    fn test_corrupt_file_falls_back_and_is_repaired() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.toml");
        std::fs::write(&path, "language = [broken").unwrap();

        let store = PrefsStore::new(&path);
        assert_eq!(store.load_or_default().unwrap(), Prefs::default());

        let prefs = store.set_language(Language::En).unwrap();
        assert_eq!(prefs.language(), Some(Language::En));
        assert!(!prefs.disclaimer_acknowledged);

        let reopened = store.load().unwrap();
        assert_eq!(reopened.language(), Some(Language::En));
    }
}
