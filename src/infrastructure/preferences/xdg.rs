//! XDG preference store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::PreferenceStore;
use crate::domain::error::PreferenceError;
use crate::domain::preferences::Preferences;

/// TOML preferences file under the XDG config directory
pub struct XdgPreferenceStore {
    path: PathBuf,
}

impl XdgPreferenceStore {
    /// Create a store at the default path
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("waste-watch");

        Self {
            path: config_dir.join("preferences.toml"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_toml(content: &str) -> Result<Preferences, PreferenceError> {
        toml::from_str(content).map_err(|e| PreferenceError::ParseError(e.to_string()))
    }

    fn to_toml(prefs: &Preferences) -> Result<String, PreferenceError> {
        toml::to_string_pretty(prefs).map_err(|e| PreferenceError::WriteError(e.to_string()))
    }

    /// Sibling file the new contents are written to before the rename
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "preferences.toml".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for XdgPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for XdgPreferenceStore {
    async fn load(&self) -> Result<Preferences, PreferenceError> {
        if !self.exists() {
            return Ok(Preferences::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| PreferenceError::ReadError(e.to_string()))?;

        Self::parse_toml(&content)
    }

    async fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PreferenceError::WriteError(e.to_string()))?;
        }

        // Stage next to the target, then rename over it
        let content = Self::to_toml(prefs)?;
        let staging = self.staging_path();
        fs::write(&staging, content)
            .await
            .map_err(|e| PreferenceError::WriteError(e.to_string()))?;

        if let Err(e) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(PreferenceError::WriteError(e.to_string()));
        }
        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), PreferenceError> {
        if self.exists() {
            return Err(PreferenceError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        self.save(&Preferences::defaults()).await
    }
}
