//! Preference storage port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::error::PreferenceError;
use crate::domain::preferences::Preferences;

/// Port for preference storage
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Load preferences from storage.
    ///
    /// # Returns
    /// The loaded preferences (all None if nothing is stored yet)
    async fn load(&self) -> Result<Preferences, PreferenceError>;

    /// Save preferences to storage.
    async fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError>;

    /// Get the preferences file path.
    fn path(&self) -> PathBuf;

    /// Check if preferences file exists.
    fn exists(&self) -> bool;

    /// Initialize preferences file with defaults.
    /// Fails if file already exists.
    async fn init(&self) -> Result<(), PreferenceError>;
}
