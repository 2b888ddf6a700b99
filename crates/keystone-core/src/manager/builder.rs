//! Builder for creating and configuring LifecycleManager instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::LifecycleManager;
use crate::{
    db::Database,
    error::{LifecycleError, Result, ResultExt},
};

/// Builder for creating and configuring LifecycleManager instances.
#[derive(Debug, Clone, Default)]
pub struct LifecycleManagerBuilder {
    database_path: Option<PathBuf>,
}

impl LifecycleManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// `None` keeps the XDG default:
    /// `$XDG_DATA_HOME/keystone/keystone.db` or
    /// `~/.local/share/keystone/keystone.db`.
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Creates the database directory if needed and initializes the schema.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::FileSystem` if the directory cannot be created
    /// Returns `LifecycleError::StoreUnavailable` if the database cannot be
    /// opened
    pub async fn build(self) -> Result<LifecycleManager> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LifecycleError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(|_| ()))
            .await
            .with_context("Task join error")??;

        log::debug!("using database at {}", db_path.display());
        Ok(LifecycleManager::new(db_path))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("keystone")
            .place_data_file("keystone.db")
            .map_err(|e| LifecycleError::XdgDirectory(e.to_string()))
    }
}
