//! Builder for creating and configuring [`Store`] instances.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::task;

use super::Store;
use crate::{
    db::Database,
    error::{GeoTodoError, Result},
};

/// Builder for creating and configuring Store instances.
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    database_path: Option<PathBuf>,
}

impl StoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/geotodo/geotodo.db` or `~/.local/share/geotodo/geotodo.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Creates the database file and schema, then returns the store.
    ///
    /// # Errors
    ///
    /// Returns `GeoTodoError::XdgDirectory` if no default path can be found
    /// Returns `GeoTodoError::FileSystem` if the parent directory cannot be created
    /// Returns `GeoTodoError::Database` if database initialization fails
    pub async fn build(self) -> Result<Store> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| GeoTodoError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(drop))
            .await
            .map_err(|e| GeoTodoError::Configuration {
                message: format!("Task join error: {e}"),
            })??;
        debug!("store ready at {}", db_path.display());

        Ok(Store::new(db_path))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("geotodo")
            .place_data_file("geotodo.db")
            .map_err(|e| GeoTodoError::XdgDirectory(e.to_string()))
    }
}
