//! Builder for [`Offboarding`] instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Offboarding;
use crate::{
    db::Database,
    error::{OffboardError, Result},
};

/// Configures where the service keeps its database.
#[derive(Debug, Clone, Default)]
pub struct OffboardingBuilder {
    database_path: Option<PathBuf>,
}

impl OffboardingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses `$XDG_DATA_HOME/offboard/offboard.db` or
    /// `~/.local/share/offboard/offboard.db`.
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
    /// * `OffboardError::XdgDirectory` if no default location can be resolved
    /// * `OffboardError::FileSystem` if the parent directory cannot be created
    /// * `OffboardError::Database` if schema initialization fails
    pub async fn build(self) -> Result<Offboarding> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| OffboardError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(drop))
            .await
            .map_err(|e| OffboardError::Configuration {
                message: format!("Task join error: {e}"),
            })??;

        log::debug!("Using database at {}", db_path.display());
        Ok(Offboarding::new(db_path))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("offboard")
            .place_data_file("offboard.db")
            .map_err(|e| OffboardError::XdgDirectory(e.to_string()))
    }
}
