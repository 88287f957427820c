//! Database schema initialization and migrations.
//!
//! `assets/schema.sql` creates the version 0 tables and is idempotent.
//! Later changes are the numbered steps in [`MIGRATIONS`];
//! `PRAGMA user_version` records how many have been applied.

use crate::error::{DatabaseResultExt, Result};

/// Ordered upgrade steps. Applying step `n` moves a file to version `n + 1`.
const MIGRATIONS: &[(&str, &str)] = &[(
    "listing indexes",
    "CREATE INDEX IF NOT EXISTS idx_processes_target_date ON processes(target_completion_date);
     CREATE INDEX IF NOT EXISTS idx_processes_department ON processes(department);",
)];

/// Version stamped into `PRAGMA user_version` once every migration ran.
pub const SCHEMA_VERSION: i64 = MIGRATIONS.len() as i64;

impl super::Database {
    pub(super) fn initialize_schema(&mut self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        self.connection
            .execute_batch(include_str!("../../assets/schema.sql"))
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()
    }

    /// Schema version recorded in the database file.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }

    fn apply_migrations(&mut self) -> Result<()> {
        let current = self.schema_version()?;
        if current >= SCHEMA_VERSION {
            return Ok(());
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin migration")?;
        for (version, (name, sql)) in MIGRATIONS.iter().enumerate().skip(current as usize) {
            log::debug!("Applying migration {} ({name})", version + 1);
            tx.execute_batch(sql)
                .db_context("Failed to apply migration")?;
        }
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))
            .db_context("Failed to record schema version")?;
        tx.commit().db_context("Failed to commit migration")?;

        log::info!("Database schema upgraded from version {current} to {SCHEMA_VERSION}");
        Ok(())
    }
}
