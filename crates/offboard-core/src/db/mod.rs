//! Database operations and SQLite management.
//!
//! [`Database`] is the persistence collaborator of the offboarding core. It
//! owns one SQLite connection, applies the embedded schema when opened and
//! exposes select/insert/update/delete operations per entity, split across
//! the `*_queries` submodules. Multi-row writes run inside a transaction.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod migrations;
pub mod person_queries;
pub mod process_queries;
pub mod task_queries;
pub mod template_queries;
mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (creating if needed) the database at `path` and initializes the
    /// schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let mut db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
