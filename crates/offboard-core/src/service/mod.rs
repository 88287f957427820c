//! Async service facade over the catalog, instantiator and storage.
//!
//! [`Offboarding`] is what the CLI and the MCP server talk to. It holds only a
//! database path; every call opens a connection on tokio's blocking pool,
//! composes the pure core operations with storage and returns plain models.
//! The handler methods wrap those models in display types.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │   Operations    │    │    Database     │
//! │  (handlers.rs)  │───▶│ (*_ops.rs)      │───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   Display wrappers      Core + persistence      SQLite
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use offboard_core::{
//!     params::{AddPerson, StartProcess},
//!     OffboardingBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = OffboardingBuilder::new()
//!     .with_database_path(Some("offboard.db"))
//!     .build()
//!     .await?;
//!
//! let person = service
//!     .add_person(&AddPerson {
//!         first_name: "Ann".to_string(),
//!         last_name: "Smith".to_string(),
//!         email: "ann.smith@example.com".to_string(),
//!         department: Some("Engineering".to_string()),
//!         position: Some("Software Engineer".to_string()),
//!         employment_status: Some("active".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let process = service
//!     .start_process(&StartProcess {
//!         template_id: 1,
//!         person_id: person.id,
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{process}");
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tokio::task;

use crate::{
    db::Database,
    error::{OffboardError, Result},
};

pub mod builder;
pub mod handlers;
pub mod person_ops;
pub mod process_ops;
pub mod seed_ops;
pub mod task_ops;
pub mod template_ops;


pub use builder::OffboardingBuilder;
pub use seed_ops::SeedReport;

/// Entry point for offboarding operations.
pub struct Offboarding {
    pub(crate) db_path: PathBuf,
}

impl Offboarding {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Runs `operation` against a fresh connection on the blocking pool.
    pub(crate) async fn with_db<T, F>(&self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(|e| OffboardError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// Today's date in the system timezone.
pub(crate) fn today() -> jiff::civil::Date {
    jiff::Zoned::now().date()
}
