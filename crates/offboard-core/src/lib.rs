//! Core library for offboarding departing employees and associates.
//!
//! The crate is built from small pure parts with a storage-backed service on
//! top:
//!
//! - [`catalog`]: validated templates and scope matching
//! - [`instantiate`]: applying a template to a person
//! - [`lifecycle`]: status transitions, approvals and task updates
//! - [`progress`]: completion metrics from tasks, cached counters or status
//! - [`query`]: filtering and stable sorting of processes and people
//! - [`db`]: the SQLite persistence layer
//! - [`service`]: the async [`Offboarding`] facade used by the CLI and MCP
//!   server
//! - [`display`]: markdown formatting for models and operation results
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use offboard_core::{
//!     params::{ListProcesses, Seed},
//!     OffboardingBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = OffboardingBuilder::new()
//!     .with_database_path(Some("offboard.db"))
//!     .build()
//!     .await?;
//!
//! service.seed(&Seed { demo_people: 10, seed: Some(1) }).await?;
//!
//! let summaries = service
//!     .list_processes_summary(&ListProcesses::default())
//!     .await?;
//! println!("{summaries}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod db;
pub mod display;
pub mod error;
pub mod instantiate;
pub mod lifecycle;
pub mod models;
pub mod params;
pub mod progress;
pub mod query;
pub mod seed;
pub mod service;

#[cfg(test)]
mod fixtures;

pub use catalog::Catalog;
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, OperationStatus, People, ProcessSummaries, Tasks, Templates,
    UpdateResult,
};
pub use error::{OffboardError, Result};
pub use service::{Offboarding, OffboardingBuilder, SeedReport};
