//! Markdown rendering for models and operation results.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes are wrapped in newtypes so the same text reaches
//! both the terminal renderer and MCP tool responses.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers and    │    │   Markdown      │
//! │ (Process, Task) │───▶│ Result Types    │───▶│  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: ProcessSummaries, Tasks, Templates, People
//! - [`results`]: CreateResult, UpdateResult, DeleteResult
//! - [`status`]: OperationStatus
//! - [`datetime`]: timestamp and date formatting
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use offboard_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Seeded 3 templates".to_string());
//! assert_eq!(status.to_string(), "Success: Seeded 3 templates\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{People, ProcessSummaries, Tasks, Templates};
pub use datetime::{LocalDateTime, MaybeDate};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
