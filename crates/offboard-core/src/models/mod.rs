//! Data models for templates, processes, tasks and people.
//!
//! Every entity is an explicit struct; optional attributes are `Option`s and
//! closed sets of values are enums that round-trip through `as_str` and
//! `FromStr` for storage. Display implementations live in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use offboard_core::models::{PersonKind, EmploymentStatus, AssociateStatus};
//!
//! let kind = PersonKind::from_statuses(Some(EmploymentStatus::Active), None)?;
//! assert_eq!(kind.employment_status(), Some(EmploymentStatus::Active));
//!
//! // A person is never both an employee and an associate.
//! assert!(PersonKind::from_statuses(
//!     Some(EmploymentStatus::Active),
//!     Some(AssociateStatus::Consultant),
//! )
//! .is_err());
//! # Ok::<(), offboard_core::OffboardError>(())
//! ```

pub mod filters;
pub mod person;
pub mod process;
pub mod requests;
pub mod status;
pub mod summary;
pub mod task;
pub mod template;

#[cfg(test)]
mod tests;

pub use filters::{PeopleFilter, ProcessFilter, Sort, SortKey, SortOrder, Timeframe};
pub use person::{
    AssociateStatus, EmploymentStatus, NewPerson, Person, PersonKind, PersonType,
};
pub use process::{ApprovalRole, CustomFields, InstantiateOptions, NewProcess, Process};
pub use requests::UpdateTaskRequest;
pub use status::{DocumentStatus, Priority, ProcessStatus, TaskStatus};
pub use summary::{ProcessSummary, Progress, ProgressSource};
pub use task::{Document, NewDocument, NewTask, Task};
pub use template::{
    ApprovalRequirements, DocumentTemplate, NewDocumentTemplate, NewTaskTemplate, NewTemplate,
    TaskCategory, TaskTemplate, Template, TemplateScope,
};
