//! Progress metrics and process summaries for list views.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Priority, Process, ProcessStatus};

/// Where a progress figure came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressSource {
    /// Counted from the loaded task collection
    Tasks,
    /// Counters cached on the process custom fields
    Cached,
    /// Estimated from the process status alone
    StatusEstimate,
}

/// Display-ready completion metrics for a process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Progress {
    /// 0..=100
    pub percentage: u8,
    pub total_tasks: u32,
    pub completed_tasks: u32,
    pub overdue_tasks: u32,
    pub source: ProgressSource,
}

impl Progress {
    pub fn pending_tasks(&self) -> u32 {
        self.total_tasks.saturating_sub(self.completed_tasks)
    }
}

/// Summary information about a process with its progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessSummary {
    pub id: u64,
    pub name: String,
    pub employee_name: String,
    pub department: String,
    pub role: String,
    pub status: ProcessStatus,
    pub priority: Priority,
    pub target_completion_date: Option<Date>,
    pub created_at: Timestamp,
    pub progress: Progress,
}

impl From<&Process> for ProcessSummary {
    /// Uses the loaded tasks when present, the cached counters otherwise.
    fn from(process: &Process) -> Self {
        let tasks = (!process.tasks.is_empty()).then_some(process.tasks.as_slice());

        Self {
            id: process.id,
            name: process.name.clone(),
            employee_name: process.employee_name.clone(),
            department: process.department.clone(),
            role: process.role.clone(),
            status: process.status,
            priority: process.priority,
            target_completion_date: process.target_completion_date,
            created_at: process.created_at,
            progress: crate::progress::compute_progress(process, tasks),
        }
    }
}
