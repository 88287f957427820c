//! Status and priority enumerations for processes, tasks and documents.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state of an offboarding process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStatus {
    /// Created from a template, not yet submitted
    #[default]
    Draft,

    /// Waiting for the approvals the template requires
    PendingApproval,

    /// Work is under way
    Active,

    /// Target completion date passed while active
    Overdue,

    Completed,

    Cancelled,
}

impl ProcessStatus {
    pub const ALL: [ProcessStatus; 6] = [
        ProcessStatus::Draft,
        ProcessStatus::PendingApproval,
        ProcessStatus::Active,
        ProcessStatus::Overdue,
        ProcessStatus::Completed,
        ProcessStatus::Cancelled,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessStatus::Draft => "draft",
            ProcessStatus::PendingApproval => "pending_approval",
            ProcessStatus::Active => "active",
            ProcessStatus::Overdue => "overdue",
            ProcessStatus::Completed => "completed",
            ProcessStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled processes accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessStatus::Completed | ProcessStatus::Cancelled)
    }

    /// Whether moving from `self` to `next` is a permitted transition.
    ///
    /// The happy path is draft → pending_approval → active → completed.
    /// Active processes may become overdue or be cancelled, overdue ones may
    /// be resumed, finished or cancelled, and anything not yet active may be
    /// cancelled.
    pub fn can_transition_to(&self, next: ProcessStatus) -> bool {
        use ProcessStatus::*;

        matches!(
            (self, next),
            (Draft, PendingApproval)
                | (Draft, Cancelled)
                | (PendingApproval, Active)
                | (PendingApproval, Cancelled)
                | (Active, Completed)
                | (Active, Overdue)
                | (Active, Cancelled)
                | (Overdue, Active)
                | (Overdue, Completed)
                | (Overdue, Cancelled)
        )
    }
}

impl FromStr for ProcessStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "draft" => Ok(ProcessStatus::Draft),
            "pending_approval" | "pendingapproval" => Ok(ProcessStatus::PendingApproval),
            "active" => Ok(ProcessStatus::Active),
            "overdue" => Ok(ProcessStatus::Overdue),
            "completed" => Ok(ProcessStatus::Completed),
            "cancelled" | "canceled" => Ok(ProcessStatus::Cancelled),
            _ => Err(format!("Invalid process status: {s}")),
        }
    }
}

/// Urgency of a process. Ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

/// State of a single task within a process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    /// Cannot proceed; the task carries a blocked reason
    Blocked,
    Overdue,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Overdue => "overdue",
        }
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use offboard_core::models::TaskStatus;
    ///
    /// assert_eq!(TaskStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(TaskStatus::Blocked.with_icon(), "✗ Blocked");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "○ Pending",
            TaskStatus::InProgress => "➤ In Progress",
            TaskStatus::Completed => "✓ Completed",
            TaskStatus::Blocked => "✗ Blocked",
            TaskStatus::Overdue => "! Overdue",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            "blocked" => Ok(TaskStatus::Blocked),
            "overdue" => Ok(TaskStatus::Overdue),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

/// State of a document placeholder attached to a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    #[default]
    NotStarted,
    Pending,
    Submitted,
    Approved,
    Rejected,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::NotStarted => "not_started",
            DocumentStatus::Pending => "pending",
            DocumentStatus::Submitted => "submitted",
            DocumentStatus::Approved => "approved",
            DocumentStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not_started" => Ok(DocumentStatus::NotStarted),
            "pending" => Ok(DocumentStatus::Pending),
            "submitted" => Ok(DocumentStatus::Submitted),
            "approved" => Ok(DocumentStatus::Approved),
            "rejected" => Ok(DocumentStatus::Rejected),
            _ => Err(format!("Invalid document status: {s}")),
        }
    }
}
