//! Task and document models for instantiated processes.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{DocumentStatus, TaskCategory, TaskStatus};

/// One unit of work within a process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: u64,
    pub process_id: u64,
    /// Blueprint this task was created from
    pub template_task_id: Option<u64>,

    pub name: String,
    pub instructions: Option<String>,
    pub category: TaskCategory,
    pub status: TaskStatus,

    pub estimated_hours: f64,
    pub actual_hours: Option<f64>,
    pub sort_order: u32,

    pub assignee_role: Option<String>,
    pub assignee: Option<String>,

    pub requires_approval: bool,
    pub approver_role: Option<String>,
    pub requires_evidence: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence_types: Vec<String>,

    /// IDs of tasks in the same process that must complete first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    /// Set only while the task is blocked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<Document>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A document placeholder attached to a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub id: u64,
    pub task_id: u64,
    pub name: String,
    pub document_type: String,
    pub is_mandatory: bool,
    pub status: DocumentStatus,
}

/// A task materialized from a task template, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub template_task_id: u64,
    pub name: String,
    pub instructions: Option<String>,
    pub category: TaskCategory,
    pub status: TaskStatus,
    pub estimated_hours: f64,
    pub sort_order: u32,
    pub assignee_role: Option<String>,
    pub requires_approval: bool,
    pub approver_role: Option<String>,
    pub requires_evidence: bool,
    pub evidence_types: Vec<String>,
    /// Template task IDs; remapped to task IDs when the process is stored
    pub depends_on_template_tasks: Vec<u64>,
    pub documents: Vec<NewDocument>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub name: String,
    pub document_type: String,
    pub is_mandatory: bool,
    pub status: DocumentStatus,
}
