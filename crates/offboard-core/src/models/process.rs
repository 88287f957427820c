//! Process model: one offboarding workflow for a single departing person.

use std::{collections::BTreeMap, str::FromStr};

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{ApprovalRequirements, NewTask, Priority, ProcessStatus, Task};

/// Who signs off on a process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalRole {
    Manager,
    Hr,
    Security,
}

impl ApprovalRole {
    pub const ALL: [ApprovalRole; 3] =
        [ApprovalRole::Manager, ApprovalRole::Hr, ApprovalRole::Security];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalRole::Manager => "manager",
            ApprovalRole::Hr => "hr",
            ApprovalRole::Security => "security",
        }
    }
}

impl FromStr for ApprovalRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manager" => Ok(ApprovalRole::Manager),
            "hr" => Ok(ApprovalRole::Hr),
            "security" => Ok(ApprovalRole::Security),
            _ => Err(format!("Invalid approval role: {s}")),
        }
    }
}

/// Free-form key-value data on a process.
///
/// The four progress counters are cached from the task collection whenever a
/// task changes; everything else lands in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CustomFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_percentage: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tasks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_tasks: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overdue_tasks: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A stored offboarding process.
///
/// Employee name, department, role and seniority are copied from the person
/// when the process is created and are not updated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Process {
    pub id: u64,
    pub template_id: u64,
    pub name: String,

    pub person_id: u64,
    pub employee_name: String,
    pub department: String,
    pub role: String,
    pub seniority_level: Option<String>,

    #[serde(default)]
    pub status: ProcessStatus,
    #[serde(default)]
    pub priority: Priority,

    pub target_completion_date: Option<Date>,
    pub actual_start_date: Option<Date>,
    pub actual_completion_date: Option<Date>,

    pub estimated_total_hours: f64,
    pub complexity_score: u8,

    #[serde(default)]
    pub required_approvals: ApprovalRequirements,
    pub manager_approved_at: Option<Timestamp>,
    pub hr_approved_at: Option<Timestamp>,
    pub security_approved_at: Option<Timestamp>,

    pub notes: Option<String>,
    #[serde(default)]
    pub custom_fields: CustomFields,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Associated tasks (lazy-loaded by default)
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Process {
    /// Recorded approval time for a role, if any.
    pub fn approved_at(&self, role: ApprovalRole) -> Option<Timestamp> {
        match role {
            ApprovalRole::Manager => self.manager_approved_at,
            ApprovalRole::Hr => self.hr_approved_at,
            ApprovalRole::Security => self.security_approved_at,
        }
    }

    /// Roles the template requires that have not signed off yet.
    pub fn missing_approvals(&self) -> Vec<ApprovalRole> {
        let required = self.required_approvals;
        ApprovalRole::ALL
            .into_iter()
            .filter(|role| match role {
                ApprovalRole::Manager => required.manager,
                ApprovalRole::Hr => required.hr,
                ApprovalRole::Security => required.security,
            })
            .filter(|role| self.approved_at(*role).is_none())
            .collect()
    }
}

/// Options supplied by the caller when applying a template to a person.
#[derive(Debug, Clone, Default)]
pub struct InstantiateOptions {
    pub priority: Priority,
    /// Defaults to the start date plus the template's estimated duration
    pub target_completion_date: Option<Date>,
    /// Defaults to "<template name> - <employee name>"
    pub process_name: Option<String>,
    pub notes: Option<String>,
}

/// A process materialized from a template, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProcess {
    pub template_id: u64,
    pub name: String,
    pub person_id: u64,
    pub employee_name: String,
    pub department: String,
    pub role: String,
    pub seniority_level: Option<String>,
    pub status: ProcessStatus,
    pub priority: Priority,
    pub target_completion_date: Option<Date>,
    pub estimated_total_hours: f64,
    pub complexity_score: u8,
    pub required_approvals: ApprovalRequirements,
    pub notes: Option<String>,
    /// Tasks in template sort order
    pub tasks: Vec<NewTask>,
}
