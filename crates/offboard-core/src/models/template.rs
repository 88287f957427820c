//! Template definitions: process blueprints, task blueprints and document
//! requirements.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Which people a template applies to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplateScope {
    #[default]
    CompanyWide,
    DepartmentSpecific,
    RoleSpecific,
}

impl TemplateScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateScope::CompanyWide => "company_wide",
            TemplateScope::DepartmentSpecific => "department_specific",
            TemplateScope::RoleSpecific => "role_specific",
        }
    }
}

impl FromStr for TemplateScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "company_wide" | "company" => Ok(TemplateScope::CompanyWide),
            "department_specific" | "department" => Ok(TemplateScope::DepartmentSpecific),
            "role_specific" | "role" => Ok(TemplateScope::RoleSpecific),
            _ => Err(format!("Invalid template scope: {s}")),
        }
    }
}

/// Kind of work a task represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    ExitInterview,
    EquipmentReturn,
    Documentation,
    AccessRevocation,
    KnowledgeTransfer,
    FinalProcedures,
    Compliance,
    Communication,
    TransitionPlanning,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::ExitInterview => "exit_interview",
            TaskCategory::EquipmentReturn => "equipment_return",
            TaskCategory::Documentation => "documentation",
            TaskCategory::AccessRevocation => "access_revocation",
            TaskCategory::KnowledgeTransfer => "knowledge_transfer",
            TaskCategory::FinalProcedures => "final_procedures",
            TaskCategory::Compliance => "compliance",
            TaskCategory::Communication => "communication",
            TaskCategory::TransitionPlanning => "transition_planning",
        }
    }
}

impl FromStr for TaskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "exit_interview" => Ok(TaskCategory::ExitInterview),
            "equipment_return" => Ok(TaskCategory::EquipmentReturn),
            "documentation" => Ok(TaskCategory::Documentation),
            "access_revocation" => Ok(TaskCategory::AccessRevocation),
            "knowledge_transfer" => Ok(TaskCategory::KnowledgeTransfer),
            "final_procedures" => Ok(TaskCategory::FinalProcedures),
            "compliance" => Ok(TaskCategory::Compliance),
            "communication" => Ok(TaskCategory::Communication),
            "transition_planning" => Ok(TaskCategory::TransitionPlanning),
            _ => Err(format!("Invalid task category: {s}")),
        }
    }
}

/// Sign-offs a process must collect before it can become active.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ApprovalRequirements {
    #[serde(default)]
    pub manager: bool,
    #[serde(default)]
    pub hr: bool,
    #[serde(default)]
    pub security: bool,
}

impl ApprovalRequirements {
    pub fn any(&self) -> bool {
        self.manager || self.hr || self.security
    }
}

/// A reusable offboarding process blueprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Template {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub scope: TemplateScope,

    /// Filters; `None` matches any value
    pub department: Option<String>,
    pub role_category: Option<String>,
    pub seniority_level: Option<String>,

    pub estimated_duration_days: u32,
    /// Small integer, 1 (trivial) to 5 (complex)
    pub complexity_score: u8,
    pub is_default: bool,
    #[serde(default)]
    pub approvals: ApprovalRequirements,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    /// Task blueprints ordered by `sort_order`
    #[serde(default)]
    pub tasks: Vec<TaskTemplate>,
}

impl Template {
    /// Number of filter fields that are set.
    pub fn specificity(&self) -> usize {
        [&self.department, &self.role_category, &self.seniority_level]
            .iter()
            .filter(|field| field.is_some())
            .count()
    }

    /// Sum of the estimated hours of every task blueprint.
    pub fn estimated_hours(&self) -> f64 {
        self.tasks.iter().map(|task| task.estimated_hours).sum()
    }
}

/// A task blueprint belonging to exactly one template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskTemplate {
    pub id: u64,
    pub template_id: u64,
    pub name: String,
    pub instructions: Option<String>,
    pub category: TaskCategory,
    pub estimated_hours: f64,
    pub sort_order: u32,
    pub default_assignee_role: Option<String>,
    pub requires_approval: bool,
    pub approver_role: Option<String>,
    pub requires_evidence: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidence_types: Vec<String>,
    /// IDs of task templates in the same template that must finish first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub documents: Vec<DocumentTemplate>,
}

/// A document a task must produce or collect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentTemplate {
    pub id: u64,
    pub task_template_id: u64,
    pub name: String,
    pub document_type: String,
    pub is_mandatory: bool,
}

/// Input for creating a template together with its task blueprints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTemplate {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub scope: TemplateScope,
    pub department: Option<String>,
    pub role_category: Option<String>,
    pub seniority_level: Option<String>,
    pub estimated_duration_days: u32,
    pub complexity_score: u8,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub approvals: ApprovalRequirements,
    /// Task blueprints in sort order
    #[serde(default)]
    pub tasks: Vec<NewTaskTemplate>,
}

/// Input for one task blueprint. Dependencies are indexes into the
/// enclosing [`NewTemplate::tasks`] list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskTemplate {
    pub name: String,
    pub instructions: Option<String>,
    pub category: TaskCategory,
    pub estimated_hours: f64,
    pub default_assignee_role: Option<String>,
    #[serde(default)]
    pub requires_approval: bool,
    pub approver_role: Option<String>,
    #[serde(default)]
    pub requires_evidence: bool,
    #[serde(default)]
    pub evidence_types: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<usize>,
    #[serde(default)]
    pub documents: Vec<NewDocumentTemplate>,
}

impl NewTaskTemplate {
    /// A task blueprint with no approval, evidence, dependencies or documents.
    pub fn new(name: impl Into<String>, category: TaskCategory, estimated_hours: f64) -> Self {
        Self {
            name: name.into(),
            instructions: None,
            category,
            estimated_hours,
            default_assignee_role: None,
            requires_approval: false,
            approver_role: None,
            requires_evidence: false,
            evidence_types: Vec::new(),
            depends_on: Vec::new(),
            documents: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocumentTemplate {
    pub name: String,
    pub document_type: String,
    #[serde(default)]
    pub is_mandatory: bool,
}
