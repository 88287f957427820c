//! Markdown `Display` implementations for the domain models.

use std::fmt;

use super::datetime::{LocalDateTime, MaybeDate};
use crate::models::{
    ApprovalRole, AssociateStatus, EmploymentStatus, Person, PersonKind, Priority, Process,
    ProcessStatus, ProcessSummary, Progress, ProgressSource, Task, TaskCategory, TaskStatus,
    TaskTemplate, Template, TemplateScope, Timeframe,
};

macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    ProcessStatus,
    TaskStatus,
    Priority,
    TemplateScope,
    TaskCategory,
    EmploymentStatus,
    AssociateStatus,
    ApprovalRole,
    Timeframe,
);

impl fmt::Display for PersonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonKind::Employee { employment_status } => {
                write!(f, "employee ({employment_status})")
            }
            PersonKind::Associate { associate_status } => {
                write!(f, "associate ({associate_status})")
            }
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.source == ProgressSource::StatusEstimate {
            return write!(f, "~{}% (estimated from status)", self.percentage);
        }

        write!(
            f,
            "{}% ({}/{} tasks",
            self.percentage, self.completed_tasks, self.total_tasks
        )?;
        if self.overdue_tasks > 0 {
            write!(f, ", {} overdue", self.overdue_tasks)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Scope: {}", self.scope)?;
        if let Some(department) = &self.department {
            writeln!(f, "- Department: {department}")?;
        }
        if let Some(role) = &self.role_category {
            writeln!(f, "- Role category: {role}")?;
        }
        if let Some(seniority) = &self.seniority_level {
            writeln!(f, "- Seniority: {seniority}")?;
        }
        writeln!(
            f,
            "- Duration: {} days, complexity {}/10, {:.1} hours",
            self.estimated_duration_days,
            self.complexity_score,
            self.estimated_hours()
        )?;
        if self.is_default {
            writeln!(f, "- Default template")?;
        }
        if self.approvals.any() {
            let roles: Vec<&str> = ApprovalRole::ALL
                .iter()
                .filter(|role| match role {
                    ApprovalRole::Manager => self.approvals.manager,
                    ApprovalRole::Hr => self.approvals.hr,
                    ApprovalRole::Security => self.approvals.security,
                })
                .map(|role| role.as_str())
                .collect();
            writeln!(f, "- Approvals: {}", roles.join(", "))?;
        }

        if let Some(description) = &self.description {
            writeln!(f)?;
            writeln!(f, "{description}")?;
        }

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks in this template.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for TaskTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. **{}** ({}, {:.1}h)",
            self.sort_order + 1,
            self.name,
            self.category,
            self.estimated_hours
        )?;
        if let Some(role) = &self.default_assignee_role {
            write!(f, " - {role}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(
            f,
            "- Employee: {} ({}, {})",
            self.employee_name, self.role, self.department
        )?;
        writeln!(f, "- Status: {}", self.status)?;
        writeln!(f, "- Priority: {}", self.priority)?;
        writeln!(f, "- Target date: {}", MaybeDate(&self.target_completion_date))?;
        if self.actual_start_date.is_some() {
            writeln!(f, "- Started: {}", MaybeDate(&self.actual_start_date))?;
        }
        if self.actual_completion_date.is_some() {
            writeln!(f, "- Completed: {}", MaybeDate(&self.actual_completion_date))?;
        }
        writeln!(
            f,
            "- Estimate: {:.1} hours, complexity {}/10",
            self.estimated_total_hours, self.complexity_score
        )?;

        let tasks = (!self.tasks.is_empty()).then_some(self.tasks.as_slice());
        writeln!(
            f,
            "- Progress: {}",
            crate::progress::compute_progress(self, tasks)
        )?;

        for role in ApprovalRole::ALL {
            let required = match role {
                ApprovalRole::Manager => self.required_approvals.manager,
                ApprovalRole::Hr => self.required_approvals.hr,
                ApprovalRole::Security => self.required_approvals.security,
            };
            match self.approved_at(role) {
                Some(at) => writeln!(f, "- {role} approval: {}", LocalDateTime(&at))?,
                None if required => writeln!(f, "- {role} approval: pending")?,
                None => {}
            }
        }

        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        if self.tasks.is_empty() {
            writeln!(f, "\nNo tasks loaded for this process.")?;
        } else {
            writeln!(f, "\n## Tasks")?;
            writeln!(f)?;
            for task in &self.tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. {} ({})",
            self.id,
            self.name,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- Category: {}", self.category)?;
        match (&self.assignee, &self.assignee_role) {
            (Some(assignee), _) => writeln!(f, "- Assignee: {assignee}")?,
            (None, Some(role)) => writeln!(f, "- Assignee role: {role}")?,
            (None, None) => {}
        }
        match self.actual_hours {
            Some(actual) => writeln!(
                f,
                "- Hours: {actual:.1} of {:.1} estimated",
                self.estimated_hours
            )?,
            None => writeln!(f, "- Estimated hours: {:.1}", self.estimated_hours)?,
        }
        if !self.depends_on.is_empty() {
            let ids: Vec<String> = self.depends_on.iter().map(u64::to_string).collect();
            writeln!(f, "- Depends on: {}", ids.join(", "))?;
        }
        if self.requires_approval {
            match &self.approver_role {
                Some(role) => writeln!(f, "- Requires approval by {role}")?,
                None => writeln!(f, "- Requires approval")?,
            }
        }
        if self.requires_evidence && !self.evidence_types.is_empty() {
            writeln!(f, "- Evidence: {}", self.evidence_types.join(", "))?;
        }
        if let Some(at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(at))?;
        }
        writeln!(f)?;

        if let Some(instructions) = &self.instructions {
            writeln!(f, "{instructions}")?;
            writeln!(f)?;
        }

        if self.status == TaskStatus::Blocked {
            if let Some(reason) = &self.blocked_reason {
                writeln!(f, "#### Blocked")?;
                writeln!(f)?;
                writeln!(f, "{reason}")?;
                writeln!(f)?;
            }
        }

        if !self.documents.is_empty() {
            writeln!(f, "#### Documents")?;
            writeln!(f)?;
            for document in &self.documents {
                let mandatory = if document.is_mandatory { ", mandatory" } else { "" };
                writeln!(
                    f,
                    "- {} ({}{mandatory}): {}",
                    document.name,
                    document.document_type,
                    document.status.as_str()
                )?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for ProcessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Employee**: {} ({}, {})",
            self.employee_name, self.role, self.department
        )?;
        writeln!(f, "- **Status**: {} / {}", self.status, self.priority)?;
        writeln!(
            f,
            "- **Target**: {}",
            MaybeDate(&self.target_completion_date)
        )?;
        writeln!(f, "- **Progress**: {}", self.progress)?;
        writeln!(f)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.full_name(), self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Email**: {}", self.email)?;
        writeln!(f, "- **Type**: {}", self.kind)?;
        if let Some(position) = &self.position {
            writeln!(f, "- **Position**: {position}")?;
        }
        if let Some(department) = &self.department {
            writeln!(f, "- **Department**: {department}")?;
        }
        if let Some(role) = &self.role_category {
            writeln!(f, "- **Role category**: {role}")?;
        }
        if let Some(seniority) = &self.seniority_level {
            writeln!(f, "- **Seniority**: {seniority}")?;
        }
        writeln!(f)
    }
}
