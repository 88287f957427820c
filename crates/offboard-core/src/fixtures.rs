//! Builders for unit tests.

use jiff::{civil::Date, Timestamp};

use crate::models::{
    ApprovalRequirements, AssociateStatus, CustomFields, EmploymentStatus, Person, PersonKind, Priority, Process,
    ProcessStatus, Task, TaskCategory, TaskStatus, TaskTemplate, Template, TemplateScope,
};

pub fn template(id: u64, name: &str, scope: TemplateScope) -> Template {
    Template {
        id,
        name: name.to_string(),
        description: None,
        scope,
        department: None,
        role_category: None,
        seniority_level: None,
        estimated_duration_days: 10,
        complexity_score: 2,
        is_default: false,
        approvals: ApprovalRequirements::default(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        tasks: Vec::new(),
    }
}

pub fn task_template(id: u64, template_id: u64, name: &str, sort_order: u32) -> TaskTemplate {
    TaskTemplate {
        id,
        template_id,
        name: name.to_string(),
        instructions: None,
        category: TaskCategory::Documentation,
        estimated_hours: 2.0,
        sort_order,
        default_assignee_role: Some("hr".to_string()),
        requires_approval: false,
        approver_role: None,
        requires_evidence: false,
        evidence_types: Vec::new(),
        depends_on: Vec::new(),
        documents: Vec::new(),
    }
}

pub fn employee(id: u64, first: &str, last: &str, department: &str) -> Person {
    Person {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        department: Some(department.to_string()),
        position: Some("Software Engineer".to_string()),
        role_category: Some("individual_contributor".to_string()),
        seniority_level: Some("mid".to_string()),
        kind: PersonKind::Employee {
            employment_status: EmploymentStatus::Active,
        },
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub fn associate(id: u64, first: &str, last: &str) -> Person {
    Person {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@advisors.example.com", first.to_lowercase()),
        department: None,
        position: Some("Advisor".to_string()),
        role_category: None,
        seniority_level: None,
        kind: PersonKind::Associate {
            associate_status: AssociateStatus::Consultant,
        },
        created_at: Timestamp::UNIX_EPOCH,
    }
}

pub fn process(id: u64, name: &str, status: ProcessStatus) -> Process {
    Process {
        id,
        template_id: 1,
        name: name.to_string(),
        person_id: id,
        employee_name: format!("Person {id}"),
        department: "Engineering".to_string(),
        role: "Software Engineer".to_string(),
        seniority_level: None,
        status,
        priority: Priority::Medium,
        target_completion_date: None,
        actual_start_date: None,
        actual_completion_date: None,
        estimated_total_hours: 0.0,
        complexity_score: 2,
        required_approvals: ApprovalRequirements::default(),
        manager_approved_at: None,
        hr_approved_at: None,
        security_approved_at: None,
        notes: None,
        custom_fields: CustomFields::default(),
        created_at: Timestamp::from_second(id as i64 * 60).unwrap_or(Timestamp::UNIX_EPOCH),
        updated_at: Timestamp::UNIX_EPOCH,
        tasks: Vec::new(),
    }
}

pub fn task(id: u64, process_id: u64, status: TaskStatus) -> Task {
    Task {
        id,
        process_id,
        template_task_id: None,
        name: format!("Task {id}"),
        instructions: None,
        category: TaskCategory::Documentation,
        status,
        estimated_hours: 1.0,
        actual_hours: None,
        sort_order: id as u32,
        assignee_role: None,
        assignee: None,
        requires_approval: false,
        approver_role: None,
        requires_evidence: false,
        evidence_types: Vec::new(),
        depends_on: Vec::new(),
        completed_at: None,
        blocked_reason: None,
        documents: Vec::new(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub fn date(year: i16, month: i8, day: i8) -> Date {
    jiff::civil::date(year, month, day)
}
