//! Process instantiation: expanding a template into a process for one person.

use std::collections::HashMap;

use jiff::{civil::Date, Span};

use crate::{
    error::{OffboardError, Result},
    models::{
        DocumentStatus, InstantiateOptions, NewDocument, NewProcess, NewTask, Person, Process,
        ProcessStatus, TaskStatus, Template,
    },
};

/// Materialize a process from `template` for `person`.
///
/// The process starts as a draft with one pending task per task template, in
/// sort order, and one `not_started` document per document template. The
/// person's name, department, position and seniority are copied onto the
/// process. Without an explicit target date the target is `today` plus the
/// template's estimated duration.
///
/// `existing` is every stored process for the person (or a superset); at most
/// one process per person may be outside `completed`/`cancelled`.
///
/// # Errors
///
/// * `OffboardError::Validation` if the person has no department or position
/// * `OffboardError::DuplicateProcess` if the person already has an open
///   process
pub fn instantiate(
    template: &Template,
    person: &Person,
    options: &InstantiateOptions,
    today: Date,
    existing: &[Process],
) -> Result<NewProcess> {
    let department = required(person.department.as_deref(), "department")?;
    let role = required(person.position.as_deref(), "position")?;

    if let Some(open) = existing
        .iter()
        .find(|process| process.person_id == person.id && !process.status.is_terminal())
    {
        return Err(OffboardError::DuplicateProcess {
            person_id: person.id,
            existing_process_id: open.id,
        });
    }

    let target_completion_date = match options.target_completion_date {
        Some(date) => date,
        None => today
            .checked_add(Span::new().days(i64::from(template.estimated_duration_days)))
            .map_err(|e| {
                OffboardError::validation("target_completion_date").with_reason(e.to_string())
            })?,
    };

    let mut blueprints: Vec<_> = template.tasks.iter().collect();
    blueprints.sort_by_key(|task| task.sort_order);

    let tasks: Vec<NewTask> = blueprints
        .into_iter()
        .enumerate()
        .map(|(position, blueprint)| NewTask {
            template_task_id: blueprint.id,
            name: blueprint.name.clone(),
            instructions: blueprint.instructions.clone(),
            category: blueprint.category,
            status: TaskStatus::Pending,
            estimated_hours: blueprint.estimated_hours,
            sort_order: position as u32,
            assignee_role: blueprint.default_assignee_role.clone(),
            requires_approval: blueprint.requires_approval,
            approver_role: blueprint.approver_role.clone(),
            requires_evidence: blueprint.requires_evidence,
            evidence_types: blueprint.evidence_types.clone(),
            depends_on_template_tasks: blueprint.depends_on.clone(),
            documents: blueprint
                .documents
                .iter()
                .map(|document| NewDocument {
                    name: document.name.clone(),
                    document_type: document.document_type.clone(),
                    is_mandatory: document.is_mandatory,
                    status: DocumentStatus::NotStarted,
                })
                .collect(),
        })
        .collect();

    let employee_name = person.full_name();
    let name = options
        .process_name
        .clone()
        .unwrap_or_else(|| format!("{} - {employee_name}", template.name));

    Ok(NewProcess {
        template_id: template.id,
        name,
        person_id: person.id,
        employee_name,
        department: department.to_string(),
        role: role.to_string(),
        seniority_level: person.seniority_level.clone(),
        status: ProcessStatus::Draft,
        priority: options.priority,
        target_completion_date: Some(target_completion_date),
        estimated_total_hours: tasks.iter().map(|task| task.estimated_hours).sum(),
        complexity_score: template.complexity_score,
        required_approvals: template.approvals,
        notes: options.notes.clone(),
        tasks,
    })
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(OffboardError::validation(field)
            .with_reason("is required to start an offboarding process")),
    }
}

/// Translate each task's template-task dependencies into the IDs the tasks
/// were stored under.
///
/// `assigned` maps template task ID to stored task ID. The result is aligned
/// with `tasks`.
pub fn remap_dependencies(tasks: &[NewTask], assigned: &HashMap<u64, u64>) -> Result<Vec<Vec<u64>>> {
    tasks
        .iter()
        .map(|task| {
            task.depends_on_template_tasks
                .iter()
                .map(|template_task_id| {
                    assigned.get(template_task_id).copied().ok_or_else(|| {
                        OffboardError::integrity(
                            task.name.clone(),
                            format!("depends on template task {template_task_id}, which was not instantiated"),
                        )
                    })
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixtures::{date, employee, process, task_template, template},
        models::{DocumentTemplate, Priority, TaskCategory, TemplateScope},
    };

    fn standard_template() -> Template {
        let mut standard = template(1, "Standard Company-Wide Offboarding", TemplateScope::CompanyWide);
        standard.estimated_duration_days = 10;
        standard.tasks = vec![
            task_template(10, 1, "Exit interview", 0),
            task_template(11, 1, "Return equipment", 1),
            task_template(12, 1, "Revoke access", 2),
            task_template(13, 1, "Knowledge transfer", 3),
            task_template(14, 1, "Final paycheck", 4),
        ];
        standard.tasks[2].depends_on = vec![11];
        standard.tasks[1].documents = vec![DocumentTemplate {
            id: 100,
            task_template_id: 11,
            name: "Equipment receipt".to_string(),
            document_type: "receipt".to_string(),
            is_mandatory: true,
        }];
        standard
    }

    #[test]
    fn test_standard_template_scenario() {
        let person = employee(7, "Ada", "Lovelace", "Engineering");
        let today = date(2024, 3, 1);

        let new_process = instantiate(
            &standard_template(),
            &person,
            &InstantiateOptions::default(),
            today,
            &[],
        )
        .expect("instantiation succeeds");

        assert_eq!(new_process.tasks.len(), 5);
        assert!(new_process
            .tasks
            .iter()
            .all(|task| task.status == TaskStatus::Pending));
        assert_eq!(new_process.status, ProcessStatus::Draft);
        assert_eq!(new_process.target_completion_date, Some(date(2024, 3, 11)));
        assert_eq!(new_process.department, "Engineering");
        assert_eq!(new_process.employee_name, "Ada Lovelace");
        assert_eq!(
            new_process.name,
            "Standard Company-Wide Offboarding - Ada Lovelace"
        );
        assert_eq!(new_process.estimated_total_hours, 10.0);
    }

    #[test]
    fn test_tasks_follow_sort_order_and_carry_requirements() {
        let mut shuffled = standard_template();
        shuffled.tasks.reverse();
        shuffled.tasks[0].requires_evidence = true;
        shuffled.tasks[0].evidence_types = vec!["photo".to_string()];
        shuffled.tasks[0].category = TaskCategory::FinalProcedures;

        let new_process = instantiate(
            &shuffled,
            &employee(1, "Grace", "Hopper", "Engineering"),
            &InstantiateOptions::default(),
            date(2024, 1, 1),
            &[],
        )
        .expect("instantiation succeeds");

        let names: Vec<&str> = new_process.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Exit interview",
                "Return equipment",
                "Revoke access",
                "Knowledge transfer",
                "Final paycheck"
            ]
        );
        let last = &new_process.tasks[4];
        assert!(last.requires_evidence);
        assert_eq!(last.evidence_types, vec!["photo".to_string()]);
        assert_eq!(last.category, TaskCategory::FinalProcedures);
        assert_eq!(new_process.tasks[2].depends_on_template_tasks, vec![11]);
        assert_eq!(new_process.tasks[1].documents.len(), 1);
        assert_eq!(
            new_process.tasks[1].documents[0].status,
            DocumentStatus::NotStarted
        );
    }

    #[test]
    fn test_explicit_options_win() {
        let options = InstantiateOptions {
            priority: Priority::Urgent,
            target_completion_date: Some(date(2024, 2, 1)),
            process_name: Some("Custom".to_string()),
            notes: Some("Leaving for a competitor".to_string()),
        };

        let new_process = instantiate(
            &standard_template(),
            &employee(1, "Alan", "Turing", "Research"),
            &options,
            date(2024, 1, 1),
            &[],
        )
        .expect("instantiation succeeds");

        assert_eq!(new_process.priority, Priority::Urgent);
        assert_eq!(new_process.target_completion_date, Some(date(2024, 2, 1)));
        assert_eq!(new_process.name, "Custom");
        assert_eq!(new_process.notes.as_deref(), Some("Leaving for a competitor"));
    }

    #[test]
    fn test_missing_department_or_role_rejected() {
        let mut person = employee(1, "No", "Department", "Engineering");
        person.department = None;
        let err = instantiate(
            &standard_template(),
            &person,
            &InstantiateOptions::default(),
            date(2024, 1, 1),
            &[],
        )
        .expect_err("department required");
        assert!(matches!(err, OffboardError::Validation { ref field, .. } if field == "department"));

        let mut person = employee(1, "No", "Role", "Engineering");
        person.position = Some("   ".to_string());
        let err = instantiate(
            &standard_template(),
            &person,
            &InstantiateOptions::default(),
            date(2024, 1, 1),
            &[],
        )
        .expect_err("position required");
        assert!(matches!(err, OffboardError::Validation { ref field, .. } if field == "position"));
    }

    #[test]
    fn test_open_process_blocks_second_one() {
        let person = employee(3, "Linus", "Torvalds", "Engineering");
        let mut open = process(50, "Existing", ProcessStatus::Active);
        open.person_id = 3;

        let err = instantiate(
            &standard_template(),
            &person,
            &InstantiateOptions::default(),
            date(2024, 1, 1),
            &[open],
        )
        .expect_err("duplicate");
        assert!(matches!(
            err,
            OffboardError::DuplicateProcess {
                person_id: 3,
                existing_process_id: 50
            }
        ));
    }

    #[test]
    fn test_finished_processes_do_not_block() {
        let person = employee(3, "Linus", "Torvalds", "Engineering");
        let mut done = process(50, "Done", ProcessStatus::Completed);
        done.person_id = 3;
        let mut cancelled = process(51, "Cancelled", ProcessStatus::Cancelled);
        cancelled.person_id = 3;
        let mut someone_else = process(52, "Other", ProcessStatus::Active);
        someone_else.person_id = 4;

        assert!(instantiate(
            &standard_template(),
            &person,
            &InstantiateOptions::default(),
            date(2024, 1, 1),
            &[done, cancelled, someone_else],
        )
        .is_ok());
    }

    #[test]
    fn test_remap_dependencies() {
        let new_process = instantiate(
            &standard_template(),
            &employee(1, "Ada", "Lovelace", "Engineering"),
            &InstantiateOptions::default(),
            date(2024, 1, 1),
            &[],
        )
        .expect("instantiation succeeds");

        let assigned: HashMap<u64, u64> =
            [(10, 500), (11, 501), (12, 502), (13, 503), (14, 504)].into();
        let remapped = remap_dependencies(&new_process.tasks, &assigned).expect("all mapped");
        assert_eq!(remapped[2], vec![501]);
        assert!(remapped[0].is_empty());

        let partial: HashMap<u64, u64> = [(10, 500)].into();
        assert!(remap_dependencies(&new_process.tasks, &partial).is_err());
    }
}
