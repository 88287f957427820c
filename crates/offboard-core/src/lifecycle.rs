//! Status transitions for processes and tasks.
//!
//! These functions decide what a change means without touching storage; the
//! database layer applies the returned change sets.

use jiff::{civil::Date, Timestamp};

use crate::{
    error::{OffboardError, Result},
    models::{ApprovalRole, Process, ProcessStatus, Task, TaskStatus, UpdateTaskRequest},
};

/// Resolved process fields after a status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub status: ProcessStatus,
    pub actual_start_date: Option<Date>,
    pub actual_completion_date: Option<Date>,
}

/// Validate moving `process` to `next` on `today`.
///
/// Entering `active` stamps the start date once; entering `completed` stamps
/// the completion date. Leaving `pending_approval` for `active` requires every
/// approval the template demanded, and entering `completed` requires every
/// task of `process` to be completed.
pub fn transition(process: &Process, next: ProcessStatus, today: Date) -> Result<StatusChange> {
    if process.status == next {
        return Err(OffboardError::validation("status")
            .with_reason(format!("process is already {}", next.as_str())));
    }

    if !process.status.can_transition_to(next) {
        return Err(OffboardError::validation("status").with_reason(format!(
            "cannot move a {} process to {}",
            process.status.as_str(),
            next.as_str()
        )));
    }

    if process.status == ProcessStatus::PendingApproval && next == ProcessStatus::Active {
        let missing = process.missing_approvals();
        if !missing.is_empty() {
            let roles: Vec<&str> = missing.iter().map(ApprovalRole::as_str).collect();
            return Err(OffboardError::validation("status").with_reason(format!(
                "missing approvals: {}",
                roles.join(", ")
            )));
        }
    }

    if next == ProcessStatus::Completed {
        let open: Vec<&str> = process
            .tasks
            .iter()
            .filter(|task| task.status != TaskStatus::Completed)
            .map(|task| task.name.as_str())
            .collect();
        if !open.is_empty() {
            return Err(OffboardError::validation("status").with_reason(format!(
                "{} task(s) still open: {}",
                open.len(),
                open.join(", ")
            )));
        }
    }

    let actual_start_date = match next {
        ProcessStatus::Active => process.actual_start_date.or(Some(today)),
        _ => process.actual_start_date,
    };
    let actual_completion_date = match next {
        ProcessStatus::Completed => Some(today),
        _ => process.actual_completion_date,
    };

    Ok(StatusChange {
        status: next,
        actual_start_date,
        actual_completion_date,
    })
}

/// Validate recording a sign-off for `role`.
pub fn approve(process: &Process, role: ApprovalRole) -> Result<()> {
    if process.status.is_terminal() {
        return Err(OffboardError::validation("status").with_reason(format!(
            "cannot approve a {} process",
            process.status.as_str()
        )));
    }
    if process.approved_at(role).is_some() {
        return Err(OffboardError::validation("role")
            .with_reason(format!("{} approval already recorded", role.as_str())));
    }
    Ok(())
}

/// Resolved task fields after an update.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskChange {
    pub status: TaskStatus,
    pub assignee: Option<String>,
    pub actual_hours: Option<f64>,
    pub blocked_reason: Option<String>,
    pub completed_at: Option<Timestamp>,
}

/// Validate `request` against `task`, its process and its sibling tasks.
///
/// * Tasks of completed or cancelled processes are frozen.
/// * Blocking requires a reason; the reason is dropped once unblocked.
/// * Completion requires every dependency to be completed first.
pub fn update_task(
    process: &Process,
    task: &Task,
    siblings: &[Task],
    request: &UpdateTaskRequest,
    now: Timestamp,
) -> Result<TaskChange> {
    if process.status.is_terminal() {
        return Err(OffboardError::validation("status").with_reason(format!(
            "process {} is {} and its tasks can no longer change",
            process.id,
            process.status.as_str()
        )));
    }

    if request.is_empty() {
        return Err(OffboardError::validation("request").with_reason("nothing to update"));
    }

    if let Some(hours) = request.actual_hours {
        if !hours.is_finite() || hours < 0.0 {
            return Err(OffboardError::validation("actual_hours")
                .with_reason("must be a non-negative number"));
        }
    }

    let status = request.status.unwrap_or(task.status);

    let blocked_reason = if status == TaskStatus::Blocked {
        let reason = request
            .blocked_reason
            .clone()
            .or_else(|| task.blocked_reason.clone())
            .filter(|reason| !reason.trim().is_empty());
        match reason {
            Some(reason) => Some(reason),
            None => {
                return Err(OffboardError::validation("blocked_reason")
                    .with_reason("a reason is required to block a task"))
            }
        }
    } else {
        None
    };

    if status == TaskStatus::Completed && task.status != TaskStatus::Completed {
        let unfinished: Vec<&str> = task
            .depends_on
            .iter()
            .map(|id| {
                siblings
                    .iter()
                    .find(|sibling| sibling.id == *id)
                    .filter(|sibling| sibling.status != TaskStatus::Completed)
                    .map_or_else(
                        || (!siblings.iter().any(|s| s.id == *id)).then_some("unknown task"),
                        |sibling| Some(sibling.name.as_str()),
                    )
            })
            .flatten()
            .collect();
        if !unfinished.is_empty() {
            return Err(OffboardError::validation("status").with_reason(format!(
                "'{}' waits on: {}",
                task.name,
                unfinished.join(", ")
            )));
        }
    }

    let completed_at = match status {
        TaskStatus::Completed => task.completed_at.or(Some(now)),
        _ => None,
    };

    Ok(TaskChange {
        status,
        assignee: request.assignee.clone().or_else(|| task.assignee.clone()),
        actual_hours: request.actual_hours.or(task.actual_hours),
        blocked_reason,
        completed_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixtures::{date, process, task},
        models::ApprovalRequirements,
    };

    #[test]
    fn test_happy_path_transitions() {
        let today = date(2024, 5, 1);
        let mut p = process(1, "Happy", ProcessStatus::Draft);

        for next in [
            ProcessStatus::PendingApproval,
            ProcessStatus::Active,
            ProcessStatus::Completed,
        ] {
            let change = transition(&p, next, today).expect("valid transition");
            p.status = change.status;
            p.actual_start_date = change.actual_start_date;
            p.actual_completion_date = change.actual_completion_date;
        }

        assert_eq!(p.status, ProcessStatus::Completed);
        assert_eq!(p.actual_start_date, Some(today));
        assert_eq!(p.actual_completion_date, Some(today));
    }

    #[test]
    fn test_completion_requires_every_task_done() {
        let today = date(2024, 5, 1);
        let mut p = process(1, "Open work", ProcessStatus::Active);
        p.tasks = vec![
            task(1, 1, TaskStatus::Completed),
            task(2, 1, TaskStatus::Pending),
            task(3, 1, TaskStatus::Blocked),
        ];

        match transition(&p, ProcessStatus::Completed, today) {
            Err(OffboardError::Validation { field, reason }) => {
                assert_eq!(field, "status");
                assert!(reason.contains("2 task(s) still open"));
                assert!(reason.contains("Task 2"));
                assert!(reason.contains("Task 3"));
                assert!(!reason.contains("Task 1"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }

        for t in &mut p.tasks {
            t.status = TaskStatus::Completed;
        }
        let change = transition(&p, ProcessStatus::Completed, today).expect("all tasks done");
        assert_eq!(change.actual_completion_date, Some(today));

        // Cancelling never looks at the tasks.
        p.tasks[0].status = TaskStatus::Pending;
        assert!(transition(&p, ProcessStatus::Cancelled, today).is_ok());
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let today = date(2024, 5, 1);
        let draft = process(1, "Draft", ProcessStatus::Draft);
        assert!(transition(&draft, ProcessStatus::Completed, today).is_err());
        assert!(transition(&draft, ProcessStatus::Draft, today).is_err());

        let done = process(2, "Done", ProcessStatus::Completed);
        for next in ProcessStatus::ALL {
            assert!(transition(&done, next, today).is_err());
        }
    }

    #[test]
    fn test_overdue_branch_keeps_start_date() {
        let mut p = process(1, "Late", ProcessStatus::Active);
        p.actual_start_date = Some(date(2024, 1, 1));

        let overdue = transition(&p, ProcessStatus::Overdue, date(2024, 2, 1)).expect("valid");
        assert_eq!(overdue.actual_start_date, Some(date(2024, 1, 1)));

        p.status = ProcessStatus::Overdue;
        let resumed = transition(&p, ProcessStatus::Active, date(2024, 2, 2)).expect("valid");
        assert_eq!(resumed.actual_start_date, Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_activation_requires_approvals() {
        let mut p = process(1, "Needs sign-off", ProcessStatus::PendingApproval);
        p.required_approvals = ApprovalRequirements {
            manager: true,
            hr: true,
            security: false,
        };
        p.manager_approved_at = Some(Timestamp::UNIX_EPOCH);

        let err = transition(&p, ProcessStatus::Active, date(2024, 1, 1)).expect_err("hr missing");
        assert!(err.to_string().contains("hr"));

        p.hr_approved_at = Some(Timestamp::UNIX_EPOCH);
        assert!(transition(&p, ProcessStatus::Active, date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn test_approve_twice_rejected() {
        let mut p = process(1, "Approvals", ProcessStatus::PendingApproval);
        assert!(approve(&p, ApprovalRole::Security).is_ok());
        p.security_approved_at = Some(Timestamp::UNIX_EPOCH);
        assert!(approve(&p, ApprovalRole::Security).is_err());

        p.status = ProcessStatus::Cancelled;
        assert!(approve(&p, ApprovalRole::Manager).is_err());
    }

    #[test]
    fn test_blocking_requires_reason() {
        let p = process(1, "Active", ProcessStatus::Active);
        let t = task(10, 1, TaskStatus::InProgress);

        let err = update_task(
            &p,
            &t,
            &[t.clone()],
            &UpdateTaskRequest::status(TaskStatus::Blocked),
            Timestamp::UNIX_EPOCH,
        )
        .expect_err("reason required");
        assert!(matches!(err, OffboardError::Validation { ref field, .. } if field == "blocked_reason"));

        let change = update_task(
            &p,
            &t,
            &[t.clone()],
            &UpdateTaskRequest::blocked("Waiting on courier"),
            Timestamp::UNIX_EPOCH,
        )
        .expect("blocked with reason");
        assert_eq!(change.status, TaskStatus::Blocked);
        assert_eq!(change.blocked_reason.as_deref(), Some("Waiting on courier"));
    }

    #[test]
    fn test_unblocking_clears_reason() {
        let p = process(1, "Active", ProcessStatus::Active);
        let mut t = task(10, 1, TaskStatus::Blocked);
        t.blocked_reason = Some("Waiting".to_string());

        let change = update_task(
            &p,
            &t,
            &[t.clone()],
            &UpdateTaskRequest::status(TaskStatus::InProgress),
            Timestamp::UNIX_EPOCH,
        )
        .expect("unblocked");
        assert_eq!(change.blocked_reason, None);
    }

    #[test]
    fn test_completion_waits_on_dependencies() {
        let p = process(1, "Active", ProcessStatus::Active);
        let mut first = task(10, 1, TaskStatus::InProgress);
        first.name = "Return laptop".to_string();
        let mut second = task(11, 1, TaskStatus::Pending);
        second.depends_on = vec![10];
        let siblings = vec![first.clone(), second.clone()];

        let err = update_task(
            &p,
            &second,
            &siblings,
            &UpdateTaskRequest::status(TaskStatus::Completed),
            Timestamp::UNIX_EPOCH,
        )
        .expect_err("dependency unfinished");
        assert!(err.to_string().contains("Return laptop"));

        first.status = TaskStatus::Completed;
        let siblings = vec![first, second.clone()];
        let change = update_task(
            &p,
            &second,
            &siblings,
            &UpdateTaskRequest::status(TaskStatus::Completed),
            Timestamp::UNIX_EPOCH,
        )
        .expect("dependency done");
        assert_eq!(change.completed_at, Some(Timestamp::UNIX_EPOCH));
    }

    #[test]
    fn test_terminal_process_freezes_tasks() {
        let p = process(1, "Done", ProcessStatus::Completed);
        let t = task(10, 1, TaskStatus::Pending);

        assert!(update_task(
            &p,
            &t,
            &[t.clone()],
            &UpdateTaskRequest::status(TaskStatus::Completed),
            Timestamp::UNIX_EPOCH,
        )
        .is_err());
    }

    #[test]
    fn test_negative_hours_rejected() {
        let p = process(1, "Active", ProcessStatus::Active);
        let t = task(10, 1, TaskStatus::Pending);
        let request = UpdateTaskRequest {
            actual_hours: Some(-1.0),
            ..Default::default()
        };

        assert!(update_task(&p, &t, &[t.clone()], &request, Timestamp::UNIX_EPOCH).is_err());
    }
}
