//! Completion metrics for processes.
//!
//! Progress is derived from the best data available: the task collection when
//! it is loaded, the counters cached on the process otherwise, and a fixed
//! per-status estimate when neither exists.

use crate::models::{CustomFields, Process, ProcessStatus, Progress, ProgressSource, Task, TaskStatus};

/// Compute display progress for `process`.
///
/// `tasks` takes precedence whenever it is `Some`, even if empty. Never fails;
/// missing counters read as zero.
pub fn compute_progress(process: &Process, tasks: Option<&[Task]>) -> Progress {
    if let Some(tasks) = tasks {
        return progress_from_tasks(tasks);
    }

    let cached = &process.custom_fields;
    if let Some(total) = cached.total_tasks {
        let completed = cached.completed_tasks.unwrap_or(0).min(total);
        return Progress {
            percentage: cached
                .completion_percentage
                .map(|p| p.min(100))
                .unwrap_or_else(|| percentage(completed, total)),
            total_tasks: total,
            completed_tasks: completed,
            overdue_tasks: cached.overdue_tasks.unwrap_or(0),
            source: ProgressSource::Cached,
        };
    }

    Progress {
        percentage: estimate_from_status(process.status),
        total_tasks: 0,
        completed_tasks: 0,
        overdue_tasks: 0,
        source: ProgressSource::StatusEstimate,
    }
}

/// Count tasks by state.
pub fn progress_from_tasks(tasks: &[Task]) -> Progress {
    let total = tasks.len() as u32;
    let completed = count(tasks, TaskStatus::Completed);
    let overdue = count(tasks, TaskStatus::Overdue);

    Progress {
        percentage: percentage(completed, total),
        total_tasks: total,
        completed_tasks: completed,
        overdue_tasks: overdue,
        source: ProgressSource::Tasks,
    }
}

fn count(tasks: &[Task], status: TaskStatus) -> u32 {
    tasks.iter().filter(|task| task.status == status).count() as u32
}

/// Rough completion for a process whose tasks are not known.
pub fn estimate_from_status(status: ProcessStatus) -> u8 {
    match status {
        ProcessStatus::Draft => 0,
        ProcessStatus::PendingApproval => 10,
        ProcessStatus::Active => 50,
        ProcessStatus::Overdue => 30,
        ProcessStatus::Completed => 100,
        ProcessStatus::Cancelled => 0,
    }
}

/// `100 * completed / total`, rounded half up and clamped to 0..=100.
/// Zero when there are no tasks.
///
/// ```rust
/// use offboard_core::progress::percentage;
///
/// assert_eq!(percentage(5, 12), 42);
/// assert_eq!(percentage(0, 0), 0);
/// ```
pub fn percentage(completed: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = u64::from(completed.min(total));
    let total = u64::from(total);
    ((200 * completed + total) / (2 * total)).min(100) as u8
}

/// Copy of `fields` with the progress counters replaced by `progress`.
/// Extra keys are kept.
pub fn cached_fields(progress: &Progress, fields: &CustomFields) -> CustomFields {
    CustomFields {
        completion_percentage: Some(progress.percentage),
        total_tasks: Some(progress.total_tasks),
        completed_tasks: Some(progress.completed_tasks),
        overdue_tasks: Some(progress.overdue_tasks),
        extra: fields.extra.clone(),
    }
}
