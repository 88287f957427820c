//! Task operations.

use jiff::Timestamp;

use super::Offboarding;
use crate::{
    error::{OffboardError, Result},
    lifecycle,
    models::{Task, UpdateTaskRequest},
    params::{Id, UpdateTask},
};

impl Offboarding {
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let id = params.id;
        self.with_db(move |db| db.get_task(id)).await
    }

    /// Validates the update against the task's process and siblings, then
    /// stores it together with the refreshed progress counters.
    ///
    /// # Errors
    ///
    /// * `OffboardError::TaskNotFound` for an unknown id
    /// * `OffboardError::Validation` if the process is closed, a blocked
    ///   task has no reason, or a dependency is still open
    pub async fn update_task(&self, params: &UpdateTask) -> Result<Task> {
        let request = UpdateTaskRequest::try_from(params.clone())?;
        let id = params.id;

        self.with_db(move |db| {
            let task = db.get_task(id)?.ok_or(OffboardError::TaskNotFound { id })?;
            let process = db
                .get_process(task.process_id)?
                .ok_or(OffboardError::ProcessNotFound {
                    id: task.process_id,
                })?;

            let change =
                lifecycle::update_task(&process, &task, &process.tasks, &request, Timestamp::now())?;
            db.apply_task_change(id, &change)
        })
        .await
    }
}
