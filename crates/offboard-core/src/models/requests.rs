//! Request types for updating models.

use super::TaskStatus;

/// Changes to apply to a task. Unset fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateTaskRequest {
    pub status: Option<TaskStatus>,
    pub assignee: Option<String>,
    pub actual_hours: Option<f64>,
    /// Required when `status` is `Blocked`
    pub blocked_reason: Option<String>,
}

impl UpdateTaskRequest {
    /// Request that only changes the status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Request that blocks the task with a reason.
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            status: Some(TaskStatus::Blocked),
            blocked_reason: Some(reason.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.assignee.is_none()
            && self.actual_hours.is_none()
            && self.blocked_reason.is_none()
    }
}

impl TryFrom<crate::params::UpdateTask> for UpdateTaskRequest {
    type Error = crate::OffboardError;

    /// Parse and validate the string-typed parameters.
    ///
    /// ```rust
    /// use offboard_core::{models::{TaskStatus, UpdateTaskRequest}, params::UpdateTask};
    ///
    /// let params = UpdateTask {
    ///     id: 3,
    ///     status: Some("blocked".to_string()),
    ///     blocked_reason: Some("Laptop still in transit".to_string()),
    ///     ..Default::default()
    /// };
    /// let request: UpdateTaskRequest = params.try_into()?;
    /// assert_eq!(request.status, Some(TaskStatus::Blocked));
    /// # Ok::<(), offboard_core::OffboardError>(())
    /// ```
    fn try_from(params: crate::params::UpdateTask) -> Result<Self, Self::Error> {
        let status = params.validate()?;

        Ok(Self {
            status,
            assignee: params.assignee,
            actual_hours: params.actual_hours,
            blocked_reason: params.blocked_reason,
        })
    }
}
