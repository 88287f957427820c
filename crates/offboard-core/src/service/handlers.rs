//! Operations that return display wrappers for the CLI and MCP server.

use super::{Offboarding, SeedReport};
use crate::{
    display::{
        CreateResult, DeleteResult, OperationStatus, People, ProcessSummaries, Templates,
        UpdateResult,
    },
    error::{OffboardError, Result},
    models::{Person, Process, ProcessSummary, Task, Template, UpdateTaskRequest},
    params::{
        AddPerson, ApplicableTemplates, Approve, ChangeStatus, DeleteProcess, DeleteTemplate, Id,
        ListPeople, ListProcesses, Seed, StartProcess, UpdateTask,
    },
};

impl Offboarding {
    pub async fn list_templates_display(&self) -> Result<Templates> {
        Ok(Templates(self.list_templates().await?))
    }

    pub async fn applicable_templates_display(
        &self,
        params: &ApplicableTemplates,
    ) -> Result<Templates> {
        Ok(Templates(self.applicable_templates(params).await?))
    }

    /// Validates a stored template and reports the outcome.
    pub async fn validate_template_status(&self, params: &Id) -> Result<OperationStatus> {
        match self.validate_template(params).await {
            Ok(template) => {
                let with_dependencies = template
                    .tasks
                    .iter()
                    .filter(|task| !task.depends_on.is_empty())
                    .count();
                Ok(
                    OperationStatus::success(format!("Template '{}' is valid", template.name))
                        .with_details([
                            format!("Scope: {}", template.scope),
                            format!(
                                "{} tasks, {with_dependencies} with dependencies",
                                template.tasks.len()
                            ),
                        ]),
                )
            }
            Err(OffboardError::TemplateIntegrity { template, reason }) => Ok(
                OperationStatus::failure(format!("Template '{template}' failed validation"))
                    .with_details([reason]),
            ),
            Err(e) => Err(e),
        }
    }

    /// Process list as summaries with progress.
    ///
    /// ```rust,no_run
    /// # use offboard_core::{params::ListProcesses, OffboardingBuilder};
    /// # async {
    /// let service = OffboardingBuilder::new().build().await?;
    /// let params = ListProcesses {
    ///     status: Some("active".to_string()),
    ///     ..Default::default()
    /// };
    /// let summaries = service.list_processes_summary(&params).await?;
    /// println!("{summaries}");
    /// # Result::<(), offboard_core::OffboardError>::Ok(())
    /// # };
    /// ```
    pub async fn list_processes_summary(&self, params: &ListProcesses) -> Result<ProcessSummaries> {
        let processes = self.list_processes(params).await?;
        let summaries: Vec<ProcessSummary> = processes.iter().map(Into::into).collect();
        Ok(ProcessSummaries(summaries))
    }

    pub async fn start_process_result(&self, params: &StartProcess) -> Result<CreateResult<Process>> {
        Ok(CreateResult::new(self.start_process(params).await?))
    }

    pub async fn change_status_result(&self, params: &ChangeStatus) -> Result<UpdateResult<Process>> {
        let process = self.change_status(params).await?;
        let change = format!("Status: {}", process.status);
        Ok(UpdateResult::with_changes(process, vec![change]))
    }

    pub async fn approve_process_result(&self, params: &Approve) -> Result<UpdateResult<Process>> {
        let process = self.approve_process(params).await?;
        let change = format!("Approved by {}", params.role.to_lowercase());
        Ok(UpdateResult::with_changes(process, vec![change]))
    }

    /// Deletes a process after explicit confirmation, returning what was
    /// deleted, or `None` if the process did not exist.
    ///
    /// # Errors
    ///
    /// `OffboardError::Validation` if `confirmed` is false.
    pub async fn delete_process(&self, params: &DeleteProcess) -> Result<Option<DeleteResult<Process>>> {
        if !params.confirmed {
            return Err(OffboardError::validation("confirmed").with_reason(
                "process deletion requires explicit confirmation; set 'confirmed' to true",
            ));
        }

        let id = Id { id: params.id };
        let Some(process) = self.get_process(&id).await? else {
            return Ok(None);
        };
        self.delete_process_by_id(&id).await?;

        Ok(Some(DeleteResult::new(process)))
    }

    /// Deletes a template that no process references.
    ///
    /// # Errors
    ///
    /// `OffboardError::Validation` if `confirmed` is false or the template is
    /// still in use.
    pub async fn delete_template(
        &self,
        params: &DeleteTemplate,
    ) -> Result<Option<DeleteResult<Template>>> {
        if !params.confirmed {
            return Err(OffboardError::validation("confirmed").with_reason(
                "template deletion requires explicit confirmation; set 'confirmed' to true",
            ));
        }

        Ok(self
            .delete_template_by_id(&Id { id: params.id })
            .await?
            .map(DeleteResult::new))
    }

    pub async fn update_task_result(&self, params: &UpdateTask) -> Result<UpdateResult<Task>> {
        let request = UpdateTaskRequest::try_from(params.clone())?;
        let task = self.update_task(params).await?;
        Ok(UpdateResult::with_changes(task, describe_changes(&request)))
    }

    pub async fn add_person_result(&self, params: &AddPerson) -> Result<CreateResult<Person>> {
        Ok(CreateResult::new(self.add_person(params).await?))
    }

    pub async fn list_people_display(&self, params: &ListPeople) -> Result<People> {
        Ok(People(self.list_people(params).await?))
    }

    pub async fn seed_status(&self, params: &Seed) -> Result<OperationStatus> {
        let SeedReport {
            templates_created,
            templates_skipped,
            people_created,
        } = self.seed(params).await?;

        Ok(OperationStatus::success(format!(
            "Seeded {templates_created} templates ({templates_skipped} already present) and {people_created} people"
        )))
    }
}

fn describe_changes(request: &UpdateTaskRequest) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(status) = request.status {
        changes.push(format!("Status: {}", status.as_str()));
    }
    if let Some(assignee) = &request.assignee {
        changes.push(format!("Assignee: {assignee}"));
    }
    if let Some(hours) = request.actual_hours {
        changes.push(format!("Actual hours: {hours:.1}"));
    }
    if let Some(reason) = &request.blocked_reason {
        changes.push(format!("Blocked reason: {reason}"));
    }
    changes
}
