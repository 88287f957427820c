//! Process operations: start, list, lifecycle transitions and deletion.

use jiff::Timestamp;

use super::{today, Offboarding};
use crate::{
    error::{OffboardError, Result},
    instantiate::instantiate,
    lifecycle,
    models::{ApprovalRole, Process, ProcessFilter, ProcessStatus},
    params::{parse_field, Approve, ChangeStatus, Id, ListProcesses, StartProcess},
    query,
};

impl Offboarding {
    /// Applies a template to a person and stores the resulting process with
    /// its tasks and document placeholders.
    ///
    /// # Errors
    ///
    /// * `OffboardError::TemplateNotFound` / `PersonNotFound` for unknown ids
    /// * `OffboardError::TemplateIntegrity` if the template's dependency graph
    ///   is broken
    /// * `OffboardError::Validation` if the person has no department or
    ///   position, or an option fails to parse
    /// * `OffboardError::DuplicateProcess` if the person already has an open
    ///   process
    pub async fn start_process(&self, params: &StartProcess) -> Result<Process> {
        let options = params.options()?;
        let template_id = params.template_id;
        let person_id = params.person_id;

        self.with_db(move |db| {
            let template = db
                .get_template(template_id)?
                .ok_or(OffboardError::TemplateNotFound { id: template_id })?;
            crate::catalog::validate_template(&template)?;

            let person = db
                .get_person(person_id)?
                .ok_or(OffboardError::PersonNotFound { id: person_id })?;
            let existing = db.processes_for_person(person_id)?;

            let new = instantiate(&template, &person, &options, today(), &existing)?;
            db.insert_process(&new)
        })
        .await
    }

    /// Filtered and sorted processes. Tasks are not loaded; progress comes
    /// from the cached counters.
    pub async fn list_processes(&self, params: &ListProcesses) -> Result<Vec<Process>> {
        let filter = ProcessFilter::try_from(params)?;
        let sort = params.sort()?;

        let processes = self.with_db(|db| db.list_processes(false)).await?;

        let mut matching: Vec<Process> = query::filter_processes(&processes, &filter, today())
            .into_iter()
            .cloned()
            .collect();
        query::sort_processes(&mut matching, sort);
        Ok(matching)
    }

    pub async fn get_process(&self, params: &Id) -> Result<Option<Process>> {
        let id = params.id;
        self.with_db(move |db| db.get_process(id)).await
    }

    /// Moves a process along its lifecycle.
    pub async fn change_status(&self, params: &ChangeStatus) -> Result<Process> {
        let next: ProcessStatus = parse_field("status", Some(params.status.as_str()))?
            .ok_or_else(|| OffboardError::validation("status").with_reason("is required"))?;
        let id = params.id;

        self.with_db(move |db| {
            let process = db
                .get_process(id)?
                .ok_or(OffboardError::ProcessNotFound { id })?;
            let change = lifecycle::transition(&process, next, today())?;
            db.update_process_status(id, &change)?;
            db.get_process(id)?
                .ok_or(OffboardError::ProcessNotFound { id })
        })
        .await
    }

    /// Records a sign-off by `params.role`.
    pub async fn approve_process(&self, params: &Approve) -> Result<Process> {
        let role: ApprovalRole = parse_field("role", Some(params.role.as_str()))?
            .ok_or_else(|| OffboardError::validation("role").with_reason("is required"))?;
        let id = params.id;

        self.with_db(move |db| {
            let process = db
                .get_process(id)?
                .ok_or(OffboardError::ProcessNotFound { id })?;
            lifecycle::approve(&process, role)?;
            db.record_approval(id, role, Timestamp::now())?;
            db.get_process(id)?
                .ok_or(OffboardError::ProcessNotFound { id })
        })
        .await
    }

    /// Permanently deletes a process with its tasks and documents.
    pub(crate) async fn delete_process_by_id(&self, params: &Id) -> Result<()> {
        let id = params.id;
        self.with_db(move |db| db.delete_process(id)).await
    }
}
