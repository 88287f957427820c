//! Process CRUD operations and queries.

use std::collections::HashMap;

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use super::utils::{
    conversion_error, get_id, is_unique_violation, join_list, parse_column,
    parse_optional_column,
};
use crate::{
    error::{DatabaseResultExt, OffboardError, Result},
    instantiate::remap_dependencies,
    lifecycle::StatusChange,
    models::{ApprovalRequirements, ApprovalRole, CustomFields, NewProcess, Process, Progress},
    progress::{cached_fields, progress_from_tasks},
};

const INSERT_PROCESS_SQL: &str = "INSERT INTO processes (template_id, name, person_id, employee_name, department, role, seniority_level, status, priority, target_completion_date, estimated_total_hours, complexity_score, requires_manager_approval, requires_hr_approval, requires_security_approval, notes, custom_fields, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (process_id, template_task_id, name, instructions, category, status, estimated_hours, sort_order, assignee_role, requires_approval, approver_role, requires_evidence, evidence_types, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)";
const INSERT_TASK_DEPENDENCY_SQL: &str =
    "INSERT INTO task_dependencies (task_id, depends_on_id) VALUES (?1, ?2)";
const INSERT_DOCUMENT_SQL: &str =
    "INSERT INTO documents (task_id, name, document_type, is_mandatory, status) VALUES (?1, ?2, ?3, ?4, ?5)";

const PROCESS_COLUMNS: &str = "id, template_id, name, person_id, employee_name, department, role, seniority_level, status, priority, target_completion_date, actual_start_date, actual_completion_date, estimated_total_hours, complexity_score, requires_manager_approval, requires_hr_approval, requires_security_approval, manager_approved_at, hr_approved_at, security_approved_at, notes, custom_fields, created_at, updated_at";
const SELECT_OPEN_PROCESS_SQL: &str = "SELECT id FROM processes WHERE person_id = ?1 AND status NOT IN ('completed', 'cancelled') LIMIT 1";
const SELECT_CUSTOM_FIELDS_SQL: &str = "SELECT custom_fields FROM processes WHERE id = ?1";

const UPDATE_PROCESS_STATUS_SQL: &str = "UPDATE processes SET status = ?1, actual_start_date = ?2, actual_completion_date = ?3, updated_at = ?4 WHERE id = ?5";
const UPDATE_MANAGER_APPROVAL_SQL: &str =
    "UPDATE processes SET manager_approved_at = ?1, updated_at = ?1 WHERE id = ?2";
const UPDATE_HR_APPROVAL_SQL: &str =
    "UPDATE processes SET hr_approved_at = ?1, updated_at = ?1 WHERE id = ?2";
const UPDATE_SECURITY_APPROVAL_SQL: &str =
    "UPDATE processes SET security_approved_at = ?1, updated_at = ?1 WHERE id = ?2";
const UPDATE_CUSTOM_FIELDS_SQL: &str =
    "UPDATE processes SET custom_fields = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_PROCESS_SQL: &str = "DELETE FROM processes WHERE id = ?1";

impl super::Database {
    fn build_process_from_row(row: &rusqlite::Row) -> rusqlite::Result<Process> {
        let custom_fields: String = row.get(22)?;
        let custom_fields = serde_json::from_str::<CustomFields>(&custom_fields)
            .map_err(|e| conversion_error(22, e))?;

        Ok(Process {
            id: get_id(row, 0)?,
            template_id: get_id(row, 1)?,
            name: row.get(2)?,
            person_id: get_id(row, 3)?,
            employee_name: row.get(4)?,
            department: row.get(5)?,
            role: row.get(6)?,
            seniority_level: row.get(7)?,
            status: parse_column(row, 8)?,
            priority: parse_column(row, 9)?,
            target_completion_date: parse_optional_column(row, 10)?,
            actual_start_date: parse_optional_column(row, 11)?,
            actual_completion_date: parse_optional_column(row, 12)?,
            estimated_total_hours: row.get(13)?,
            complexity_score: row.get::<_, i64>(14)? as u8,
            required_approvals: ApprovalRequirements {
                manager: row.get(15)?,
                hr: row.get(16)?,
                security: row.get(17)?,
            },
            manager_approved_at: parse_optional_column(row, 18)?,
            hr_approved_at: parse_optional_column(row, 19)?,
            security_approved_at: parse_optional_column(row, 20)?,
            notes: row.get(21)?,
            custom_fields,
            created_at: parse_column(row, 23)?,
            updated_at: parse_column(row, 24)?,
            tasks: Vec::new(),
        })
    }

    /// Stores a freshly instantiated process with its tasks, task
    /// dependencies and document placeholders in one transaction.
    ///
    /// # Errors
    ///
    /// `OffboardError::DuplicateProcess` if the person already has a process
    /// that is neither completed nor cancelled.
    pub fn insert_process(&mut self, new: &NewProcess) -> Result<Process> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        if let Some(existing) = Self::open_process_id(&tx, new.person_id)? {
            return Err(OffboardError::DuplicateProcess {
                person_id: new.person_id,
                existing_process_id: existing,
            });
        }

        let now = Timestamp::now().to_string();

        let inserted = tx.execute(
            INSERT_PROCESS_SQL,
            params![
                new.template_id as i64,
                &new.name,
                new.person_id as i64,
                &new.employee_name,
                &new.department,
                &new.role,
                new.seniority_level.as_deref(),
                new.status.as_str(),
                new.priority.as_str(),
                new.target_completion_date.map(|d| d.to_string()),
                new.estimated_total_hours,
                i64::from(new.complexity_score),
                new.required_approvals.manager,
                new.required_approvals.hr,
                new.required_approvals.security,
                new.notes.as_deref(),
                "{}",
                &now,
                &now
            ],
        );
        if let Err(e) = inserted {
            if is_unique_violation(&e) {
                if let Some(existing) = Self::open_process_id(&tx, new.person_id)? {
                    return Err(OffboardError::DuplicateProcess {
                        person_id: new.person_id,
                        existing_process_id: existing,
                    });
                }
            }
            return Err(OffboardError::database("Failed to insert process").with_source(e));
        }

        let process_id = tx.last_insert_rowid() as u64;

        let mut assigned = HashMap::with_capacity(new.tasks.len());
        let mut task_ids = Vec::with_capacity(new.tasks.len());
        for task in &new.tasks {
            tx.execute(
                INSERT_TASK_SQL,
                params![
                    process_id as i64,
                    task.template_task_id as i64,
                    &task.name,
                    task.instructions.as_deref(),
                    task.category.as_str(),
                    task.status.as_str(),
                    task.estimated_hours,
                    i64::from(task.sort_order),
                    task.assignee_role.as_deref(),
                    task.requires_approval,
                    task.approver_role.as_deref(),
                    task.requires_evidence,
                    join_list(&task.evidence_types),
                    &now,
                    &now
                ],
            )
            .db_context("Failed to insert task")?;
            let task_id = tx.last_insert_rowid() as u64;
            assigned.insert(task.template_task_id, task_id);
            task_ids.push(task_id);

            for document in &task.documents {
                tx.execute(
                    INSERT_DOCUMENT_SQL,
                    params![
                        task_id as i64,
                        &document.name,
                        &document.document_type,
                        document.is_mandatory,
                        document.status.as_str()
                    ],
                )
                .db_context("Failed to insert document")?;
            }
        }

        let dependencies = remap_dependencies(&new.tasks, &assigned)?;
        for (task_id, depends_on) in task_ids.iter().zip(&dependencies) {
            for dependency in depends_on {
                tx.execute(
                    INSERT_TASK_DEPENDENCY_SQL,
                    params![*task_id as i64, *dependency as i64],
                )
                .db_context("Failed to insert task dependency")?;
            }
        }

        Self::refresh_progress(&tx, process_id, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        log::info!(
            "Created process {process_id} '{}' for person {} with {} tasks",
            new.name,
            new.person_id,
            new.tasks.len()
        );

        self.get_process(process_id)?
            .ok_or(OffboardError::ProcessNotFound { id: process_id })
    }

    fn open_process_id(connection: &Connection, person_id: u64) -> Result<Option<u64>> {
        connection
            .query_row(SELECT_OPEN_PROCESS_SQL, params![person_id as i64], |row| {
                get_id(row, 0)
            })
            .optional()
            .db_context("Failed to check for open processes")
    }

    /// Recount the tasks of a process and cache the counters in its custom
    /// fields.
    pub(super) fn refresh_progress(
        connection: &Connection,
        process_id: u64,
        now: &str,
    ) -> Result<Progress> {
        let stored: String = connection
            .query_row(SELECT_CUSTOM_FIELDS_SQL, params![process_id as i64], |row| {
                row.get(0)
            })
            .optional()
            .db_context("Failed to read custom fields")?
            .ok_or(OffboardError::ProcessNotFound { id: process_id })?;
        let fields: CustomFields = serde_json::from_str(&stored)?;

        let tasks = Self::load_tasks(connection, process_id)?;
        let progress = progress_from_tasks(&tasks);
        let updated = serde_json::to_string(&cached_fields(&progress, &fields))?;

        connection
            .execute(
                UPDATE_CUSTOM_FIELDS_SQL,
                params![updated, now, process_id as i64],
            )
            .db_context("Failed to cache process progress")?;

        log::debug!(
            "Process {process_id} progress: {}/{} tasks ({}%)",
            progress.completed_tasks,
            progress.total_tasks,
            progress.percentage
        );
        Ok(progress)
    }

    /// Retrieves a process with its tasks.
    pub fn get_process(&self, id: u64) -> Result<Option<Process>> {
        let query = format!("SELECT {PROCESS_COLUMNS} FROM processes WHERE id = ?1");
        let process = self
            .connection
            .query_row(&query, params![id as i64], Self::build_process_from_row)
            .optional()
            .db_context("Failed to query process")?;

        match process {
            Some(mut process) => {
                process.tasks = Self::load_tasks(&self.connection, process.id)?;
                Ok(Some(process))
            }
            None => Ok(None),
        }
    }

    /// Lists every process in creation order. Tasks are only loaded when
    /// `include_tasks` is set; otherwise progress comes from the cached
    /// counters.
    pub fn list_processes(&self, include_tasks: bool) -> Result<Vec<Process>> {
        let query = format!("SELECT {PROCESS_COLUMNS} FROM processes ORDER BY id");
        self.query_processes(&query, &[], include_tasks)
    }

    /// Every process ever started for `person_id`, oldest first.
    pub fn processes_for_person(&self, person_id: u64) -> Result<Vec<Process>> {
        let query =
            format!("SELECT {PROCESS_COLUMNS} FROM processes WHERE person_id = ?1 ORDER BY id");
        self.query_processes(&query, &[&(person_id as i64) as &dyn rusqlite::ToSql], false)
    }

    fn query_processes(
        &self,
        query: &str,
        params: &[&dyn rusqlite::ToSql],
        include_tasks: bool,
    ) -> Result<Vec<Process>> {
        let mut stmt = self
            .connection
            .prepare(query)
            .db_context("Failed to prepare query")?;

        let mut processes = stmt
            .query_map(params, Self::build_process_from_row)
            .db_context("Failed to query processes")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch processes")?;

        if include_tasks {
            for process in &mut processes {
                process.tasks = Self::load_tasks(&self.connection, process.id)?;
            }
        }

        Ok(processes)
    }

    /// Persists a validated status transition.
    pub fn update_process_status(&mut self, id: u64, change: &StatusChange) -> Result<()> {
        let now = Timestamp::now().to_string();
        let rows_affected = self
            .connection
            .execute(
                UPDATE_PROCESS_STATUS_SQL,
                params![
                    change.status.as_str(),
                    change.actual_start_date.map(|d| d.to_string()),
                    change.actual_completion_date.map(|d| d.to_string()),
                    &now,
                    id as i64
                ],
            )
            .db_context("Failed to update process status")?;

        if rows_affected == 0 {
            return Err(OffboardError::ProcessNotFound { id });
        }

        log::info!("Process {id} is now {}", change.status.as_str());
        Ok(())
    }

    /// Records a sign-off time for `role`.
    pub fn record_approval(&mut self, id: u64, role: ApprovalRole, at: Timestamp) -> Result<()> {
        let sql = match role {
            ApprovalRole::Manager => UPDATE_MANAGER_APPROVAL_SQL,
            ApprovalRole::Hr => UPDATE_HR_APPROVAL_SQL,
            ApprovalRole::Security => UPDATE_SECURITY_APPROVAL_SQL,
        };
        let rows_affected = self
            .connection
            .execute(sql, params![at.to_string(), id as i64])
            .db_context("Failed to record approval")?;

        if rows_affected == 0 {
            return Err(OffboardError::ProcessNotFound { id });
        }

        log::info!("Recorded {} approval for process {id}", role.as_str());
        Ok(())
    }

    /// Permanently deletes a process together with its tasks and documents.
    pub fn delete_process(&mut self, id: u64) -> Result<()> {
        let rows_affected = self
            .connection
            .execute(DELETE_PROCESS_SQL, params![id as i64])
            .db_context("Failed to delete process")?;

        if rows_affected == 0 {
            return Err(OffboardError::ProcessNotFound { id });
        }

        log::info!("Deleted process {id}");
        Ok(())
    }
}
