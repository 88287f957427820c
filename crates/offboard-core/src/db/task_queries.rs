//! Task and document queries and updates.

use std::collections::HashMap;

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use super::utils::{get_id, get_optional_id, parse_column, parse_optional_column, split_list};
use crate::{
    error::{DatabaseResultExt, OffboardError, Result},
    lifecycle::TaskChange,
    models::{Document, Task},
};

const TASK_COLUMNS: &str = "id, process_id, template_task_id, name, instructions, category, status, estimated_hours, actual_hours, sort_order, assignee_role, assignee, requires_approval, approver_role, requires_evidence, evidence_types, completed_at, blocked_reason, created_at, updated_at";
const SELECT_TASK_DEPENDENCIES_SQL: &str = "SELECT d.task_id, d.depends_on_id FROM task_dependencies d JOIN tasks t ON t.id = d.task_id WHERE t.process_id = ?1 ORDER BY d.task_id, d.depends_on_id";
const SELECT_DOCUMENTS_SQL: &str = "SELECT d.id, d.task_id, d.name, d.document_type, d.is_mandatory, d.status FROM documents d JOIN tasks t ON t.id = d.task_id WHERE t.process_id = ?1 ORDER BY d.id";
const SELECT_TASK_PROCESS_SQL: &str = "SELECT process_id FROM tasks WHERE id = ?1";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET status = ?1, assignee = ?2, actual_hours = ?3, blocked_reason = ?4, completed_at = ?5, updated_at = ?6 WHERE id = ?7";

impl super::Database {
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: get_id(row, 0)?,
            process_id: get_id(row, 1)?,
            template_task_id: get_optional_id(row, 2)?,
            name: row.get(3)?,
            instructions: row.get(4)?,
            category: parse_column(row, 5)?,
            status: parse_column(row, 6)?,
            estimated_hours: row.get(7)?,
            actual_hours: row.get(8)?,
            sort_order: row.get::<_, i64>(9)? as u32,
            assignee_role: row.get(10)?,
            assignee: row.get(11)?,
            requires_approval: row.get(12)?,
            approver_role: row.get(13)?,
            requires_evidence: row.get(14)?,
            evidence_types: split_list(row.get(15)?),
            depends_on: Vec::new(),
            completed_at: parse_optional_column(row, 16)?,
            blocked_reason: row.get(17)?,
            documents: Vec::new(),
            created_at: parse_column(row, 18)?,
            updated_at: parse_column(row, 19)?,
        })
    }

    /// Loads the tasks of a process in sort order, with their dependencies
    /// and documents.
    pub(super) fn load_tasks(connection: &Connection, process_id: u64) -> Result<Vec<Task>> {
        let query =
            format!("SELECT {TASK_COLUMNS} FROM tasks WHERE process_id = ?1 ORDER BY sort_order, id");
        let mut stmt = connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;
        let mut tasks = stmt
            .query_map(params![process_id as i64], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;

        let mut dependencies: HashMap<u64, Vec<u64>> = HashMap::new();
        let mut stmt = connection
            .prepare(SELECT_TASK_DEPENDENCIES_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![process_id as i64], |row| {
                Ok((get_id(row, 0)?, get_id(row, 1)?))
            })
            .db_context("Failed to query task dependencies")?;
        for row in rows {
            let (task_id, depends_on) = row.db_context("Failed to fetch task dependency")?;
            dependencies.entry(task_id).or_default().push(depends_on);
        }

        let mut documents: HashMap<u64, Vec<Document>> = HashMap::new();
        let mut stmt = connection
            .prepare(SELECT_DOCUMENTS_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![process_id as i64], |row| {
                Ok(Document {
                    id: get_id(row, 0)?,
                    task_id: get_id(row, 1)?,
                    name: row.get(2)?,
                    document_type: row.get(3)?,
                    is_mandatory: row.get(4)?,
                    status: parse_column(row, 5)?,
                })
            })
            .db_context("Failed to query documents")?;
        for row in rows {
            let document = row.db_context("Failed to fetch document")?;
            documents.entry(document.task_id).or_default().push(document);
        }

        for task in &mut tasks {
            task.depends_on = dependencies.remove(&task.id).unwrap_or_default();
            task.documents = documents.remove(&task.id).unwrap_or_default();
        }

        Ok(tasks)
    }

    /// Retrieves a single task with its dependencies and documents.
    pub fn get_task(&self, id: u64) -> Result<Option<Task>> {
        let Some(process_id) = Self::task_process_id(&self.connection, id)? else {
            return Ok(None);
        };

        Ok(Self::load_tasks(&self.connection, process_id)?
            .into_iter()
            .find(|task| task.id == id))
    }

    fn task_process_id(connection: &Connection, task_id: u64) -> Result<Option<u64>> {
        connection
            .query_row(SELECT_TASK_PROCESS_SQL, params![task_id as i64], |row| {
                get_id(row, 0)
            })
            .optional()
            .db_context("Failed to look up task")
    }

    /// Persists a validated task change and recomputes the cached progress
    /// of its process in the same transaction.
    pub fn apply_task_change(&mut self, task_id: u64, change: &TaskChange) -> Result<Task> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let process_id = Self::task_process_id(&tx, task_id)?
            .ok_or(OffboardError::TaskNotFound { id: task_id })?;

        let now = Timestamp::now().to_string();
        tx.execute(
            UPDATE_TASK_SQL,
            params![
                change.status.as_str(),
                change.assignee.as_deref(),
                change.actual_hours,
                change.blocked_reason.as_deref(),
                change.completed_at.map(|at| at.to_string()),
                &now,
                task_id as i64
            ],
        )
        .db_context("Failed to update task")?;

        Self::refresh_progress(&tx, process_id, &now)?;

        tx.commit().db_context("Failed to commit transaction")?;

        log::info!(
            "Task {task_id} of process {process_id} is now {}",
            change.status.as_str()
        );

        self.get_task(task_id)?
            .ok_or(OffboardError::TaskNotFound { id: task_id })
    }
}
