//! Template CRUD operations and queries.

use std::collections::HashMap;

use jiff::Timestamp;
use rusqlite::{params, Connection, OptionalExtension};

use super::utils::{get_id, is_unique_violation, join_list, parse_column, split_list};
use crate::{
    catalog::{check_dependency_graph, check_scope, DependencyNode},
    error::{DatabaseResultExt, OffboardError, Result},
    models::{ApprovalRequirements, DocumentTemplate, NewTemplate, TaskTemplate, Template},
};

const INSERT_TEMPLATE_SQL: &str = "INSERT INTO templates (name, description, scope, department, role_category, seniority_level, estimated_duration_days, complexity_score, is_default, requires_manager_approval, requires_hr_approval, requires_security_approval, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)";
const INSERT_TASK_TEMPLATE_SQL: &str = "INSERT INTO task_templates (template_id, name, instructions, category, estimated_hours, sort_order, default_assignee_role, requires_approval, approver_role, requires_evidence, evidence_types) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const INSERT_TASK_TEMPLATE_DEPENDENCY_SQL: &str =
    "INSERT INTO task_template_dependencies (task_template_id, depends_on_id) VALUES (?1, ?2)";
const INSERT_DOCUMENT_TEMPLATE_SQL: &str = "INSERT INTO document_templates (task_template_id, name, document_type, is_mandatory) VALUES (?1, ?2, ?3, ?4)";

const TEMPLATE_COLUMNS: &str = "id, name, description, scope, department, role_category, seniority_level, estimated_duration_days, complexity_score, is_default, requires_manager_approval, requires_hr_approval, requires_security_approval, created_at, updated_at";
const SELECT_TASK_TEMPLATES_SQL: &str = "SELECT id, template_id, name, instructions, category, estimated_hours, sort_order, default_assignee_role, requires_approval, approver_role, requires_evidence, evidence_types FROM task_templates WHERE template_id = ?1 ORDER BY sort_order";
const SELECT_TASK_TEMPLATE_DEPENDENCIES_SQL: &str = "SELECT d.task_template_id, d.depends_on_id FROM task_template_dependencies d JOIN task_templates t ON t.id = d.task_template_id WHERE t.template_id = ?1 ORDER BY d.task_template_id, d.depends_on_id";
const SELECT_DOCUMENT_TEMPLATES_SQL: &str = "SELECT d.id, d.task_template_id, d.name, d.document_type, d.is_mandatory FROM document_templates d JOIN task_templates t ON t.id = d.task_template_id WHERE t.template_id = ?1 ORDER BY d.id";

const CHECK_TEMPLATE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM templates WHERE id = ?1)";
const COUNT_TEMPLATE_PROCESSES_SQL: &str = "SELECT COUNT(*) FROM processes WHERE template_id = ?1";
const DELETE_TEMPLATE_SQL: &str = "DELETE FROM templates WHERE id = ?1";

/// Upper bound of the schema's `complexity_score` CHECK.
const MAX_COMPLEXITY_SCORE: u8 = 10;

impl super::Database {
    fn build_template_from_row(row: &rusqlite::Row) -> rusqlite::Result<Template> {
        Ok(Template {
            id: get_id(row, 0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            scope: parse_column(row, 3)?,
            department: row.get(4)?,
            role_category: row.get(5)?,
            seniority_level: row.get(6)?,
            estimated_duration_days: row.get::<_, i64>(7)? as u32,
            complexity_score: row.get::<_, i64>(8)? as u8,
            is_default: row.get(9)?,
            approvals: ApprovalRequirements {
                manager: row.get(10)?,
                hr: row.get(11)?,
                security: row.get(12)?,
            },
            created_at: parse_column(row, 13)?,
            updated_at: parse_column(row, 14)?,
            tasks: Vec::new(),
        })
    }

    fn build_task_template_from_row(row: &rusqlite::Row) -> rusqlite::Result<TaskTemplate> {
        Ok(TaskTemplate {
            id: get_id(row, 0)?,
            template_id: get_id(row, 1)?,
            name: row.get(2)?,
            instructions: row.get(3)?,
            category: parse_column(row, 4)?,
            estimated_hours: row.get(5)?,
            sort_order: row.get::<_, i64>(6)? as u32,
            default_assignee_role: row.get(7)?,
            requires_approval: row.get(8)?,
            approver_role: row.get(9)?,
            requires_evidence: row.get(10)?,
            evidence_types: split_list(row.get(11)?),
            depends_on: Vec::new(),
            documents: Vec::new(),
        })
    }

    /// Creates a template with its task blueprints, dependencies and
    /// document requirements in one transaction.
    ///
    /// The template is validated before anything is written: scope filters
    /// must agree with the scope and dependencies (indexes into
    /// `new.tasks`) must form a DAG.
    pub fn create_template(&mut self, new: &NewTemplate) -> Result<Template> {
        Self::validate_new_template(new)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now().to_string();

        tx.execute(
            INSERT_TEMPLATE_SQL,
            params![
                new.name.trim(),
                new.description.as_deref(),
                new.scope.as_str(),
                new.department.as_deref(),
                new.role_category.as_deref(),
                new.seniority_level.as_deref(),
                i64::from(new.estimated_duration_days),
                i64::from(new.complexity_score),
                new.is_default,
                new.approvals.manager,
                new.approvals.hr,
                new.approvals.security,
                &now,
                &now
            ],
        )
        .map_err(|e| {
            if is_unique_violation(&e) {
                OffboardError::validation("name")
                    .with_reason(format!("a template named '{}' already exists", new.name.trim()))
            } else {
                OffboardError::database("Failed to insert template").with_source(e)
            }
        })?;

        let template_id = tx.last_insert_rowid();

        let mut task_ids = Vec::with_capacity(new.tasks.len());
        for (sort_order, task) in new.tasks.iter().enumerate() {
            tx.execute(
                INSERT_TASK_TEMPLATE_SQL,
                params![
                    template_id,
                    &task.name,
                    task.instructions.as_deref(),
                    task.category.as_str(),
                    task.estimated_hours,
                    sort_order as i64,
                    task.default_assignee_role.as_deref(),
                    task.requires_approval,
                    task.approver_role.as_deref(),
                    task.requires_evidence,
                    join_list(&task.evidence_types)
                ],
            )
            .db_context("Failed to insert task template")?;
            let task_id = tx.last_insert_rowid();
            task_ids.push(task_id);

            for document in &task.documents {
                tx.execute(
                    INSERT_DOCUMENT_TEMPLATE_SQL,
                    params![task_id, &document.name, &document.document_type, document.is_mandatory],
                )
                .db_context("Failed to insert document template")?;
            }
        }

        for (task, task_id) in new.tasks.iter().zip(&task_ids) {
            for dependency in &task.depends_on {
                tx.execute(
                    INSERT_TASK_TEMPLATE_DEPENDENCY_SQL,
                    params![task_id, task_ids[*dependency]],
                )
                .db_context("Failed to insert task template dependency")?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        log::info!(
            "Created template {template_id} '{}' with {} tasks",
            new.name.trim(),
            new.tasks.len()
        );

        self.get_template(template_id as u64)?
            .ok_or(OffboardError::TemplateNotFound {
                id: template_id as u64,
            })
    }

    fn validate_new_template(new: &NewTemplate) -> Result<()> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(OffboardError::validation("name").with_reason("cannot be empty"));
        }
        if new.complexity_score > MAX_COMPLEXITY_SCORE {
            return Err(OffboardError::validation("complexity_score").with_reason(format!(
                "{} is outside 0..={MAX_COMPLEXITY_SCORE}",
                new.complexity_score
            )));
        }
        if let Some(task) = new
            .tasks
            .iter()
            .find(|task| !task.estimated_hours.is_finite() || task.estimated_hours < 0.0)
        {
            return Err(OffboardError::validation("estimated_hours")
                .with_reason(format!("task '{}' has a negative estimate", task.name)));
        }

        check_scope(
            name,
            new.scope,
            new.department.as_deref(),
            new.role_category.as_deref(),
        )?;

        // Dependencies are positions until the rows exist.
        let positions: Vec<Vec<u64>> = new
            .tasks
            .iter()
            .map(|task| task.depends_on.iter().map(|&i| i as u64).collect())
            .collect();
        let nodes: Vec<DependencyNode<'_>> = new
            .tasks
            .iter()
            .zip(&positions)
            .enumerate()
            .map(|(position, (task, depends_on))| DependencyNode {
                id: position as u64,
                name: &task.name,
                depends_on,
            })
            .collect();
        check_dependency_graph(name, &nodes)
    }

    /// Retrieves a template with its task blueprints.
    pub fn get_template(&self, id: u64) -> Result<Option<Template>> {
        let query = format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = ?1");
        let template = self
            .connection
            .query_row(&query, params![id as i64], Self::build_template_from_row)
            .optional()
            .db_context("Failed to query template")?;

        match template {
            Some(mut template) => {
                template.tasks = Self::load_task_templates(&self.connection, template.id)?;
                Ok(Some(template))
            }
            None => Ok(None),
        }
    }

    /// Lists every template with its task blueprints, ordered by name.
    pub fn list_templates(&self) -> Result<Vec<Template>> {
        let query = format!("SELECT {TEMPLATE_COLUMNS} FROM templates ORDER BY name");
        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let mut templates = stmt
            .query_map([], Self::build_template_from_row)
            .db_context("Failed to query templates")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch templates")?;

        for template in &mut templates {
            template.tasks = Self::load_task_templates(&self.connection, template.id)?;
        }

        Ok(templates)
    }

    fn load_task_templates(connection: &Connection, template_id: u64) -> Result<Vec<TaskTemplate>> {
        let mut stmt = connection
            .prepare(SELECT_TASK_TEMPLATES_SQL)
            .db_context("Failed to prepare query")?;
        let mut tasks = stmt
            .query_map(params![template_id as i64], Self::build_task_template_from_row)
            .db_context("Failed to query task templates")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch task templates")?;

        let mut dependencies: HashMap<u64, Vec<u64>> = HashMap::new();
        let mut stmt = connection
            .prepare(SELECT_TASK_TEMPLATE_DEPENDENCIES_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![template_id as i64], |row| {
                Ok((get_id(row, 0)?, get_id(row, 1)?))
            })
            .db_context("Failed to query task template dependencies")?;
        for row in rows {
            let (task_id, depends_on) = row.db_context("Failed to fetch dependency")?;
            dependencies.entry(task_id).or_default().push(depends_on);
        }

        let mut documents: HashMap<u64, Vec<DocumentTemplate>> = HashMap::new();
        let mut stmt = connection
            .prepare(SELECT_DOCUMENT_TEMPLATES_SQL)
            .db_context("Failed to prepare query")?;
        let rows = stmt
            .query_map(params![template_id as i64], |row| {
                Ok(DocumentTemplate {
                    id: get_id(row, 0)?,
                    task_template_id: get_id(row, 1)?,
                    name: row.get(2)?,
                    document_type: row.get(3)?,
                    is_mandatory: row.get(4)?,
                })
            })
            .db_context("Failed to query document templates")?;
        for row in rows {
            let document = row.db_context("Failed to fetch document template")?;
            documents
                .entry(document.task_template_id)
                .or_default()
                .push(document);
        }

        for task in &mut tasks {
            task.depends_on = dependencies.remove(&task.id).unwrap_or_default();
            task.documents = documents.remove(&task.id).unwrap_or_default();
        }

        Ok(tasks)
    }

    /// Deletes a template and its blueprints. Templates referenced by a
    /// process cannot be deleted.
    pub fn delete_template(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_TEMPLATE_EXISTS_SQL, params![id as i64], |row| row.get(0))
            .db_context("Failed to check template existence")?;
        if !exists {
            return Err(OffboardError::TemplateNotFound { id });
        }

        let in_use: i64 = tx
            .query_row(COUNT_TEMPLATE_PROCESSES_SQL, params![id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to count template processes")?;
        if in_use > 0 {
            return Err(OffboardError::validation("template_id").with_reason(format!(
                "template {id} is used by {in_use} process(es) and cannot be deleted"
            )));
        }

        tx.execute(DELETE_TEMPLATE_SQL, params![id as i64])
            .db_context("Failed to delete template")?;
        tx.commit().db_context("Failed to commit transaction")?;

        log::info!("Deleted template {id}");
        Ok(())
    }
}
