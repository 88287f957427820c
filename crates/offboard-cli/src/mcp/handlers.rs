//! MCP tool handlers
//!
//! Each handler calls the service and returns its markdown display as a
//! single text content block.

use std::sync::Arc;

use log::debug;
use offboard_core::{params as core, Offboarding};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};

use super::errors::{not_found, to_mcp_error};

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        body.to_string(),
    )]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    service: Arc<Offboarding>,
}

impl McpHandlers {
    pub fn new(service: Arc<Offboarding>) -> Self {
        Self { service }
    }

    // ------------------------------------------------------------------
    // Templates
    // ------------------------------------------------------------------

    pub async fn list_templates(&self) -> McpResult {
        debug!("list_templates");

        let templates = self
            .service
            .list_templates_display()
            .await
            .map_err(|e| to_mcp_error("Failed to list templates", &e))?;
        text(templates)
    }

    pub async fn show_template(&self, Parameters(params): Parameters<core::Id>) -> McpResult {
        debug!("show_template: {params:?}");

        let template = self
            .service
            .get_template(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to get template", &e))?
            .ok_or_else(|| not_found("Template", params.id))?;
        text(template)
    }

    pub async fn applicable_templates(
        &self,
        Parameters(params): Parameters<core::ApplicableTemplates>,
    ) -> McpResult {
        debug!("applicable_templates: {params:?}");

        let templates = self
            .service
            .applicable_templates_display(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to find applicable templates", &e))?;
        text(templates)
    }

    pub async fn validate_template(&self, Parameters(params): Parameters<core::Id>) -> McpResult {
        debug!("validate_template: {params:?}");

        let status = self
            .service
            .validate_template_status(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to validate template", &e))?;
        text(status)
    }

    pub async fn delete_template(
        &self,
        Parameters(params): Parameters<core::DeleteTemplate>,
    ) -> McpResult {
        debug!("delete_template: {params:?}");

        let result = self
            .service
            .delete_template(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete template", &e))?
            .ok_or_else(|| not_found("Template", params.id))?;
        text(result)
    }

    // ------------------------------------------------------------------
    // Processes
    // ------------------------------------------------------------------

    pub async fn start_process(
        &self,
        Parameters(params): Parameters<core::StartProcess>,
    ) -> McpResult {
        debug!("start_process: {params:?}");

        let result = self
            .service
            .start_process_result(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to start process", &e))?;
        text(result)
    }

    pub async fn list_processes(
        &self,
        Parameters(params): Parameters<core::ListProcesses>,
    ) -> McpResult {
        debug!("list_processes: {params:?}");

        let summaries = self
            .service
            .list_processes_summary(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to list processes", &e))?;
        text(summaries)
    }

    pub async fn show_process(&self, Parameters(params): Parameters<core::Id>) -> McpResult {
        debug!("show_process: {params:?}");

        let process = self
            .service
            .get_process(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to get process", &e))?
            .ok_or_else(|| not_found("Process", params.id))?;
        text(process)
    }

    pub async fn change_process_status(
        &self,
        Parameters(params): Parameters<core::ChangeStatus>,
    ) -> McpResult {
        debug!("change_process_status: {params:?}");

        let result = self
            .service
            .change_status_result(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to change process status", &e))?;
        text(result)
    }

    pub async fn approve_process(&self, Parameters(params): Parameters<core::Approve>) -> McpResult {
        debug!("approve_process: {params:?}");

        let result = self
            .service
            .approve_process_result(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to record approval", &e))?;
        text(result)
    }

    pub async fn delete_process(
        &self,
        Parameters(params): Parameters<core::DeleteProcess>,
    ) -> McpResult {
        debug!("delete_process: {params:?}");

        let result = self
            .service
            .delete_process(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to delete process", &e))?
            .ok_or_else(|| not_found("Process", params.id))?;
        text(result)
    }

    // ------------------------------------------------------------------
    // Tasks
    // ------------------------------------------------------------------

    pub async fn update_task(&self, Parameters(params): Parameters<core::UpdateTask>) -> McpResult {
        debug!("update_task: {params:?}");

        let result = self
            .service
            .update_task_result(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to update task", &e))?;
        text(result)
    }

    pub async fn show_task(&self, Parameters(params): Parameters<core::Id>) -> McpResult {
        debug!("show_task: {params:?}");

        let task = self
            .service
            .get_task(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to get task", &e))?
            .ok_or_else(|| not_found("Task", params.id))?;
        text(task)
    }

    // ------------------------------------------------------------------
    // People
    // ------------------------------------------------------------------

    pub async fn add_person(&self, Parameters(params): Parameters<core::AddPerson>) -> McpResult {
        debug!("add_person: {params:?}");

        let result = self
            .service
            .add_person_result(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to add person", &e))?;
        text(result)
    }

    pub async fn list_people(&self, Parameters(params): Parameters<core::ListPeople>) -> McpResult {
        debug!("list_people: {params:?}");

        let people = self
            .service
            .list_people_display(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to list people", &e))?;
        text(people)
    }

    pub async fn show_person(&self, Parameters(params): Parameters<core::Id>) -> McpResult {
        debug!("show_person: {params:?}");

        let person = self
            .service
            .get_person(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to get person", &e))?
            .ok_or_else(|| not_found("Person", params.id))?;
        text(person)
    }

    pub async fn seed(&self, Parameters(params): Parameters<core::Seed>) -> McpResult {
        debug!("seed: {params:?}");

        let status = self
            .service
            .seed_status(&params)
            .await
            .map_err(|e| to_mcp_error("Failed to seed", &e))?;
        text(status)
    }
}

#[cfg(test)]
mod tests {
    use offboard_core::OffboardingBuilder;
    use tempfile::TempDir;

    use super::*;

    async fn handlers() -> (McpHandlers, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("mcp.db");
        let service = OffboardingBuilder::new()
            .with_database_path(Some(&db_path))
            .build()
            .await
            .expect("Failed to build service");
        (McpHandlers::new(Arc::new(service)), temp_dir)
    }

    fn body(result: CallToolResult) -> String {
        format!("{result:?}")
    }

    #[tokio::test]
    async fn test_seed_then_start_process() {
        let (handlers, _temp_dir) = handlers().await;

        let seeded = handlers
            .seed(Parameters(core::Seed {
                demo_people: 2,
                seed: Some(7),
            }))
            .await
            .expect("seed succeeds");
        assert!(body(seeded).contains("Seeded 3 templates"));

        let started = handlers
            .start_process(Parameters(core::StartProcess {
                template_id: 1,
                person_id: 1,
                ..Default::default()
            }))
            .await
            .expect("process starts");
        assert!(body(started).contains("Started process with ID: 1"));

        let listed = handlers
            .list_processes(Parameters(core::ListProcesses::default()))
            .await
            .expect("list succeeds");
        assert!(body(listed).contains("(ID: 1)"));
    }

    #[tokio::test]
    async fn test_missing_process_is_invalid_params() {
        let (handlers, _temp_dir) = handlers().await;

        let error = handlers
            .show_process(Parameters(core::Id { id: 42 }))
            .await
            .expect_err("unknown process");
        assert!(error.message.contains("Process with ID 42 not found"));
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (handlers, _temp_dir) = handlers().await;

        let error = handlers
            .delete_process(Parameters(core::DeleteProcess {
                id: 1,
                confirmed: false,
            }))
            .await
            .expect_err("unconfirmed delete");
        assert!(error.message.contains("confirmed"));
    }

    #[tokio::test]
    async fn test_template_in_use_cannot_be_deleted() {
        let (handlers, _temp_dir) = handlers().await;

        handlers
            .seed(Parameters(core::Seed {
                demo_people: 1,
                seed: Some(3),
            }))
            .await
            .expect("seed succeeds");
        handlers
            .start_process(Parameters(core::StartProcess {
                template_id: 1,
                person_id: 1,
                ..Default::default()
            }))
            .await
            .expect("process starts");

        let error = handlers
            .delete_template(Parameters(core::DeleteTemplate {
                id: 1,
                confirmed: true,
            }))
            .await
            .expect_err("template is in use");
        assert!(error.message.contains("cannot be deleted"));

        let deleted = handlers
            .delete_template(Parameters(core::DeleteTemplate {
                id: 2,
                confirmed: true,
            }))
            .await
            .expect("unused template is deleted");
        assert!(body(deleted).contains("Deleted template"));
    }
}
