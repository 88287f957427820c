//! MCP server for offboarding
//!
//! Exposes the catalog, process, task and people operations as MCP tools so
//! AI assistants can drive offboarding workflows over stdio.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use offboard_core::{params as core, Offboarding};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::McpResult;

const INSTRUCTIONS: &str = r#"Offboarding tracks the departure of employees and associates (board members, consultants, advisors, contractors, partners) through checklists built from templates.

## Core Concepts
- **Templates**: reusable task lists scoped company-wide, to a department, or to a role/seniority. Tasks may depend on earlier tasks in the same template.
- **Processes**: one offboarding of one person, created from a template. A person can have only one open process at a time.
- **Tasks**: pending → in_progress → completed, or blocked with a reason. A task cannot complete before the tasks it depends on.
- **Progress**: percentage of completed tasks, with overdue tasks counted separately.

## Typical Workflow
1. `list_people` or `add_person` to find the departing person
2. `applicable_templates` with their department and role to choose a template
3. `start_process` to copy the template's tasks into a new process
4. `change_process_status` to 'active' (executive templates need `approve_process` sign-offs first)
5. `update_task` as work progresses; use `show_process` to review progress
6. `change_process_status` to 'completed' once every task is done

## Tool Categories
- **Templates**: list_templates, show_template, applicable_templates, validate_template, delete_template
- **Processes**: start_process, list_processes, show_process, change_process_status, approve_process, delete_process
- **Tasks**: update_task, show_task
- **People**: add_person, list_people, show_person
- **Setup**: seed"#;

#[derive(Clone)]
pub struct OffboardMcpServer {
    service: Arc<Offboarding>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl OffboardMcpServer {
    pub fn new(service: Offboarding) -> Self {
        Self {
            service: Arc::new(service),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.service.clone())
    }

    #[tool(
        name = "list_templates",
        description = "List every offboarding template with its scope, duration, required approvals and tasks."
    )]
    async fn list_templates(&self) -> McpResult {
        self.handlers().list_templates().await
    }

    #[tool(
        name = "show_template",
        description = "Show one template by ID, including task categories, estimated hours and dependencies."
    )]
    async fn show_template(&self, params: Parameters<core::Id>) -> McpResult {
        self.handlers().show_template(params).await
    }

    #[tool(
        name = "applicable_templates",
        description = "Find templates that apply to a department and optional role category / seniority level. Results are ordered most specific first: role-specific, then department-specific, then company-wide."
    )]
    async fn applicable_templates(
        &self,
        params: Parameters<core::ApplicableTemplates>,
    ) -> McpResult {
        self.handlers().applicable_templates(params).await
    }

    #[tool(
        name = "validate_template",
        description = "Check a template's scope filters and task dependency graph (no cycles, no dangling references)."
    )]
    async fn validate_template(&self, params: Parameters<core::Id>) -> McpResult {
        self.handlers().validate_template(params).await
    }

    #[tool(
        name = "delete_template",
        description = "Permanently delete a template and its task blueprints. Requires confirmed=true. Fails while any process was started from the template."
    )]
    async fn delete_template(&self, params: Parameters<core::DeleteTemplate>) -> McpResult {
        self.handlers().delete_template(params).await
    }

    #[tool(
        name = "start_process",
        description = "Start an offboarding process for a person from a template. Tasks, dependencies and documents are copied from the template. Fails if the person already has an open process. The target date defaults to today plus the template's estimated duration."
    )]
    async fn start_process(&self, params: Parameters<core::StartProcess>) -> McpResult {
        self.handlers().start_process(params).await
    }

    #[tool(
        name = "list_processes",
        description = "List processes with progress. Filter by status, timeframe ('overdue', 'this_week', 'this_month', 'later', 'no_date'), search text, department, priority or template_id; sort by 'created', 'target_date' or 'name'."
    )]
    async fn list_processes(&self, params: Parameters<core::ListProcesses>) -> McpResult {
        self.handlers().list_processes(params).await
    }

    #[tool(
        name = "show_process",
        description = "Show a process with its approvals, progress and every task."
    )]
    async fn show_process(&self, params: Parameters<core::Id>) -> McpResult {
        self.handlers().show_process(params).await
    }

    #[tool(
        name = "change_process_status",
        description = "Move a process to 'pending_approval', 'active', 'overdue', 'completed' or 'cancelled'. Activation requires all approvals the template demands; completion requires every task to be completed."
    )]
    async fn change_process_status(&self, params: Parameters<core::ChangeStatus>) -> McpResult {
        self.handlers().change_process_status(params).await
    }

    #[tool(
        name = "approve_process",
        description = "Record a 'manager', 'hr' or 'security' sign-off on a process. Each role can approve once."
    )]
    async fn approve_process(&self, params: Parameters<core::Approve>) -> McpResult {
        self.handlers().approve_process(params).await
    }

    #[tool(
        name = "delete_process",
        description = "Permanently delete a process and its tasks. Requires confirmed=true; this cannot be undone. Prefer cancelling with change_process_status."
    )]
    async fn delete_process(&self, params: Parameters<core::DeleteProcess>) -> McpResult {
        self.handlers().delete_process(params).await
    }

    #[tool(
        name = "update_task",
        description = "Change a task's status ('pending', 'in_progress', 'completed', 'blocked', 'overdue'), assignee or actual hours. A task cannot be completed before its dependencies. Blocking requires blocked_reason."
    )]
    async fn update_task(&self, params: Parameters<core::UpdateTask>) -> McpResult {
        self.handlers().update_task(params).await
    }

    #[tool(
        name = "show_task",
        description = "Show one task with its instructions, dependencies, documents and evidence requirements."
    )]
    async fn show_task(&self, params: Parameters<core::Id>) -> McpResult {
        self.handlers().show_task(params).await
    }

    #[tool(
        name = "add_person",
        description = "Add a person to the directory. Give exactly one of employment_status ('active', 'former', 'future') for employees or associate_status ('board_member', 'consultant', 'advisor', 'contractor', 'partner') for associates."
    )]
    async fn add_person(&self, params: Parameters<core::AddPerson>) -> McpResult {
        self.handlers().add_person(params).await
    }

    #[tool(
        name = "list_people",
        description = "List people, optionally filtered by search text, employment status or type ('employee' or 'associate')."
    )]
    async fn list_people(&self, params: Parameters<core::ListPeople>) -> McpResult {
        self.handlers().list_people(params).await
    }

    #[tool(name = "show_person", description = "Show one person by ID.")]
    async fn show_person(&self, params: Parameters<core::Id>) -> McpResult {
        self.handlers().show_person(params).await
    }

    #[tool(
        name = "seed",
        description = "Install the built-in templates (standard, engineering, executive) if missing, and optionally add random demo people."
    )]
    async fn seed(&self, params: Parameters<core::Seed>) -> McpResult {
        self.handlers().seed(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for OffboardMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "offboard".to_string(),
                title: None,
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: OffboardMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting offboarding MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use offboard_core::OffboardingBuilder;
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_server_registers_all_tools() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let service = OffboardingBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .expect("Failed to build service");

        let server = OffboardMcpServer::new(service);
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();

        assert_eq!(names.len(), 17);
        for name in ["start_process", "update_task", "applicable_templates", "seed"] {
            assert!(names.iter().any(|n| n == name), "missing tool {name}");
        }
        assert!(server.get_info().instructions.is_some());
    }
}
