//! Command handlers for the terminal interface.
//!
//! Each handler converts clap arguments into core parameters, calls the
//! service and renders the returned display type as markdown.

use anyhow::{anyhow, Result};
use offboard_core::{
    params::{Id, ListProcesses, Seed},
    Offboarding,
};

use crate::{
    args::{PersonCommands, ProcessCommands, TaskCommands, TemplateCommands},
    renderer::TerminalRenderer,
};

/// Dispatches subcommands against one service instance.
pub struct Cli {
    service: Offboarding,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(service: Offboarding, renderer: TerminalRenderer) -> Self {
        Self { service, renderer }
    }

    pub async fn handle_template_command(&self, command: TemplateCommands) -> Result<()> {
        match command {
            TemplateCommands::List => {
                let templates = self.service.list_templates_display().await?;
                self.renderer.render(&templates.to_string())
            }
            TemplateCommands::Show(args) => {
                let params = Id::from(args);
                let template = self
                    .service
                    .get_template(&params)
                    .await?
                    .ok_or_else(|| anyhow!("Template with ID {} not found", params.id))?;
                self.renderer.render(&template.to_string())
            }
            TemplateCommands::Applicable(args) => {
                let templates = self
                    .service
                    .applicable_templates_display(&args.into())
                    .await?;
                self.renderer.render(&templates.to_string())
            }
            TemplateCommands::Validate(args) => {
                let status = self.service.validate_template_status(&args.into()).await?;
                self.renderer.render(&status.to_string())?;
                if status.success {
                    Ok(())
                } else {
                    Err(anyhow!("Template failed validation"))
                }
            }
            TemplateCommands::Delete(args) => {
                let id = args.id;
                let result = self
                    .service
                    .delete_template(&args.into())
                    .await?
                    .ok_or_else(|| anyhow!("Template with ID {id} not found"))?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_process_command(&self, command: ProcessCommands) -> Result<()> {
        match command {
            ProcessCommands::Start(args) => {
                let result = self.service.start_process_result(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            ProcessCommands::List(args) => self.list_processes(&args.into()).await,
            ProcessCommands::Show(args) => {
                let params = Id::from(args);
                let process = self
                    .service
                    .get_process(&params)
                    .await?
                    .ok_or_else(|| anyhow!("Process with ID {} not found", params.id))?;
                self.renderer.render(&process.to_string())
            }
            ProcessCommands::Status(args) => {
                let result = self.service.change_status_result(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            ProcessCommands::Approve(args) => {
                let result = self.service.approve_process_result(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            ProcessCommands::Delete(args) => {
                let id = args.id;
                let result = self
                    .service
                    .delete_process(&args.into())
                    .await?
                    .ok_or_else(|| anyhow!("Process with ID {id} not found"))?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::Update(args) => {
                let result = self.service.update_task_result(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            TaskCommands::Show(args) => {
                let params = Id::from(args);
                let task = self
                    .service
                    .get_task(&params)
                    .await?
                    .ok_or_else(|| anyhow!("Task with ID {} not found", params.id))?;
                self.renderer.render(&task.to_string())
            }
        }
    }

    pub async fn handle_person_command(&self, command: PersonCommands) -> Result<()> {
        match command {
            PersonCommands::Add(args) => {
                let result = self.service.add_person_result(&args.into()).await?;
                self.renderer.render(&result.to_string())
            }
            PersonCommands::List(args) => {
                let people = self.service.list_people_display(&args.into()).await?;
                self.renderer.render(&people.to_string())
            }
            PersonCommands::Show(args) => {
                let params = Id::from(args);
                let person = self
                    .service
                    .get_person(&params)
                    .await?
                    .ok_or_else(|| anyhow!("Person with ID {} not found", params.id))?;
                self.renderer.render(&person.to_string())
            }
        }
    }

    pub async fn seed(&self, params: &Seed) -> Result<()> {
        let status = self.service.seed_status(params).await?;
        self.renderer.render(&status.to_string())
    }

    pub async fn list_processes(&self, params: &ListProcesses) -> Result<()> {
        let summaries = self.service.list_processes_summary(params).await?;
        self.renderer.render(&summaries.to_string())
    }
}
