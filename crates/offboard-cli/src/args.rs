//! Command-line arguments.
//!
//! Every subcommand has a clap wrapper that converts into the matching core
//! parameter struct, so the core stays free of clap derives:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Offboarding service
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use offboard_core::params::{
    AddPerson, ApplicableTemplates, Approve, ChangeStatus, DeleteProcess, DeleteTemplate, Id,
    ListPeople, ListProcesses, Seed, StartProcess, UpdateTask,
};

/// Track offboarding processes for departing employees and associates.
#[derive(Parser)]
#[command(version, about, name = "ofb")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/offboard/offboard.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse and check offboarding templates
    #[command(alias = "t")]
    Template {
        #[command(subcommand)]
        command: TemplateCommands,
    },
    /// Start and manage offboarding processes
    #[command(alias = "p")]
    Process {
        #[command(subcommand)]
        command: ProcessCommands,
    },
    /// Work on the tasks of a process
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Manage the people directory
    Person {
        #[command(subcommand)]
        command: PersonCommands,
    },
    /// Install the built-in templates and optional demo people
    Seed(SeedArgs),
    /// Start the MCP server on stdio
    Serve,
}

/// Lower-case name clap shows for a value, which the core parsers accept.
fn value_name<T: ValueEnum>(value: &T) -> Option<String> {
    value
        .to_possible_value()
        .map(|possible| possible.get_name().to_string())
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// List all templates with their tasks
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show one template
    #[command(alias = "s")]
    Show(IdArgs),
    /// Templates that apply to a department and role, most specific first
    #[command(alias = "a")]
    Applicable(ApplicableArgs),
    /// Check a template's scope and task dependency graph
    Validate(IdArgs),
    /// Delete a template no process uses
    Delete(DeleteArgs),
}

#[derive(clap::Args)]
pub struct IdArgs {
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(clap::Args)]
pub struct ApplicableArgs {
    /// Department of the departing person
    pub department: String,
    /// Role category, e.g. executive or individual_contributor
    #[arg(short, long)]
    pub role_category: Option<String>,
    /// Seniority level, e.g. junior, mid or senior
    #[arg(short, long)]
    pub seniority: Option<String>,
}

impl From<ApplicableArgs> for ApplicableTemplates {
    fn from(val: ApplicableArgs) -> Self {
        ApplicableTemplates {
            department: val.department,
            role_category: val.role_category,
            seniority_level: val.seniority,
        }
    }
}

// ---------------------------------------------------------------------------
// Processes
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ProcessCommands {
    /// Apply a template to a person
    #[command(alias = "new")]
    Start(StartArgs),
    /// List processes with filters
    #[command(aliases = ["l", "ls"])]
    List(ListProcessesArgs),
    /// Show a process with its tasks
    #[command(alias = "s")]
    Show(IdArgs),
    /// Move a process to another status
    Status(StatusArgs),
    /// Record a sign-off
    Approve(ApproveArgs),
    /// Delete a process permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ProcessStatusArg {
    Draft,
    PendingApproval,
    Active,
    Overdue,
    Completed,
    Cancelled,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TimeframeArg {
    Overdue,
    ThisWeek,
    ThisMonth,
    Later,
    NoDate,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Created,
    TargetDate,
    Name,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ApprovalRoleArg {
    Manager,
    Hr,
    Security,
}

#[derive(clap::Args)]
pub struct StartArgs {
    /// Template to apply
    pub template_id: u64,
    /// Departing person
    pub person_id: u64,
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// Target completion date (YYYY-MM-DD)
    #[arg(short, long)]
    pub target: Option<String>,
    /// Process name instead of "<template> - <person>"
    #[arg(short, long)]
    pub name: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl From<StartArgs> for StartProcess {
    fn from(val: StartArgs) -> Self {
        StartProcess {
            template_id: val.template_id,
            person_id: val.person_id,
            priority: val.priority.as_ref().and_then(value_name),
            target_completion_date: val.target,
            process_name: val.name,
            notes: val.notes,
        }
    }
}

#[derive(clap::Args, Default)]
pub struct ListProcessesArgs {
    #[arg(short, long, value_enum)]
    pub status: Option<ProcessStatusArg>,
    /// Bucket of the target date relative to today
    #[arg(short, long, value_enum)]
    pub timeframe: Option<TimeframeArg>,
    /// Text matched against process name, employee, department and role
    #[arg(short = 'q', long)]
    pub search: Option<String>,
    #[arg(short, long)]
    pub department: Option<String>,
    #[arg(short, long, value_enum)]
    pub priority: Option<PriorityArg>,
    /// Only processes started from this template
    #[arg(long)]
    pub template: Option<u64>,
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
    #[arg(long)]
    pub desc: bool,
}

impl From<ListProcessesArgs> for ListProcesses {
    fn from(val: ListProcessesArgs) -> Self {
        ListProcesses {
            status: val.status.as_ref().and_then(value_name),
            timeframe: val.timeframe.as_ref().and_then(value_name),
            search: val.search,
            department: val.department,
            priority: val.priority.as_ref().and_then(value_name),
            template_id: val.template,
            sort: val.sort.as_ref().and_then(value_name),
            descending: val.desc,
        }
    }
}

#[derive(clap::Args)]
pub struct StatusArgs {
    pub id: u64,
    #[arg(value_enum)]
    pub status: ProcessStatusArg,
}

impl From<StatusArgs> for ChangeStatus {
    fn from(val: StatusArgs) -> Self {
        ChangeStatus {
            id: val.id,
            status: value_name(&val.status).unwrap_or_default(),
        }
    }
}

#[derive(clap::Args)]
pub struct ApproveArgs {
    pub id: u64,
    #[arg(value_enum)]
    pub role: ApprovalRoleArg,
}

impl From<ApproveArgs> for Approve {
    fn from(val: ApproveArgs) -> Self {
        Approve {
            id: val.id,
            role: value_name(&val.role).unwrap_or_default(),
        }
    }
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    pub id: u64,
    /// Confirm the deletion (required)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteArgs> for DeleteProcess {
    fn from(val: DeleteArgs) -> Self {
        DeleteProcess {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

impl From<DeleteArgs> for DeleteTemplate {
    fn from(val: DeleteArgs) -> Self {
        DeleteTemplate {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Change a task's status, assignee or hours
    #[command(alias = "u")]
    Update(UpdateTaskArgs),
    /// Show one task
    #[command(alias = "s")]
    Show(IdArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum TaskStatusArg {
    Pending,
    InProgress,
    Completed,
    Blocked,
    Overdue,
}

#[derive(clap::Args)]
pub struct UpdateTaskArgs {
    pub id: u64,
    #[arg(short, long, value_enum)]
    pub status: Option<TaskStatusArg>,
    #[arg(short, long)]
    pub assignee: Option<String>,
    /// Hours actually spent
    #[arg(long)]
    pub hours: Option<f64>,
    /// Why the task cannot proceed; required with --status blocked
    #[arg(short, long)]
    pub reason: Option<String>,
}

impl From<UpdateTaskArgs> for UpdateTask {
    fn from(val: UpdateTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            status: val.status.as_ref().and_then(value_name),
            assignee: val.assignee,
            actual_hours: val.hours,
            blocked_reason: val.reason,
        }
    }
}

// ---------------------------------------------------------------------------
// People
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum PersonCommands {
    /// Add an employee or associate
    #[command(alias = "a")]
    Add(AddPersonArgs),
    /// List people with filters
    #[command(aliases = ["l", "ls"])]
    List(ListPeopleArgs),
    /// Show one person
    #[command(alias = "s")]
    Show(IdArgs),
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum EmploymentStatusArg {
    Active,
    Former,
    Future,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum AssociateStatusArg {
    BoardMember,
    Consultant,
    Advisor,
    Contractor,
    Partner,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PersonTypeArg {
    Employee,
    Associate,
}

#[derive(clap::Args)]
pub struct AddPersonArgs {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[arg(short, long)]
    pub department: Option<String>,
    /// Job title
    #[arg(short, long)]
    pub position: Option<String>,
    #[arg(long)]
    pub role_category: Option<String>,
    #[arg(long)]
    pub seniority: Option<String>,
    /// Employment status; makes the person an employee
    #[arg(long, value_enum, conflicts_with = "associate")]
    pub employee: Option<EmploymentStatusArg>,
    /// Affiliation; makes the person an associate
    #[arg(long, value_enum)]
    pub associate: Option<AssociateStatusArg>,
}

impl From<AddPersonArgs> for AddPerson {
    fn from(val: AddPersonArgs) -> Self {
        AddPerson {
            first_name: val.first_name,
            last_name: val.last_name,
            email: val.email,
            department: val.department,
            position: val.position,
            role_category: val.role_category,
            seniority_level: val.seniority,
            employment_status: val.employee.as_ref().and_then(value_name),
            associate_status: val.associate.as_ref().and_then(value_name),
        }
    }
}

#[derive(clap::Args)]
pub struct ListPeopleArgs {
    /// Text matched against name, email, department and position
    #[arg(short = 'q', long)]
    pub search: Option<String>,
    /// Employment status; associates never match
    #[arg(short, long, value_enum)]
    pub status: Option<EmploymentStatusArg>,
    #[arg(short = 't', long = "type", value_enum)]
    pub person_type: Option<PersonTypeArg>,
    #[arg(long, value_enum)]
    pub sort: Option<SortArg>,
    #[arg(long)]
    pub desc: bool,
}

impl From<ListPeopleArgs> for ListPeople {
    fn from(val: ListPeopleArgs) -> Self {
        ListPeople {
            search: val.search,
            status: val.status.as_ref().and_then(value_name),
            person_type: val.person_type.as_ref().and_then(value_name),
            sort: val.sort.as_ref().and_then(value_name),
            descending: val.desc,
        }
    }
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[derive(clap::Args)]
pub struct SeedArgs {
    /// Number of random demo people to add
    #[arg(long, default_value_t = 0)]
    pub people: u32,
    /// RNG seed for reproducible demo data
    #[arg(long)]
    pub rng_seed: Option<u64>,
}

impl From<SeedArgs> for Seed {
    fn from(val: SeedArgs) -> Self {
        Seed {
            demo_people: val.people,
            seed: val.rng_seed,
        }
    }
}
