//! Parameter structures for offboarding operations.
//!
//! These are the shared, interface-neutral inputs of the service facade. The
//! CLI wraps them in clap argument structs and the MCP server deserializes
//! them directly (with JSON schemas when the `schema` feature is enabled).
//! Enumerated values travel as strings and are parsed by the `validate`
//! methods and conversions defined here and in [`crate::models::filters`].

use std::str::FromStr;

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::{OffboardError, Result},
    models::{
        AssociateStatus, EmploymentStatus, InstantiateOptions, NewPerson, Priority, Sort, SortKey,
        SortOrder, TaskStatus,
    },
};

/// Parse an optional string field, naming the field in the error.
pub(crate) fn parse_field<T>(field: &str, value: Option<&str>) -> Result<Option<T>>
where
    T: FromStr<Err = String>,
{
    value
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|reason| OffboardError::validation(field).with_reason(reason))
        })
        .transpose()
}

fn parse_date(field: &str, value: Option<&str>) -> Result<Option<Date>> {
    value
        .map(|value| {
            value.trim().parse::<Date>().map_err(|e| {
                OffboardError::validation(field)
                    .with_reason(format!("'{value}' is not a YYYY-MM-DD date: {e}"))
            })
        })
        .transpose()
}

fn parse_sort(sort: Option<&str>, descending: bool) -> Result<Sort> {
    let key = parse_field::<SortKey>("sort", sort)?.unwrap_or_default();
    let order = if descending {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    };
    Ok(Sort::new(key, order))
}

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for finding templates that apply to a department and role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ApplicableTemplates {
    /// Department of the departing person
    pub department: String,
    /// Role category such as 'executive' or 'individual_contributor'
    pub role_category: Option<String>,
    /// Seniority level such as 'junior', 'mid' or 'senior'
    pub seniority_level: Option<String>,
}

/// Parameters for starting an offboarding process from a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StartProcess {
    /// Template to instantiate
    pub template_id: u64,
    /// Person who is leaving
    pub person_id: u64,
    /// 'low', 'medium' (default), 'high' or 'urgent'
    pub priority: Option<String>,
    /// Target completion date as YYYY-MM-DD; defaults to today plus the
    /// template's estimated duration
    pub target_completion_date: Option<String>,
    /// Process name; defaults to "<template> - <employee>"
    pub process_name: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
}

impl StartProcess {
    /// Parse the options part of the request.
    pub fn options(&self) -> Result<InstantiateOptions> {
        Ok(InstantiateOptions {
            priority: parse_field::<Priority>("priority", self.priority.as_deref())?
                .unwrap_or_default(),
            target_completion_date: parse_date(
                "target_completion_date",
                self.target_completion_date.as_deref(),
            )?,
            process_name: self.process_name.clone(),
            notes: self.notes.clone(),
        })
    }
}

/// Parameters for listing processes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListProcesses {
    /// 'draft', 'pending_approval', 'active', 'overdue', 'completed' or
    /// 'cancelled'
    pub status: Option<String>,
    /// 'overdue', 'this_week', 'this_month', 'later' or 'no_date'
    pub timeframe: Option<String>,
    /// Case-insensitive text matched against process name, employee name,
    /// department and role
    pub search: Option<String>,
    /// Exact department name
    pub department: Option<String>,
    /// 'low', 'medium', 'high' or 'urgent'
    pub priority: Option<String>,
    /// Only processes started from this template
    pub template_id: Option<u64>,
    /// 'created' (default), 'target_date' or 'name'
    pub sort: Option<String>,
    /// Sort in descending order
    #[serde(default)]
    pub descending: bool,
}

impl ListProcesses {
    pub fn sort(&self) -> Result<Sort> {
        parse_sort(self.sort.as_deref(), self.descending)
    }
}

/// Parameters for moving a process to another status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ChangeStatus {
    /// Process ID
    pub id: u64,
    /// Target status
    pub status: String,
}

/// Parameters for recording an approval on a process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Approve {
    /// Process ID
    pub id: u64,
    /// 'manager', 'hr' or 'security'
    pub role: String,
}

/// Parameters for updating a task.
///
/// A blocked reason is required when the status changes to 'blocked'.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateTask {
    /// Task ID
    pub id: u64,
    /// 'pending', 'in_progress', 'completed', 'blocked' or 'overdue'
    pub status: Option<String>,
    /// Person doing the work
    pub assignee: Option<String>,
    /// Hours actually spent
    pub actual_hours: Option<f64>,
    /// Why the task cannot proceed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_reason: Option<String>,
}

impl UpdateTask {
    /// Parse the status and check the blocked-reason requirement.
    ///
    /// ```rust
    /// use offboard_core::params::UpdateTask;
    ///
    /// let params = UpdateTask {
    ///     id: 1,
    ///     status: Some("blocked".to_string()),
    ///     ..Default::default()
    /// };
    /// assert!(params.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<Option<TaskStatus>> {
        let status = parse_field::<TaskStatus>("status", self.status.as_deref())?;

        let has_reason = self
            .blocked_reason
            .as_deref()
            .is_some_and(|reason| !reason.trim().is_empty());
        if status == Some(TaskStatus::Blocked) && !has_reason {
            return Err(OffboardError::validation("blocked_reason")
                .with_reason("a reason is required when blocking a task"));
        }

        Ok(status)
    }
}

/// Parameters for adding a person to the directory.
///
/// Exactly one of `employment_status` and `associate_status` must be given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AddPerson {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Option<String>,
    /// Job title
    pub position: Option<String>,
    pub role_category: Option<String>,
    pub seniority_level: Option<String>,
    /// 'active', 'former' or 'future'
    pub employment_status: Option<String>,
    /// 'board_member', 'consultant', 'advisor', 'contractor' or 'partner'
    pub associate_status: Option<String>,
}

impl TryFrom<&AddPerson> for NewPerson {
    type Error = OffboardError;

    fn try_from(params: &AddPerson) -> Result<Self> {
        Ok(NewPerson {
            first_name: params.first_name.clone(),
            last_name: params.last_name.clone(),
            email: params.email.clone(),
            department: params.department.clone(),
            position: params.position.clone(),
            role_category: params.role_category.clone(),
            seniority_level: params.seniority_level.clone(),
            employment_status: parse_field::<EmploymentStatus>(
                "employment_status",
                params.employment_status.as_deref(),
            )?,
            associate_status: parse_field::<AssociateStatus>(
                "associate_status",
                params.associate_status.as_deref(),
            )?,
        })
    }
}

/// Parameters for listing people.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListPeople {
    /// Case-insensitive text matched against name, email, department and
    /// position
    pub search: Option<String>,
    /// Employment status; associates never match
    pub status: Option<String>,
    /// 'employee' or 'associate'
    #[serde(rename = "type")]
    pub person_type: Option<String>,
    /// 'created' (default) or 'name'
    pub sort: Option<String>,
    #[serde(default)]
    pub descending: bool,
}

impl ListPeople {
    pub fn sort(&self) -> Result<Sort> {
        parse_sort(self.sort.as_deref(), self.descending)
    }
}

/// Parameters for permanently deleting a process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteProcess {
    /// Process ID
    pub id: u64,
    /// Must be true; deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for permanently deleting a template no process uses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteTemplate {
    /// Template ID
    pub id: u64,
    /// Must be true; deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for seeding the built-in templates and demo people.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Seed {
    /// Number of random demo people to add
    #[serde(default)]
    pub demo_people: u32,
    /// RNG seed for reproducible demo data
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_task_blocked_requires_reason() {
        let params = UpdateTask {
            id: 1,
            status: Some("blocked".to_string()),
            blocked_reason: Some("   ".to_string()),
            ..Default::default()
        };

        match params.validate() {
            Err(OffboardError::Validation { field, .. }) => assert_eq!(field, "blocked_reason"),
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_task_invalid_status() {
        let params = UpdateTask {
            id: 1,
            status: Some("finished".to_string()),
            ..Default::default()
        };

        match params.validate() {
            Err(OffboardError::Validation { field, reason }) => {
                assert_eq!(field, "status");
                assert!(reason.contains("finished"));
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_update_task_without_status() {
        let params = UpdateTask {
            id: 1,
            assignee: Some("it-desk".to_string()),
            ..Default::default()
        };
        assert_eq!(params.validate().expect("valid"), None);
    }

    #[test]
    fn test_start_process_options() {
        let params = StartProcess {
            template_id: 1,
            person_id: 2,
            priority: Some("HIGH".to_string()),
            target_completion_date: Some("2024-04-30".to_string()),
            ..Default::default()
        };

        let options = params.options().expect("valid options");
        assert_eq!(options.priority, Priority::High);
        assert_eq!(
            options.target_completion_date,
            Some(jiff::civil::date(2024, 4, 30))
        );
    }

    #[test]
    fn test_start_process_rejects_bad_date() {
        let params = StartProcess {
            target_completion_date: Some("30/04/2024".to_string()),
            ..Default::default()
        };
        assert!(params.options().is_err());
    }

    #[test]
    fn test_add_person_with_both_statuses_fails_validation() {
        let params = AddPerson {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            employment_status: Some("active".to_string()),
            associate_status: Some("advisor".to_string()),
            ..Default::default()
        };

        let new_person = NewPerson::try_from(&params).expect("statuses parse");
        assert!(new_person.validate().is_err());
    }

    #[test]
    fn test_list_sort_parsing() {
        let params = ListProcesses {
            sort: Some("target-date".to_string()),
            descending: true,
            ..Default::default()
        };
        assert_eq!(
            params.sort().expect("valid sort"),
            Sort::new(SortKey::TargetDate, SortOrder::Descending)
        );

        let params = ListPeople {
            sort: Some("age".to_string()),
            ..Default::default()
        };
        assert!(params.sort().is_err());
    }
}
