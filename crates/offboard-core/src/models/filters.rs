//! Filter and sort options for process and people list views.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{EmploymentStatus, PersonType, Priority, ProcessStatus};

/// Bucket of a process's target completion date relative to today.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    /// Target date before today
    Overdue,
    /// Today through six days from now
    ThisWeek,
    /// Seven through twenty-nine days from now
    ThisMonth,
    /// Thirty days from now or later
    Later,
    /// No target date set
    NoDate,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Overdue => "overdue",
            Timeframe::ThisWeek => "this_week",
            Timeframe::ThisMonth => "this_month",
            Timeframe::Later => "later",
            Timeframe::NoDate => "no_date",
        }
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "overdue" => Ok(Timeframe::Overdue),
            "this_week" | "week" => Ok(Timeframe::ThisWeek),
            "this_month" | "month" => Ok(Timeframe::ThisMonth),
            "later" => Ok(Timeframe::Later),
            "no_date" | "none" => Ok(Timeframe::NoDate),
            _ => Err(format!("Invalid timeframe: {s}")),
        }
    }
}

/// Filter options for process lists. All set fields must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessFilter {
    pub status: Option<ProcessStatus>,
    pub timeframe: Option<Timeframe>,

    /// Case-insensitive substring over process name, employee name,
    /// department and role
    pub search: Option<String>,

    /// Exact department match
    pub department: Option<String>,
    pub priority: Option<Priority>,
    pub template_id: Option<u64>,
}

/// Filter options for the people directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeopleFilter {
    /// Case-insensitive substring over first name, last name, email,
    /// department and position
    pub search_term: Option<String>,

    /// Matches employees only; associates never match a status filter
    pub status: Option<EmploymentStatus>,

    pub person_type: Option<PersonType>,
}

/// Sort key for list views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    CreatedAt,
    /// Target completion date for processes
    TargetDate,
    Name,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "created" | "created_at" => Ok(SortKey::CreatedAt),
            "target" | "target_date" | "due" => Ok(SortKey::TargetDate),
            "name" => Ok(SortKey::Name),
            _ => Err(format!("Invalid sort key: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Sort key and direction; sorting is stable in both directions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

impl TryFrom<&crate::params::ListProcesses> for ProcessFilter {
    type Error = crate::OffboardError;

    /// Parse the string-typed list parameters into a filter.
    ///
    /// ```rust
    /// use offboard_core::{
    ///     models::{ProcessFilter, ProcessStatus, Timeframe},
    ///     params::ListProcesses,
    /// };
    ///
    /// let params = ListProcesses {
    ///     status: Some("active".to_string()),
    ///     timeframe: Some("this-week".to_string()),
    ///     ..Default::default()
    /// };
    /// let filter = ProcessFilter::try_from(&params)?;
    /// assert_eq!(filter.status, Some(ProcessStatus::Active));
    /// assert_eq!(filter.timeframe, Some(Timeframe::ThisWeek));
    /// # Ok::<(), offboard_core::OffboardError>(())
    /// ```
    fn try_from(params: &crate::params::ListProcesses) -> Result<Self, Self::Error> {
        use crate::params::parse_field;

        Ok(Self {
            status: parse_field("status", params.status.as_deref())?,
            timeframe: parse_field("timeframe", params.timeframe.as_deref())?,
            search: params.search.clone(),
            department: params.department.clone(),
            priority: parse_field("priority", params.priority.as_deref())?,
            template_id: params.template_id,
        })
    }
}

impl TryFrom<&crate::params::ListPeople> for PeopleFilter {
    type Error = crate::OffboardError;

    fn try_from(params: &crate::params::ListPeople) -> Result<Self, Self::Error> {
        use crate::params::parse_field;

        Ok(Self {
            search_term: params.search.clone(),
            status: parse_field("status", params.status.as_deref())?,
            person_type: parse_field("type", params.person_type.as_deref())?,
        })
    }
}
