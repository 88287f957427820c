//! People directory: employees and associates.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{OffboardError, Result};

/// Employment state of a direct employee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EmploymentStatus {
    Active,
    Former,
    /// Signed but not yet started
    Future,
}

impl EmploymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Active => "active",
            EmploymentStatus::Former => "former",
            EmploymentStatus::Future => "future",
        }
    }
}

impl FromStr for EmploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(EmploymentStatus::Active),
            "former" => Ok(EmploymentStatus::Former),
            "future" => Ok(EmploymentStatus::Future),
            _ => Err(format!("Invalid employment status: {s}")),
        }
    }
}

/// Affiliation of a person who is not a direct employee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssociateStatus {
    BoardMember,
    Consultant,
    Advisor,
    Contractor,
    Partner,
}

impl AssociateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssociateStatus::BoardMember => "board_member",
            AssociateStatus::Consultant => "consultant",
            AssociateStatus::Advisor => "advisor",
            AssociateStatus::Contractor => "contractor",
            AssociateStatus::Partner => "partner",
        }
    }
}

impl FromStr for AssociateStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "board_member" => Ok(AssociateStatus::BoardMember),
            "consultant" => Ok(AssociateStatus::Consultant),
            "advisor" => Ok(AssociateStatus::Advisor),
            "contractor" => Ok(AssociateStatus::Contractor),
            "partner" => Ok(AssociateStatus::Partner),
            _ => Err(format!("Invalid associate status: {s}")),
        }
    }
}

/// A person is exactly one of employee or associate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PersonKind {
    Employee { employment_status: EmploymentStatus },
    Associate { associate_status: AssociateStatus },
}

impl PersonKind {
    /// Build the kind from the two nullable status columns of a raw record.
    ///
    /// # Errors
    ///
    /// `OffboardError::Validation` when both or neither status is set.
    pub fn from_statuses(
        employment_status: Option<EmploymentStatus>,
        associate_status: Option<AssociateStatus>,
    ) -> Result<Self> {
        match (employment_status, associate_status) {
            (Some(employment_status), None) => Ok(PersonKind::Employee { employment_status }),
            (None, Some(associate_status)) => Ok(PersonKind::Associate { associate_status }),
            (Some(_), Some(_)) => Err(OffboardError::validation("status").with_reason(
                "a person cannot have both an employment status and an associate status",
            )),
            (None, None) => Err(OffboardError::validation("status")
                .with_reason("either an employment status or an associate status is required")),
        }
    }

    pub fn person_type(&self) -> PersonType {
        match self {
            PersonKind::Employee { .. } => PersonType::Employee,
            PersonKind::Associate { .. } => PersonType::Associate,
        }
    }

    pub fn employment_status(&self) -> Option<EmploymentStatus> {
        match self {
            PersonKind::Employee { employment_status } => Some(*employment_status),
            PersonKind::Associate { .. } => None,
        }
    }

    pub fn associate_status(&self) -> Option<AssociateStatus> {
        match self {
            PersonKind::Associate { associate_status } => Some(*associate_status),
            PersonKind::Employee { .. } => None,
        }
    }
}

/// Discriminant of [`PersonKind`], used for filtering.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Employee,
    Associate,
}

impl FromStr for PersonType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "employee" | "employees" => Ok(PersonType::Employee),
            "associate" | "associates" => Ok(PersonType::Associate),
            _ => Err(format!("Invalid person type: {s}")),
        }
    }
}

/// A person in the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Option<String>,
    /// Job title
    pub position: Option<String>,
    pub role_category: Option<String>,
    pub seniority_level: Option<String>,
    #[serde(flatten)]
    pub kind: PersonKind,
    pub created_at: Timestamp,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Data-entry form for a person. Carries both status fields as entered;
/// [`NewPerson::validate`] turns them into a [`PersonKind`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub department: Option<String>,
    pub position: Option<String>,
    pub role_category: Option<String>,
    pub seniority_level: Option<String>,
    pub employment_status: Option<EmploymentStatus>,
    pub associate_status: Option<AssociateStatus>,
}

impl NewPerson {
    /// Check required fields and resolve the person kind.
    pub fn validate(&self) -> Result<PersonKind> {
        if self.first_name.trim().is_empty() {
            return Err(OffboardError::validation("first_name").with_reason("cannot be empty"));
        }
        if self.last_name.trim().is_empty() {
            return Err(OffboardError::validation("last_name").with_reason("cannot be empty"));
        }
        if !self.email.contains('@') {
            return Err(OffboardError::validation("email")
                .with_reason(format!("'{}' is not an email address", self.email)));
        }
        PersonKind::from_statuses(self.employment_status, self.associate_status)
    }
}
