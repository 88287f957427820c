//! Outcome messages for operations that have no single resource to show,
//! such as seeding or template validation.

use std::fmt;

/// A success or failure line, optionally followed by detail bullets.
pub struct OperationStatus {
    pub message: String,
    pub success: bool,
    pub details: Vec<String>,
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
            details: Vec::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
            details: Vec::new(),
        }
    }

    pub fn with_details<I>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.details.extend(details);
        self
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "Success" } else { "Error" };
        writeln!(f, "{label}: {}", self.message)?;
        for detail in &self.details {
            writeln!(f, "- {detail}")?;
        }
        Ok(())
    }
}
