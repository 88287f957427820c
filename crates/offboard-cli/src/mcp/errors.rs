//! Error handling utilities for the MCP server

use offboard_core::OffboardError;
use rmcp::ErrorData;

/// Convert a service error into an MCP error.
///
/// Rejections caused by the caller's input are reported as invalid params so
/// assistants can correct the request; everything else is internal.
pub fn to_mcp_error(message: &str, error: &OffboardError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error {
        OffboardError::Validation { .. }
        | OffboardError::TemplateIntegrity { .. }
        | OffboardError::DuplicateProcess { .. }
        | OffboardError::TemplateNotFound { .. }
        | OffboardError::ProcessNotFound { .. }
        | OffboardError::TaskNotFound { .. }
        | OffboardError::PersonNotFound { .. } => ErrorData::invalid_params(text, None),
        _ => ErrorData::internal_error(text, None),
    }
}

/// Error for a lookup that found nothing.
pub fn not_found(kind: &str, id: u64) -> ErrorData {
    ErrorData::invalid_params(format!("{kind} with ID {id} not found"), None)
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_input_errors_are_invalid_params() {
        let error = OffboardError::validation("status").with_reason("unknown status");
        let mcp = to_mcp_error("Failed to update task", &error);
        assert_eq!(mcp.code, ErrorCode::INVALID_PARAMS);
        assert!(mcp.message.contains("Failed to update task"));
        assert!(mcp.message.contains("unknown status"));
    }

    #[test]
    fn test_database_errors_are_internal() {
        let error = OffboardError::Configuration {
            message: "Task join error".to_string(),
        };
        let mcp = to_mcp_error("Failed to list processes", &error);
        assert_eq!(mcp.code, ErrorCode::INTERNAL_ERROR);
    }
}
