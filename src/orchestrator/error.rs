// ABOUTME: Error type for failed orchestrator API calls.
// ABOUTME: Carries the failed operation, the service error code and its message.

use std::fmt;

/// The orchestrator API operation that was being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListClusters,
    ListServices,
    DescribeServices,
    DescribeTaskDefinition,
    RegisterTaskDefinition,
    UpdateService,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListClusters => "ListClusters",
            Operation::ListServices => "ListServices",
            Operation::DescribeServices => "DescribeServices",
            Operation::DescribeTaskDefinition => "DescribeTaskDefinition",
            Operation::RegisterTaskDefinition => "RegisterTaskDefinition",
            Operation::UpdateService => "UpdateService",
        };
        f.write_str(name)
    }
}

/// Errors from orchestrator API calls.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// The call itself failed: network, credentials, throttling, validation.
    #[error("{operation} failed: {message}")]
    Api {
        operation: Operation,
        code: Option<String>,
        message: String,
    },

    /// The call succeeded but a field the caller relies on was absent.
    #[error("{operation} returned an incomplete response: missing {field}")]
    MalformedResponse {
        operation: Operation,
        field: &'static str,
    },
}

impl OrchestratorError {
    pub fn api(operation: Operation, message: impl Into<String>) -> Self {
        OrchestratorError::Api {
            operation,
            code: None,
            message: message.into(),
        }
    }

    pub fn missing(operation: Operation, field: &'static str) -> Self {
        OrchestratorError::MalformedResponse { operation, field }
    }
}
