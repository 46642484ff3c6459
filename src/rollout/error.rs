// ABOUTME: Rollout error types with SNAFU pattern.
// ABOUTME: Separates not-found, precondition and upstream failures for programmatic handling.

use snafu::Snafu;

use crate::orchestrator::OrchestratorError;
use crate::types::{ClusterArn, ResourceName, ServiceArn, TaskDefinitionArn};

/// Why a rollout stopped. Every variant is terminal for the run.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum RolloutError {
    #[snafu(display("could not find cluster with name: {name}"))]
    ClusterNotFound { name: ResourceName },

    #[snafu(display("could not find service with name: {name} in cluster {cluster}"))]
    ServiceNotFound {
        name: ResourceName,
        cluster: ClusterArn,
    },

    #[snafu(display("service {service} was not returned when described"))]
    ServiceNotDescribed { service: ServiceArn },

    #[snafu(display("service {service} has no active task definition"))]
    NoActiveTaskDefinition { service: ServiceArn },

    #[snafu(display("task definition {task_definition} has no container definitions"))]
    NoContainers { task_definition: TaskDefinitionArn },

    #[snafu(display(
        "task definition {task_definition} has {count} containers ({names}); name the one to update"
    ))]
    AmbiguousContainer {
        task_definition: TaskDefinitionArn,
        count: usize,
        names: String,
    },

    #[snafu(display("task definition {task_definition} has no container named {name}"))]
    ContainerNotFound {
        task_definition: TaskDefinitionArn,
        name: String,
    },

    #[snafu(display("{source}"))]
    Upstream { source: OrchestratorError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutErrorKind {
    /// A cluster or service name matched nothing in the listing.
    NotFound,
    /// The resources exist but are not in a shape the rollout can act on.
    Precondition,
    /// An orchestrator call failed.
    Upstream,
}

impl RolloutErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RolloutErrorKind::NotFound => "not_found",
            RolloutErrorKind::Precondition => "precondition",
            RolloutErrorKind::Upstream => "upstream",
        }
    }
}

impl RolloutError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> RolloutErrorKind {
        match self {
            RolloutError::ClusterNotFound { .. } | RolloutError::ServiceNotFound { .. } => {
                RolloutErrorKind::NotFound
            }
            RolloutError::ServiceNotDescribed { .. }
            | RolloutError::NoActiveTaskDefinition { .. }
            | RolloutError::NoContainers { .. }
            | RolloutError::AmbiguousContainer { .. }
            | RolloutError::ContainerNotFound { .. } => RolloutErrorKind::Precondition,
            RolloutError::Upstream { .. } => RolloutErrorKind::Upstream,
        }
    }
}

impl From<OrchestratorError> for RolloutError {
    fn from(source: OrchestratorError) -> Self {
        RolloutError::Upstream { source }
    }
}
