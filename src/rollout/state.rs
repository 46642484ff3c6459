// ABOUTME: Rollout state marker types for the type state pattern.
// ABOUTME: Each state carries the identifiers resolved so far.

use crate::types::{ClusterArn, ServiceArn, TaskDefinitionArn};

use super::pipeline::DeploymentResult;

/// Nothing resolved yet.
/// Available actions: `resolve_cluster()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Requested;

/// Cluster ARN known.
/// Available actions: `resolve_service()`
#[derive(Debug, Clone)]
pub struct ClusterResolved {
    pub(crate) cluster: ClusterArn,
}

/// Cluster and service ARNs known.
/// Available actions: `locate_task_definition()`
#[derive(Debug, Clone)]
pub struct ServiceResolved {
    pub(crate) cluster: ClusterArn,
    pub(crate) service: ServiceArn,
}

/// The service's current task definition is known.
/// Available actions: `set_image()`
#[derive(Debug, Clone)]
pub struct TaskLocated {
    pub(crate) cluster: ClusterArn,
    pub(crate) service: ServiceArn,
    pub(crate) task_definition: TaskDefinitionArn,
}

/// A task definition carrying the requested image exists.
/// Available actions: `update_service()`
#[derive(Debug, Clone)]
pub struct ImageSet {
    pub(crate) cluster: ClusterArn,
    pub(crate) service: ServiceArn,
    pub(crate) previous: TaskDefinitionArn,
    pub(crate) task_definition: TaskDefinitionArn,
    pub(crate) registered: bool,
}

/// The orchestrator accepted the service update.
/// Available actions: `finish()`
#[derive(Debug, Clone)]
pub struct Deployed {
    pub(crate) result: DeploymentResult,
}
