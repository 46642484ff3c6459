// ABOUTME: Generic rollout struct parameterized by state marker, and the end-to-end driver.
// ABOUTME: run() chains every transition in order and records non-fatal warnings.

use serde::Serialize;

use crate::diagnostics::{Diagnostics, Warning};
use crate::orchestrator::Orchestrator;
use crate::types::{ClusterArn, ServiceArn, TaskDefinitionArn};

use super::error::RolloutError;
use super::request::RolloutRequest;
use super::state::{
    ClusterResolved, Deployed, ImageSet, Requested, ServiceResolved, TaskLocated,
};

/// Outcome of an accepted service update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentResult {
    pub cluster: ClusterArn,
    pub service: ServiceArn,
    /// The revision the service now points at.
    pub task_definition: TaskDefinitionArn,
    /// The revision the service was running before the update.
    pub previous_task_definition: TaskDefinitionArn,
    /// Whether a new revision was registered (false when the image was already current).
    pub registered: bool,
    pub desired_count: i32,
    pub running_count: i32,
    /// Replicas not yet converged to the requested revision.
    pub pending_count: i32,
}

/// A rollout in progress, parameterized by its current state.
///
/// The state type `S` carries the identifiers resolved so far, so each step
/// can only be called once everything it depends on exists.
#[derive(Debug)]
pub struct Rollout<S> {
    pub(crate) request: RolloutRequest,
    pub(crate) state: S,
}

impl Rollout<Requested> {
    pub fn new(request: RolloutRequest) -> Self {
        Rollout {
            request,
            state: Requested,
        }
    }
}

impl Rollout<ClusterResolved> {
    pub fn cluster(&self) -> &ClusterArn {
        &self.state.cluster
    }
}

impl Rollout<ServiceResolved> {
    pub fn service(&self) -> &ServiceArn {
        &self.state.service
    }
}

impl Rollout<TaskLocated> {
    pub fn current_task_definition(&self) -> &TaskDefinitionArn {
        &self.state.task_definition
    }
}

impl Rollout<ImageSet> {
    /// The revision the service will be pointed at.
    pub fn task_definition(&self) -> &TaskDefinitionArn {
        &self.state.task_definition
    }

    /// Whether `set_image` registered a new revision.
    pub fn registered(&self) -> bool {
        self.state.registered
    }
}

impl Rollout<Deployed> {
    /// Terminal state: hand back the deployment result.
    pub fn finish(self) -> DeploymentResult {
        self.state.result
    }
}

/// Run the whole rollout: resolve cluster, resolve service, locate the task
/// definition, swap the image, update the service.
///
/// A failed update after a new revision was registered leaves that revision
/// unreferenced; it is reported in `diag` and not cleaned up.
pub async fn run<O: Orchestrator>(
    orchestrator: &O,
    request: RolloutRequest,
    diag: &mut Diagnostics,
) -> Result<DeploymentResult, RolloutError> {
    let rollout = Rollout::new(request)
        .resolve_cluster(orchestrator, diag)
        .await?
        .resolve_service(orchestrator, diag)
        .await?
        .locate_task_definition(orchestrator)
        .await?
        .set_image(orchestrator)
        .await?;

    match rollout.update_service(orchestrator).await {
        Ok(deployed) => Ok(deployed.finish()),
        Err((failed, e)) => {
            if failed.registered() {
                diag.warn(Warning::orphaned_revision(format!(
                    "task definition {} was registered but no service uses it",
                    failed.task_definition()
                )));
            }
            Err(e)
        }
    }
}
