// ABOUTME: State transition methods for the rollout pipeline.
// ABOUTME: Each method consumes self and returns the next state on success.

use snafu::OptionExt;

use crate::diagnostics::Diagnostics;
use crate::orchestrator::{ClusterOps, ServiceOps, TaskDefinitionOps};

use super::Rollout;
use super::error::{
    NoActiveTaskDefinitionSnafu, NoContainersSnafu, RolloutError, ServiceNotDescribedSnafu,
};
use super::pipeline::DeploymentResult;
use super::resolve::{find_cluster_arn, find_service_arn};
use super::state::{ClusterResolved, Deployed, ImageSet, Requested, ServiceResolved, TaskLocated};

/// Result type for transitions that hand the previous state back on failure.
pub type TransitionResult<T, S> = Result<Rollout<T>, (Rollout<S>, RolloutError)>;

impl<S> Rollout<S> {
    fn transition<T>(self, state: T) -> Rollout<T> {
        Rollout {
            request: self.request,
            state,
        }
    }
}

// =============================================================================
// Requested -> ClusterResolved
// =============================================================================

impl Rollout<Requested> {
    /// Resolve the requested cluster name to its ARN.
    ///
    /// # Errors
    ///
    /// `RolloutError::ClusterNotFound` if no listed cluster carries the name,
    /// `RolloutError::Upstream` if listing fails.
    #[must_use = "rollout state must be used"]
    pub async fn resolve_cluster<O: ClusterOps>(
        self,
        orchestrator: &O,
        diag: &mut Diagnostics,
    ) -> Result<Rollout<ClusterResolved>, RolloutError> {
        let cluster = find_cluster_arn(
            orchestrator,
            &self.request.cluster,
            &self.request.listing,
            diag,
        )
        .await?;
        tracing::debug!(%cluster, "resolved cluster");

        Ok(self.transition(ClusterResolved { cluster }))
    }
}

// =============================================================================
// ClusterResolved -> ServiceResolved
// =============================================================================

impl Rollout<ClusterResolved> {
    /// Resolve the requested service name within the resolved cluster.
    #[must_use = "rollout state must be used"]
    pub async fn resolve_service<O: ServiceOps>(
        self,
        orchestrator: &O,
        diag: &mut Diagnostics,
    ) -> Result<Rollout<ServiceResolved>, RolloutError> {
        let service = find_service_arn(
            orchestrator,
            &self.state.cluster,
            &self.request.service,
            &self.request.listing,
            diag,
        )
        .await?;
        tracing::debug!(%service, "resolved service");

        let cluster = self.state.cluster.clone();
        Ok(self.transition(ServiceResolved { cluster, service }))
    }
}

// =============================================================================
// ServiceResolved -> TaskLocated
// =============================================================================

impl Rollout<ServiceResolved> {
    /// Find the task definition the service is currently running.
    ///
    /// # Errors
    ///
    /// `RolloutError::ServiceNotDescribed` or `RolloutError::NoActiveTaskDefinition`
    /// if the description has nothing to act on.
    #[must_use = "rollout state must be used"]
    pub async fn locate_task_definition<O: ServiceOps>(
        self,
        orchestrator: &O,
    ) -> Result<Rollout<TaskLocated>, RolloutError> {
        let ServiceResolved { cluster, service } = self.state.clone();

        let description = orchestrator
            .describe_services(&cluster, &service)
            .await?
            .into_iter()
            .next()
            .context(ServiceNotDescribedSnafu {
                service: service.clone(),
            })?;

        let task_definition =
            description
                .task_definition
                .context(NoActiveTaskDefinitionSnafu {
                    service: service.clone(),
                })?;
        tracing::debug!(%task_definition, "located active task definition");

        Ok(self.transition(TaskLocated {
            cluster,
            service,
            task_definition,
        }))
    }
}

// =============================================================================
// TaskLocated -> ImageSet
// =============================================================================

impl Rollout<TaskLocated> {
    /// Make sure a task definition with the requested image exists.
    ///
    /// If the selected container already runs the requested image, the
    /// current revision is kept and nothing is registered. Otherwise a new
    /// revision is registered with only that container's image changed.
    #[must_use = "rollout state must be used"]
    pub async fn set_image<O: TaskDefinitionOps>(
        self,
        orchestrator: &O,
    ) -> Result<Rollout<ImageSet>, RolloutError> {
        let TaskLocated {
            cluster,
            service,
            task_definition: previous,
        } = self.state.clone();

        let definition = orchestrator.describe_task_definition(&previous).await?;
        let index = self.request.container.select(&definition)?;
        let image = self.request.image.as_str();

        if definition.image_at(index) == Some(image) {
            tracing::info!(task_definition = %previous, %image, "image already current; keeping revision");
            return Ok(self.transition(ImageSet {
                cluster,
                service,
                task_definition: previous.clone(),
                previous,
                registered: false,
            }));
        }

        let mut registration =
            definition
                .into_registration()
                .context(NoContainersSnafu {
                    task_definition: previous.clone(),
                })?;
        registration.set_image(index, image);
        let task_definition = orchestrator.register_task_definition(&registration).await?;
        tracing::info!(%task_definition, %image, "registered task definition");

        Ok(self.transition(ImageSet {
            cluster,
            service,
            previous,
            task_definition,
            registered: true,
        }))
    }
}

// =============================================================================
// ImageSet -> Deployed
// =============================================================================

impl Rollout<ImageSet> {
    /// Point the service at the task definition from `set_image`.
    ///
    /// On failure the current state is handed back so the caller can tell
    /// whether a revision was registered for nothing.
    pub async fn update_service<O: ServiceOps>(
        self,
        orchestrator: &O,
    ) -> TransitionResult<Deployed, ImageSet> {
        let status = match orchestrator
            .update_service(
                &self.state.cluster,
                &self.state.service,
                &self.state.task_definition,
            )
            .await
        {
            Ok(status) => status,
            Err(e) => return Err((self, e.into())),
        };
        tracing::info!(
            service = %status.arn,
            pending = status.pending_count,
            "service update accepted"
        );

        let ImageSet {
            cluster,
            service,
            previous,
            task_definition,
            registered,
        } = self.state.clone();

        Ok(self.transition(Deployed {
            result: DeploymentResult {
                cluster,
                service,
                task_definition,
                previous_task_definition: previous,
                registered,
                desired_count: status.desired_count,
                running_count: status.running_count,
                pending_count: status.pending_count,
            },
        }))
    }
}
