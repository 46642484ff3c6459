// ABOUTME: Data exchanged with the orchestrator: listing pages, service and task definitions.
// ABOUTME: Container and volume definitions reuse the ECS model types so no field is lost.

use crate::types::{ServiceArn, TaskDefinitionArn};
use aws_sdk_ecs::types::{
    Compatibility, ContainerDefinition, EphemeralStorage, InferenceAccelerator, IpcMode,
    NetworkMode, PidMode, ProxyConfiguration, RuntimePlatform,
    TaskDefinitionPlacementConstraint, Volume,
};
use nonempty::NonEmpty;

/// Largest page the ECS list APIs accept.
pub const MAX_PAGE_SIZE: i32 = 100;

/// Parameters for one call to a paginated listing API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub max_results: i32,
    pub next_token: Option<String>,
}

impl PageRequest {
    pub fn first(max_results: i32) -> Self {
        Self {
            max_results,
            next_token: None,
        }
    }

    pub fn after(max_results: i32, next_token: String) -> Self {
        Self {
            max_results,
            next_token: Some(next_token),
        }
    }
}

/// One page of a listing, in the order the orchestrator returned it.
#[derive(Debug, Clone)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

/// The parts of a described service the rollout needs.
#[derive(Debug, Clone)]
pub struct ServiceDescription {
    pub arn: ServiceArn,
    pub task_definition: Option<TaskDefinitionArn>,
    pub desired_count: i32,
    pub running_count: i32,
    pub pending_count: i32,
}

/// Task-level settings that must survive re-registration.
///
/// Fargate rejects a revision that drops e.g. `cpu`/`memory` or the
/// `awsvpc` network mode, and silently shrinks ephemeral storage back to
/// the default, so these are carried over unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskSettings {
    pub task_role_arn: Option<String>,
    pub execution_role_arn: Option<String>,
    pub network_mode: Option<NetworkMode>,
    pub cpu: Option<String>,
    pub memory: Option<String>,
    pub requires_compatibilities: Vec<Compatibility>,
    pub placement_constraints: Vec<TaskDefinitionPlacementConstraint>,
    pub runtime_platform: Option<RuntimePlatform>,
    pub ephemeral_storage: Option<EphemeralStorage>,
    pub pid_mode: Option<PidMode>,
    pub ipc_mode: Option<IpcMode>,
    pub proxy_configuration: Option<ProxyConfiguration>,
    pub inference_accelerators: Vec<InferenceAccelerator>,
}

/// A registered task definition revision.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDefinition {
    pub arn: TaskDefinitionArn,
    pub family: String,
    pub revision: i32,
    /// Container definitions as described. May be empty; selection rejects that.
    pub containers: Vec<ContainerDefinition>,
    pub volumes: Vec<Volume>,
    pub settings: TaskSettings,
}

impl TaskDefinition {
    /// Names of the container definitions, in order.
    pub fn container_names(&self) -> Vec<&str> {
        self.containers
            .iter()
            .map(|c| c.name.as_deref().unwrap_or(""))
            .collect()
    }

    /// Image of the container definition at `index`.
    pub fn image_at(&self, index: usize) -> Option<&str> {
        self.containers.get(index).and_then(|c| c.image.as_deref())
    }

    /// Turn this revision into a registration request for the next one.
    ///
    /// `None` when there are no container definitions to register.
    pub fn into_registration(self) -> Option<TaskDefinitionRegistration> {
        Some(TaskDefinitionRegistration {
            family: self.family,
            containers: NonEmpty::from_vec(self.containers)?,
            volumes: self.volumes,
            settings: self.settings,
        })
    }
}

/// Input for registering a new task definition revision.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDefinitionRegistration {
    pub family: String,
    pub containers: NonEmpty<ContainerDefinition>,
    pub volumes: Vec<Volume>,
    pub settings: TaskSettings,
}

impl TaskDefinitionRegistration {
    /// Replace the image of the container definition at `index`, leaving
    /// every other field untouched.
    pub fn set_image(&mut self, index: usize, image: &str) {
        if let Some(container) = self.containers.iter_mut().nth(index) {
            container.image = Some(image.to_string());
        }
    }
}
