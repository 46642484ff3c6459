// ABOUTME: Orchestrator client abstraction and the Amazon ECS implementation.
// ABOUTME: The rollout pipeline only talks to the capability traits defined here.

mod ecs;
mod error;
pub mod traits;
mod types;

pub use ecs::EcsOrchestrator;
pub use error::{Operation, OrchestratorError};
pub use traits::{ClusterOps, Orchestrator, ServiceOps, TaskDefinitionOps};
pub use types::{
    ListPage, MAX_PAGE_SIZE, PageRequest, ServiceDescription, TaskDefinition,
    TaskDefinitionRegistration, TaskSettings,
};
