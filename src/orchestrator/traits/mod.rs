// ABOUTME: Composable capability traits for cluster orchestrators.
// ABOUTME: Defines ClusterOps, ServiceOps, TaskDefinitionOps and the Orchestrator bundle.

mod cluster;
mod service;
mod task_definition;

pub use cluster::ClusterOps;
pub use service::ServiceOps;
pub use task_definition::TaskDefinitionOps;

/// Everything the rollout pipeline needs from an orchestrator.
///
/// Implemented automatically for any type providing all capabilities.
pub trait Orchestrator: ClusterOps + ServiceOps + TaskDefinitionOps {}

impl<T: ClusterOps + ServiceOps + TaskDefinitionOps> Orchestrator for T {}
