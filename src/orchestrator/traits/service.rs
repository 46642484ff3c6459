// ABOUTME: Service operations trait for orchestrators.
// ABOUTME: List, describe and update services within a cluster.

use crate::orchestrator::error::OrchestratorError;
use crate::orchestrator::types::{ListPage, PageRequest, ServiceDescription};
use crate::types::{ClusterArn, ServiceArn, TaskDefinitionArn};
use async_trait::async_trait;

#[async_trait]
pub trait ServiceOps: Send + Sync {
    /// List one page of service ARNs in a cluster.
    async fn list_services(
        &self,
        cluster: &ClusterArn,
        page: &PageRequest,
    ) -> Result<ListPage<ServiceArn>, OrchestratorError>;

    /// Describe a service. An empty result means the orchestrator reported
    /// no such service.
    async fn describe_services(
        &self,
        cluster: &ClusterArn,
        service: &ServiceArn,
    ) -> Result<Vec<ServiceDescription>, OrchestratorError>;

    /// Point a service at a task definition revision, starting a rolling update.
    async fn update_service(
        &self,
        cluster: &ClusterArn,
        service: &ServiceArn,
        task_definition: &TaskDefinitionArn,
    ) -> Result<ServiceDescription, OrchestratorError>;
}
