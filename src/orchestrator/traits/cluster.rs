// ABOUTME: Cluster operations trait for orchestrators.
// ABOUTME: List the clusters visible to the caller.

use crate::orchestrator::error::OrchestratorError;
use crate::orchestrator::types::{ListPage, PageRequest};
use crate::types::ClusterArn;
use async_trait::async_trait;

#[async_trait]
pub trait ClusterOps: Send + Sync {
    /// List one page of cluster ARNs.
    async fn list_clusters(
        &self,
        page: &PageRequest,
    ) -> Result<ListPage<ClusterArn>, OrchestratorError>;
}
