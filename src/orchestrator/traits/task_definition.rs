// ABOUTME: Task definition operations trait for orchestrators.
// ABOUTME: Describe existing revisions and register new ones.

use crate::orchestrator::error::OrchestratorError;
use crate::orchestrator::types::{TaskDefinition, TaskDefinitionRegistration};
use crate::types::TaskDefinitionArn;
use async_trait::async_trait;

#[async_trait]
pub trait TaskDefinitionOps: Send + Sync {
    /// Fetch a full task definition revision.
    async fn describe_task_definition(
        &self,
        arn: &TaskDefinitionArn,
    ) -> Result<TaskDefinition, OrchestratorError>;

    /// Register a new revision, returning its ARN.
    async fn register_task_definition(
        &self,
        registration: &TaskDefinitionRegistration,
    ) -> Result<TaskDefinitionArn, OrchestratorError>;
}
