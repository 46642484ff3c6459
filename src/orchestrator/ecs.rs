// ABOUTME: Amazon ECS implementation of the orchestrator traits.
// ABOUTME: Wraps the AWS SDK client and maps its models and errors to ours.

use crate::config::OrchestratorConfig;
use crate::orchestrator::error::{Operation, OrchestratorError};
use crate::orchestrator::traits::{ClusterOps, ServiceOps, TaskDefinitionOps};
use crate::orchestrator::types::{
    ListPage, PageRequest, ServiceDescription, TaskDefinition, TaskDefinitionRegistration,
    TaskSettings,
};
use crate::types::{ClusterArn, ServiceArn, TaskDefinitionArn};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_ecs::Client;
use aws_sdk_ecs::config::Region;
use aws_sdk_ecs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ecs::operation::register_task_definition::builders::RegisterTaskDefinitionFluentBuilder;
use aws_sdk_ecs::types::Service;

// =============================================================================
// Error Mapping Helpers
// =============================================================================

fn map_sdk_error<E, R>(operation: Operation, err: SdkError<E, R>) -> OrchestratorError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = err.code().map(str::to_string);
    let message = match (code.as_deref(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (None, Some(message)) => message.to_string(),
        _ => DisplayErrorContext(&err).to_string(),
    };
    OrchestratorError::Api {
        operation,
        code,
        message,
    }
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

fn service_description(
    operation: Operation,
    service: Service,
) -> Result<ServiceDescription, OrchestratorError> {
    let arn = service
        .service_arn
        .ok_or_else(|| OrchestratorError::missing(operation, "serviceArn"))?;
    Ok(ServiceDescription {
        arn: ServiceArn::new(arn),
        task_definition: service.task_definition.map(TaskDefinitionArn::new),
        desired_count: service.desired_count,
        running_count: service.running_count,
        pending_count: service.pending_count,
    })
}

fn task_definition(
    model: aws_sdk_ecs::types::TaskDefinition,
) -> Result<TaskDefinition, OrchestratorError> {
    const OP: Operation = Operation::DescribeTaskDefinition;

    let arn = model
        .task_definition_arn
        .ok_or_else(|| OrchestratorError::missing(OP, "taskDefinitionArn"))?;
    let family = model
        .family
        .ok_or_else(|| OrchestratorError::missing(OP, "family"))?;
    Ok(TaskDefinition {
        arn: TaskDefinitionArn::new(arn),
        family,
        revision: model.revision,
        containers: model.container_definitions.unwrap_or_default(),
        volumes: model.volumes.unwrap_or_default(),
        settings: TaskSettings {
            task_role_arn: model.task_role_arn,
            execution_role_arn: model.execution_role_arn,
            network_mode: model.network_mode,
            cpu: model.cpu,
            memory: model.memory,
            requires_compatibilities: model.requires_compatibilities.unwrap_or_default(),
            placement_constraints: model.placement_constraints.unwrap_or_default(),
            runtime_platform: model.runtime_platform,
            ephemeral_storage: model.ephemeral_storage,
            pid_mode: model.pid_mode,
            ipc_mode: model.ipc_mode,
            proxy_configuration: model.proxy_configuration,
            inference_accelerators: model.inference_accelerators.unwrap_or_default(),
        },
    })
}

/// Registration call for the next revision, carrying every field of `registration`.
fn register_request(
    client: &Client,
    registration: &TaskDefinitionRegistration,
) -> RegisterTaskDefinitionFluentBuilder {
    let settings = registration.settings.clone();
    client
        .register_task_definition()
        .family(registration.family.as_str())
        .set_container_definitions(Some(registration.containers.iter().cloned().collect()))
        .set_volumes(non_empty(registration.volumes.clone()))
        .set_task_role_arn(settings.task_role_arn)
        .set_execution_role_arn(settings.execution_role_arn)
        .set_network_mode(settings.network_mode)
        .set_cpu(settings.cpu)
        .set_memory(settings.memory)
        .set_requires_compatibilities(non_empty(settings.requires_compatibilities))
        .set_placement_constraints(non_empty(settings.placement_constraints))
        .set_runtime_platform(settings.runtime_platform)
        .set_ephemeral_storage(settings.ephemeral_storage)
        .set_pid_mode(settings.pid_mode)
        .set_ipc_mode(settings.ipc_mode)
        .set_proxy_configuration(settings.proxy_configuration)
        .set_inference_accelerators(non_empty(settings.inference_accelerators))
}

// =============================================================================
// EcsOrchestrator
// =============================================================================

/// Orchestrator backed by the Amazon ECS API.
#[derive(Debug, Clone)]
pub struct EcsOrchestrator {
    client: Client,
}

impl EcsOrchestrator {
    /// Wrap an existing SDK client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from explicit settings.
    ///
    /// Anything left unset (region, credentials) falls back to the SDK's
    /// standard provider chain: environment, shared config files, instance
    /// metadata.
    pub async fn connect(config: &OrchestratorConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(timeout) = config.timeout {
            loader = loader.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(timeout)
                    .build(),
            );
        }

        let sdk_config = loader.load().await;
        tracing::debug!(region = ?sdk_config.region(), "loaded AWS configuration");

        Self::new(Client::new(&sdk_config))
    }
}

#[async_trait]
impl ClusterOps for EcsOrchestrator {
    async fn list_clusters(
        &self,
        page: &PageRequest,
    ) -> Result<ListPage<ClusterArn>, OrchestratorError> {
        tracing::debug!(max_results = page.max_results, "listing clusters");

        let output = self
            .client
            .list_clusters()
            .max_results(page.max_results)
            .set_next_token(page.next_token.clone())
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::ListClusters, e))?;

        Ok(ListPage {
            items: output
                .cluster_arns
                .unwrap_or_default()
                .into_iter()
                .map(ClusterArn::new)
                .collect(),
            next_token: output.next_token,
        })
    }
}

#[async_trait]
impl ServiceOps for EcsOrchestrator {
    async fn list_services(
        &self,
        cluster: &ClusterArn,
        page: &PageRequest,
    ) -> Result<ListPage<ServiceArn>, OrchestratorError> {
        tracing::debug!(%cluster, max_results = page.max_results, "listing services");

        let output = self
            .client
            .list_services()
            .cluster(cluster.as_str())
            .max_results(page.max_results)
            .set_next_token(page.next_token.clone())
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::ListServices, e))?;

        Ok(ListPage {
            items: output
                .service_arns
                .unwrap_or_default()
                .into_iter()
                .map(ServiceArn::new)
                .collect(),
            next_token: output.next_token,
        })
    }

    async fn describe_services(
        &self,
        cluster: &ClusterArn,
        service: &ServiceArn,
    ) -> Result<Vec<ServiceDescription>, OrchestratorError> {
        tracing::debug!(%cluster, %service, "describing service");

        let output = self
            .client
            .describe_services()
            .cluster(cluster.as_str())
            .services(service.as_str())
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::DescribeServices, e))?;

        for failure in output.failures.unwrap_or_default() {
            tracing::debug!(
                arn = failure.arn.as_deref().unwrap_or_default(),
                reason = failure.reason.as_deref().unwrap_or_default(),
                "describe services reported a failure"
            );
        }

        output
            .services
            .unwrap_or_default()
            .into_iter()
            .map(|s| service_description(Operation::DescribeServices, s))
            .collect()
    }

    async fn update_service(
        &self,
        cluster: &ClusterArn,
        service: &ServiceArn,
        task_definition: &TaskDefinitionArn,
    ) -> Result<ServiceDescription, OrchestratorError> {
        tracing::debug!(%cluster, %service, %task_definition, "updating service");

        let output = self
            .client
            .update_service()
            .cluster(cluster.as_str())
            .service(service.as_str())
            .task_definition(task_definition.as_str())
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::UpdateService, e))?;

        let service = output
            .service
            .ok_or_else(|| OrchestratorError::missing(Operation::UpdateService, "service"))?;
        service_description(Operation::UpdateService, service)
    }
}

#[async_trait]
impl TaskDefinitionOps for EcsOrchestrator {
    async fn describe_task_definition(
        &self,
        arn: &TaskDefinitionArn,
    ) -> Result<TaskDefinition, OrchestratorError> {
        tracing::debug!(task_definition = %arn, "describing task definition");

        let output = self
            .client
            .describe_task_definition()
            .task_definition(arn.as_str())
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::DescribeTaskDefinition, e))?;

        let model = output.task_definition.ok_or_else(|| {
            OrchestratorError::missing(Operation::DescribeTaskDefinition, "taskDefinition")
        })?;
        task_definition(model)
    }

    async fn register_task_definition(
        &self,
        registration: &TaskDefinitionRegistration,
    ) -> Result<TaskDefinitionArn, OrchestratorError> {
        tracing::debug!(family = %registration.family, "registering task definition");

        let output = register_request(&self.client, registration)
            .send()
            .await
            .map_err(|e| map_sdk_error(Operation::RegisterTaskDefinition, e))?;

        output
            .task_definition
            .and_then(|td| td.task_definition_arn)
            .map(TaskDefinitionArn::new)
            .ok_or_else(|| {
                OrchestratorError::missing(Operation::RegisterTaskDefinition, "taskDefinitionArn")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_ecs::error::ErrorMetadata;
    use aws_sdk_ecs::operation::list_clusters::ListClustersError;
    use aws_sdk_ecs::types::{
        Compatibility, ContainerDefinition, IpcMode, NetworkMode, PidMode, Volume,
    };

    const TD_ARN: &str = "arn:aws:ecs:us-east-1:123456789012:task-definition/web:7";

    fn model() -> aws_sdk_ecs::types::builders::TaskDefinitionBuilder {
        aws_sdk_ecs::types::TaskDefinition::builder()
            .task_definition_arn(TD_ARN)
            .family("web")
            .revision(7)
    }

    fn test_client() -> Client {
        let config = aws_sdk_ecs::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        Client::from_conf(config)
    }

    #[test]
    fn task_definition_maps_containers_and_settings() {
        let model = model()
            .container_definitions(
                ContainerDefinition::builder()
                    .name("app")
                    .image("app:1.0")
                    .build(),
            )
            .volumes(Volume::builder().name("data").build())
            .network_mode(NetworkMode::Awsvpc)
            .cpu("256")
            .memory("512")
            .requires_compatibilities(Compatibility::Fargate)
            .pid_mode(PidMode::Task)
            .ipc_mode(IpcMode::Task)
            .build();

        let definition = task_definition(model).unwrap();

        assert_eq!(definition.arn.as_str(), TD_ARN);
        assert_eq!(definition.family, "web");
        assert_eq!(definition.revision, 7);
        assert_eq!(definition.container_names(), vec!["app"]);
        assert_eq!(definition.image_at(0), Some("app:1.0"));
        assert_eq!(definition.volumes.len(), 1);
        assert_eq!(definition.settings.network_mode, Some(NetworkMode::Awsvpc));
        assert_eq!(definition.settings.cpu.as_deref(), Some("256"));
        assert_eq!(
            definition.settings.requires_compatibilities,
            vec![Compatibility::Fargate]
        );
        assert_eq!(definition.settings.pid_mode, Some(PidMode::Task));
        assert_eq!(definition.settings.ipc_mode, Some(IpcMode::Task));
    }

    #[test]
    fn task_definition_without_containers_is_passed_through() {
        let definition = task_definition(model().build()).unwrap();
        assert!(definition.containers.is_empty());
        assert!(definition.into_registration().is_none());
    }

    #[test]
    fn task_definition_without_family_is_malformed() {
        let model = aws_sdk_ecs::types::TaskDefinition::builder()
            .task_definition_arn(TD_ARN)
            .build();

        let err = task_definition(model).unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::MalformedResponse { field: "family", .. }
        ));
    }

    #[test]
    fn service_description_maps_counts() {
        let service = Service::builder()
            .service_arn("arn:aws:ecs:us-east-1:123456789012:service/default/web")
            .task_definition(TD_ARN)
            .desired_count(3)
            .running_count(2)
            .pending_count(1)
            .build();

        let description = service_description(Operation::UpdateService, service).unwrap();
        assert_eq!(
            description.task_definition,
            Some(TaskDefinitionArn::new(TD_ARN))
        );
        assert_eq!(description.desired_count, 3);
        assert_eq!(description.running_count, 2);
        assert_eq!(description.pending_count, 1);
    }

    #[test]
    fn service_without_arn_is_malformed() {
        let err =
            service_description(Operation::DescribeServices, Service::builder().build()).unwrap_err();
        assert!(matches!(
            err,
            OrchestratorError::MalformedResponse {
                operation: Operation::DescribeServices,
                field: "serviceArn",
            }
        ));
    }

    #[test]
    fn register_request_carries_every_setting() {
        let mut definition = task_definition(
            model()
                .container_definitions(
                    ContainerDefinition::builder()
                        .name("app")
                        .image("app:1.0")
                        .build(),
                )
                .network_mode(NetworkMode::Awsvpc)
                .cpu("256")
                .requires_compatibilities(Compatibility::Fargate)
                .pid_mode(PidMode::Task)
                .ipc_mode(IpcMode::Task)
                .build(),
        )
        .unwrap()
        .into_registration()
        .unwrap();
        definition.set_image(0, "app:2.0");

        let client = test_client();
        let request = register_request(&client, &definition);
        let input = request.as_input();

        assert_eq!(input.get_family().as_deref(), Some("web"));
        let containers = input.get_container_definitions().as_ref().unwrap();
        assert_eq!(containers[0].image.as_deref(), Some("app:2.0"));
        assert_eq!(input.get_network_mode(), &Some(NetworkMode::Awsvpc));
        assert_eq!(input.get_cpu().as_deref(), Some("256"));
        assert_eq!(
            input.get_requires_compatibilities(),
            &Some(vec![Compatibility::Fargate])
        );
        assert_eq!(input.get_pid_mode(), &Some(PidMode::Task));
        assert_eq!(input.get_ipc_mode(), &Some(IpcMode::Task));
        assert!(input.get_placement_constraints().is_none());
        assert!(input.get_volumes().is_none());
    }

    #[test]
    fn api_error_message_includes_code() {
        let err = SdkError::service_error(
            ListClustersError::generic(
                ErrorMetadata::builder()
                    .code("AccessDeniedException")
                    .message("not authorized")
                    .build(),
            ),
            (),
        );

        let mapped = map_sdk_error(Operation::ListClusters, err);
        assert_eq!(
            mapped.to_string(),
            "ListClusters failed: AccessDeniedException: not authorized"
        );
        assert!(matches!(
            mapped,
            OrchestratorError::Api { code: Some(ref code), .. } if code == "AccessDeniedException"
        ));
    }

    #[test]
    fn transport_error_uses_error_chain() {
        let err = SdkError::<ListClustersError, ()>::timeout_error("deadline exceeded");

        let mapped = map_sdk_error(Operation::ListClusters, err);
        assert!(matches!(mapped, OrchestratorError::Api { code: None, .. }));
        assert!(mapped.to_string().contains("deadline exceeded"));
    }

    #[test]
    fn non_empty_drops_empty_lists() {
        assert_eq!(non_empty(Vec::<i32>::new()), None);
        assert_eq!(non_empty(vec![1]), Some(vec![1]));
    }
}
