// ABOUTME: Test support utilities.
// ABOUTME: Provides an in-memory orchestrator that records every call made to it.

#![allow(dead_code)]

use async_trait::async_trait;
use aws_sdk_ecs::types::{ContainerDefinition, Volume};
use ecs_rollout::orchestrator::{
    ClusterOps, ListPage, Operation, OrchestratorError, PageRequest, ServiceDescription,
    ServiceOps, TaskDefinition, TaskDefinitionOps, TaskDefinitionRegistration, TaskSettings,
};
use ecs_rollout::types::{ClusterArn, ServiceArn, TaskDefinitionArn};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Once;

pub const ACCOUNT: &str = "arn:aws:ecs:us-east-1:123456789012";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("ecs_rollout=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub fn cluster_arn(name: &str) -> ClusterArn {
    ClusterArn::new(format!("{ACCOUNT}:cluster/{name}"))
}

pub fn service_arn(cluster: &str, name: &str) -> ServiceArn {
    ServiceArn::new(format!("{ACCOUNT}:service/{cluster}/{name}"))
}

pub fn task_definition_arn(family: &str, revision: i32) -> TaskDefinitionArn {
    TaskDefinitionArn::new(format!("{ACCOUNT}:task-definition/{family}:{revision}"))
}

pub fn container(name: &str, image: &str) -> ContainerDefinition {
    ContainerDefinition::builder()
        .name(name)
        .image(image)
        .essential(true)
        .memory(512)
        .build()
}

/// A task definition revision with the given containers and one volume.
pub fn task_definition(
    family: &str,
    revision: i32,
    containers: Vec<ContainerDefinition>,
) -> TaskDefinition {
    TaskDefinition {
        arn: task_definition_arn(family, revision),
        family: family.to_string(),
        revision,
        containers,
        volumes: vec![Volume::builder().name("data").build()],
        settings: TaskSettings {
            cpu: Some("256".to_string()),
            memory: Some("512".to_string()),
            ..Default::default()
        },
    }
}

/// One call received by the fake, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListClusters(PageRequest),
    ListServices(ClusterArn, PageRequest),
    DescribeServices(ClusterArn, ServiceArn),
    DescribeTaskDefinition(TaskDefinitionArn),
    RegisterTaskDefinition(TaskDefinitionRegistration),
    UpdateService(ClusterArn, ServiceArn, TaskDefinitionArn),
}

impl Call {
    pub fn operation(&self) -> Operation {
        match self {
            Call::ListClusters(_) => Operation::ListClusters,
            Call::ListServices(..) => Operation::ListServices,
            Call::DescribeServices(..) => Operation::DescribeServices,
            Call::DescribeTaskDefinition(_) => Operation::DescribeTaskDefinition,
            Call::RegisterTaskDefinition(_) => Operation::RegisterTaskDefinition,
            Call::UpdateService(..) => Operation::UpdateService,
        }
    }
}

/// In-memory orchestrator. Listings are split into pages whose continuation
/// token is the index of the next page.
#[derive(Default)]
pub struct FakeOrchestrator {
    cluster_pages: Vec<Vec<ClusterArn>>,
    service_pages: HashMap<ClusterArn, Vec<Vec<ServiceArn>>>,
    active: HashMap<ServiceArn, Option<TaskDefinitionArn>>,
    task_definitions: Mutex<HashMap<TaskDefinitionArn, TaskDefinition>>,
    failing: HashSet<Operation>,
    pending_count: i32,
    calls: Mutex<Vec<Call>>,
}

impl FakeOrchestrator {
    pub fn new() -> Self {
        Self {
            pending_count: 2,
            ..Default::default()
        }
    }

    /// Add a page to the cluster listing.
    pub fn with_cluster_page(mut self, arns: Vec<ClusterArn>) -> Self {
        self.cluster_pages.push(arns);
        self
    }

    /// Add a page to a cluster's service listing.
    pub fn with_service_page(mut self, cluster: &ClusterArn, arns: Vec<ServiceArn>) -> Self {
        self.service_pages
            .entry(cluster.clone())
            .or_default()
            .push(arns);
        self
    }

    /// Make `service` run `definition`, which is also registered.
    pub fn with_running(mut self, service: &ServiceArn, definition: TaskDefinition) -> Self {
        self.active
            .insert(service.clone(), Some(definition.arn.clone()));
        self.task_definitions
            .get_mut()
            .insert(definition.arn.clone(), definition);
        self
    }

    /// Describe `service` without a task definition.
    pub fn with_idle(mut self, service: &ServiceArn) -> Self {
        self.active.insert(service.clone(), None);
        self
    }

    pub fn failing(mut self, operation: Operation) -> Self {
        self.failing.insert(operation);
        self
    }

    pub fn with_pending_count(mut self, pending: i32) -> Self {
        self.pending_count = pending;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.calls.lock().iter().map(Call::operation).collect()
    }

    pub fn registrations(&self) -> Vec<TaskDefinitionRegistration> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                Call::RegisterTaskDefinition(r) => Some(r.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn task_definition(&self, arn: &TaskDefinitionArn) -> Option<TaskDefinition> {
        self.task_definitions.lock().get(arn).cloned()
    }

    fn record(&self, call: Call) -> Result<(), OrchestratorError> {
        let operation = call.operation();
        self.calls.lock().push(call);
        if self.failing.contains(&operation) {
            return Err(OrchestratorError::api(
                operation,
                "AccessDeniedException: not authorized",
            ));
        }
        Ok(())
    }
}

fn page_of<T: Clone>(pages: &[Vec<T>], request: &PageRequest) -> ListPage<T> {
    let index: usize = request
        .next_token
        .as_deref()
        .map(|t| t.parse().expect("fake token is a page index"))
        .unwrap_or(0);
    let items = pages.get(index).cloned().unwrap_or_default();
    assert!(
        items.len() <= request.max_results as usize,
        "fake page larger than requested page size"
    );
    let next_token = (index + 1 < pages.len()).then(|| (index + 1).to_string());
    ListPage { items, next_token }
}

#[async_trait]
impl ClusterOps for FakeOrchestrator {
    async fn list_clusters(
        &self,
        page: &PageRequest,
    ) -> Result<ListPage<ClusterArn>, OrchestratorError> {
        self.record(Call::ListClusters(page.clone()))?;
        Ok(page_of(&self.cluster_pages, page))
    }
}

#[async_trait]
impl ServiceOps for FakeOrchestrator {
    async fn list_services(
        &self,
        cluster: &ClusterArn,
        page: &PageRequest,
    ) -> Result<ListPage<ServiceArn>, OrchestratorError> {
        self.record(Call::ListServices(cluster.clone(), page.clone()))?;
        let pages = self.service_pages.get(cluster).cloned().unwrap_or_default();
        Ok(page_of(&pages, page))
    }

    async fn describe_services(
        &self,
        cluster: &ClusterArn,
        service: &ServiceArn,
    ) -> Result<Vec<ServiceDescription>, OrchestratorError> {
        self.record(Call::DescribeServices(cluster.clone(), service.clone()))?;
        Ok(self
            .active
            .get(service)
            .map(|task_definition| ServiceDescription {
                arn: service.clone(),
                task_definition: task_definition.clone(),
                desired_count: 2,
                running_count: 2,
                pending_count: 0,
            })
            .into_iter()
            .collect())
    }

    async fn update_service(
        &self,
        cluster: &ClusterArn,
        service: &ServiceArn,
        task_definition: &TaskDefinitionArn,
    ) -> Result<ServiceDescription, OrchestratorError> {
        self.record(Call::UpdateService(
            cluster.clone(),
            service.clone(),
            task_definition.clone(),
        ))?;
        Ok(ServiceDescription {
            arn: service.clone(),
            task_definition: Some(task_definition.clone()),
            desired_count: 2,
            running_count: 2,
            pending_count: self.pending_count,
        })
    }
}

#[async_trait]
impl TaskDefinitionOps for FakeOrchestrator {
    async fn describe_task_definition(
        &self,
        arn: &TaskDefinitionArn,
    ) -> Result<TaskDefinition, OrchestratorError> {
        self.record(Call::DescribeTaskDefinition(arn.clone()))?;
        self.task_definitions.lock().get(arn).cloned().ok_or_else(|| {
            OrchestratorError::api(
                Operation::DescribeTaskDefinition,
                "ClientException: Unable to describe task definition.",
            )
        })
    }

    async fn register_task_definition(
        &self,
        registration: &TaskDefinitionRegistration,
    ) -> Result<TaskDefinitionArn, OrchestratorError> {
        self.record(Call::RegisterTaskDefinition(registration.clone()))?;

        let mut definitions = self.task_definitions.lock();
        let revision = definitions
            .values()
            .filter(|d| d.family == registration.family)
            .map(|d| d.revision)
            .max()
            .unwrap_or(0)
            + 1;
        let arn = task_definition_arn(&registration.family, revision);
        definitions.insert(
            arn.clone(),
            TaskDefinition {
                arn: arn.clone(),
                family: registration.family.clone(),
                revision,
                containers: registration.containers.iter().cloned().collect(),
                volumes: registration.volumes.clone(),
                settings: registration.settings.clone(),
            },
        );
        Ok(arn)
    }
}
