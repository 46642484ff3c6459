// ABOUTME: Rollout pipeline using the type state pattern.
// ABOUTME: Resolve cluster, resolve service, locate and mutate the task definition, update.

mod container;
mod error;
mod pipeline;
mod request;
mod resolve;
mod state;
mod transitions;

pub use container::ContainerSelector;
pub use error::{RolloutError, RolloutErrorKind};
pub use pipeline::{DeploymentResult, Rollout, run};
pub use request::{ListingOptions, RolloutRequest};
pub use resolve::{find_cluster_arn, find_service_arn, first_named};
pub use state::{ClusterResolved, Deployed, ImageSet, Requested, ServiceResolved, TaskLocated};
pub use transitions::TransitionResult;
