// ABOUTME: Selection of the one container definition whose image gets replaced.
// ABOUTME: Multi-container task definitions must name their target explicitly.

use snafu::OptionExt;

use crate::orchestrator::TaskDefinition;

use super::error::{
    AmbiguousContainerSnafu, ContainerNotFoundSnafu, NoContainersSnafu, RolloutError,
};

/// Which container definition of a task definition to update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContainerSelector {
    /// The task definition must have exactly one container.
    #[default]
    Sole,
    /// The container definition with this name.
    Named(String),
}

impl ContainerSelector {
    /// Index of the selected container within `definition.containers`.
    pub fn select(&self, definition: &TaskDefinition) -> Result<usize, RolloutError> {
        match self {
            ContainerSelector::Sole => match definition.containers.len() {
                0 => NoContainersSnafu {
                    task_definition: definition.arn.clone(),
                }
                .fail(),
                1 => Ok(0),
                count => AmbiguousContainerSnafu {
                    task_definition: definition.arn.clone(),
                    count,
                    names: definition.container_names().join(", "),
                }
                .fail(),
            },
            ContainerSelector::Named(name) => definition
                .containers
                .iter()
                .position(|c| c.name.as_deref() == Some(name.as_str()))
                .context(ContainerNotFoundSnafu {
                    task_definition: definition.arn.clone(),
                    name: name.clone(),
                }),
        }
    }
}

impl From<Option<String>> for ContainerSelector {
    fn from(name: Option<String>) -> Self {
        name.map_or(ContainerSelector::Sole, ContainerSelector::Named)
    }
}
