// ABOUTME: Application-wide error types for ecs-rollout.
// ABOUTME: Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

use crate::rollout::RolloutError;
use crate::types::{ParseImageRefError, ResourceNameError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("unknown destination: {0}")]
    UnknownDestination(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid {field} name: {source}")]
    InvalidName {
        field: &'static str,
        source: ResourceNameError,
    },

    #[error("invalid image: {0}")]
    InvalidImage(#[from] ParseImageRefError),

    #[error(transparent)]
    Rollout(#[from] RolloutError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Short machine-readable category for structured output.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Rollout(e) => e.kind().as_str(),
            Error::ConfigNotFound(_)
            | Error::UnknownDestination(_)
            | Error::InvalidConfig(_)
            | Error::Yaml(_) => "config",
            Error::Io(_) => "io",
            Error::InvalidName { .. } | Error::InvalidImage(_) => "usage",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
