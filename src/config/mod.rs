// ABOUTME: Configuration types and parsing for ecs-rollout.yml.
// ABOUTME: Handles YAML parsing, destination merging and precedence against CLI flags.

mod deserialize;
mod orchestrator;

pub use orchestrator::OrchestratorConfig;

use crate::error::{Error, Result};
use crate::orchestrator::MAX_PAGE_SIZE;
use crate::rollout::{ContainerSelector, ListingOptions};
use crate::types::ResourceName;
use deserialize::{deserialize_page_size_option, deserialize_resource_name_option};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "ecs-rollout.yml";
pub const CONFIG_FILENAME_ALT: &str = "ecs-rollout.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".ecs-rollout/config.yml";

/// Cluster used when neither the CLI nor the config names one.
pub const DEFAULT_CLUSTER: &str = "default";

/// Contents of an optional `ecs-rollout.yml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default, deserialize_with = "deserialize_resource_name_option")]
    pub cluster: Option<ResourceName>,

    #[serde(default)]
    pub container: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub profile: Option<String>,

    #[serde(default)]
    pub endpoint_url: Option<String>,

    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub destinations: HashMap<String, Destination>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    #[serde(default, deserialize_with = "deserialize_page_size_option")]
    pub page_size: Option<i32>,

    #[serde(default)]
    pub all_pages: bool,
}

/// Per-environment overrides, selected with `--destination`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Destination {
    #[serde(default, deserialize_with = "deserialize_resource_name_option")]
    pub cluster: Option<ResourceName>,

    #[serde(default)]
    pub container: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub profile: Option<String>,

    #[serde(default)]
    pub endpoint_url: Option<String>,
}

/// Values given on the command line. `None` defers to the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub cluster: Option<ResourceName>,
    pub container: Option<String>,
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
    pub timeout: Option<Duration>,
    pub page_size: Option<i32>,
    pub all_pages: bool,
}

/// Everything a run needs besides the service name and image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub cluster: ResourceName,
    pub container: ContainerSelector,
    pub listing: ListingOptions,
    pub orchestrator: OrchestratorConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Path of the first config file present in `dir`, if any.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        [CONFIG_FILENAME, CONFIG_FILENAME_ALT, CONFIG_FILENAME_DIR]
            .into_iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Load the config file in `dir`, or an empty config when there is none.
    pub fn discover(dir: &Path) -> Result<Self> {
        match Self::find(dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply a named destination's overrides on top of the base config.
    pub fn for_destination(&self, name: &str) -> Result<Config> {
        let dest = self
            .destinations
            .get(name)
            .ok_or_else(|| Error::UnknownDestination(name.to_string()))?;

        let mut merged = self.clone();
        if dest.cluster.is_some() {
            merged.cluster = dest.cluster.clone();
        }
        if dest.container.is_some() {
            merged.container = dest.container.clone();
        }
        if dest.region.is_some() {
            merged.region = dest.region.clone();
        }
        if dest.profile.is_some() {
            merged.profile = dest.profile.clone();
        }
        if dest.endpoint_url.is_some() {
            merged.endpoint_url = dest.endpoint_url.clone();
        }

        Ok(merged)
    }

    /// Combine this config with command-line values; the command line wins.
    pub fn resolve(self, overrides: Overrides) -> Result<Settings> {
        let cluster = match overrides.cluster.or(self.cluster) {
            Some(cluster) => cluster,
            None => ResourceName::new(DEFAULT_CLUSTER).map_err(|source| Error::InvalidName {
                field: "cluster",
                source,
            })?,
        };

        let page_size = overrides
            .page_size
            .or(self.listing.page_size)
            .unwrap_or(MAX_PAGE_SIZE);
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(Error::InvalidConfig(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }

        Ok(Settings {
            cluster,
            container: ContainerSelector::from(overrides.container.or(self.container)),
            listing: ListingOptions {
                page_size,
                all_pages: overrides.all_pages || self.listing.all_pages,
            },
            orchestrator: OrchestratorConfig {
                region: overrides.region.or(self.region),
                profile: overrides.profile.or(self.profile),
                endpoint_url: overrides.endpoint_url.or(self.endpoint_url),
                timeout: overrides.timeout.or(self.timeout),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let settings = Config::default().resolve(Overrides::default()).unwrap();
        assert_eq!(settings.cluster.as_str(), DEFAULT_CLUSTER);
        assert_eq!(settings.container, ContainerSelector::Sole);
        assert_eq!(settings.listing, ListingOptions::default());
        assert_eq!(settings.orchestrator, OrchestratorConfig::default());
    }

    #[test]
    fn out_of_range_page_size_override_is_rejected() {
        let overrides = Overrides {
            page_size: Some(0),
            ..Default::default()
        };
        let err = Config::default().resolve(overrides).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
