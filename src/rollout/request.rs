// ABOUTME: Inputs to a rollout: names, target image and lookup options.
// ABOUTME: Built by the CLI from arguments and config, consumed by the pipeline.

use crate::orchestrator::{MAX_PAGE_SIZE, PageRequest};
use crate::types::{ImageRef, ResourceName};

use super::container::ContainerSelector;

/// How name resolution walks the orchestrator's listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingOptions {
    /// Identifiers requested per listing call (1-100).
    pub page_size: i32,
    /// Follow continuation tokens past the first page.
    ///
    /// Off by default: a resource beyond the first page is then reported
    /// as not found.
    pub all_pages: bool,
}

impl ListingOptions {
    pub(crate) fn first_page(&self) -> PageRequest {
        PageRequest::first(self.page_size)
    }
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            all_pages: false,
        }
    }
}

/// A request to move one service onto one image.
#[derive(Debug, Clone)]
pub struct RolloutRequest {
    pub cluster: ResourceName,
    pub service: ResourceName,
    pub image: ImageRef,
    pub container: ContainerSelector,
    pub listing: ListingOptions,
}

impl RolloutRequest {
    pub fn new(cluster: ResourceName, service: ResourceName, image: ImageRef) -> Self {
        Self {
            cluster,
            service,
            image,
            container: ContainerSelector::default(),
            listing: ListingOptions::default(),
        }
    }

    pub fn container(mut self, container: ContainerSelector) -> Self {
        self.container = container;
        self
    }

    pub fn listing(mut self, listing: ListingOptions) -> Self {
        self.listing = listing;
        self
    }
}
