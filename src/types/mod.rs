// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Uses phantom types to prevent ARN confusion at compile time.

mod id;
mod image_ref;
mod resource_name;

pub use id::{ClusterArn, Id, ServiceArn, TaskDefinitionArn};
pub use image_ref::{ImageRef, ParseImageRefError};
pub use resource_name::{ResourceName, ResourceNameError};
