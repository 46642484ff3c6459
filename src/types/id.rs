// ABOUTME: Phantom-typed resource identifiers for compile-time type safety.
// ABOUTME: Prevents accidental swapping of cluster, service, and task definition ARNs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker types for phantom type parameters.
/// Using empty enums prevents instantiation and requires no trait bounds.
pub enum ClusterMarker {}
pub enum ServiceMarker {}
pub enum TaskDefinitionMarker {}

/// An orchestrator resource identifier (ARN) tagged with the kind of resource it names.
///
/// A `ServiceArn` can't be passed where a `ClusterArn` is expected, which
/// matters for calls like `update_service(cluster, service, ..)` that take
/// several identifiers of the same underlying shape.
#[must_use = "identifiers reference resources and should not be ignored"]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Whether the last path segment of this identifier is exactly `name`.
    ///
    /// `arn:aws:ecs:us-east-1:123:cluster/web` ends with the segment `web`;
    /// `arn:aws:ecs:us-east-1:123:cluster/my-web` does not. The name is
    /// compared literally.
    pub fn has_trailing_segment(&self, name: &str) -> bool {
        self.value
            .strip_suffix(name)
            .is_some_and(|rest| rest.ends_with('/'))
    }
}

// Manual trait implementations that don't require T to implement the trait.
// This is necessary because T is only used as a phantom type marker.

impl<T> std::fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> std::fmt::Display for Id<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

pub type ClusterArn = Id<ClusterMarker>;
pub type ServiceArn = Id<ServiceMarker>;
pub type TaskDefinitionArn = Id<TaskDefinitionMarker>;
