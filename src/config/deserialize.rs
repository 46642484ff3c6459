// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Validates cluster names and listing page sizes while parsing.

use serde::Deserialize;

use crate::orchestrator::MAX_PAGE_SIZE;
use crate::types::ResourceName;

pub fn deserialize_resource_name_option<'de, D>(
    deserializer: D,
) -> Result<Option<ResourceName>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| {
        ResourceName::new(&s)
            .map_err(|e| serde::de::Error::custom(format!("invalid cluster name '{s}': {e}")))
    })
    .transpose()
}

pub fn deserialize_page_size_option<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<i32> = Option::deserialize(deserializer)?;
    match opt {
        Some(n) if !(1..=MAX_PAGE_SIZE).contains(&n) => Err(serde::de::Error::custom(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}, got {n}"
        ))),
        other => Ok(other),
    }
}
