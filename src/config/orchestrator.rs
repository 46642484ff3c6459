// ABOUTME: Explicit connection settings for the orchestrator client.
// ABOUTME: Replaces implicit process-wide session discovery with a value passed in.

use std::time::Duration;

/// How to reach the orchestrator API.
///
/// Unset fields defer to the AWS SDK defaults (`AWS_REGION`, `AWS_PROFILE`,
/// shared config files).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    /// Alternate API endpoint, e.g. a local ECS emulator.
    pub endpoint_url: Option<String>,
    /// Per-operation timeout, including retries.
    pub timeout: Option<Duration>,
}
