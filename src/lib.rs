// ABOUTME: Library root for ecs-rollout - exposes the rollout pipeline for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod orchestrator;
pub mod output;
pub mod rollout;
pub mod types;
