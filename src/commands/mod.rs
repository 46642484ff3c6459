// ABOUTME: Command handlers for the ecs-rollout CLI.
// ABOUTME: Re-exports the rollout command.

mod rollout;

pub use rollout::rollout;
