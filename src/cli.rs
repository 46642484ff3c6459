// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: One invocation rolls one service onto one image.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "ecs-rollout")]
#[command(about = "Roll an ECS service onto a new container image")]
#[command(version)]
pub struct Cli {
    /// Name of the service to update
    pub service: String,

    /// Container image to deploy, e.g. registry/app:2.0
    pub image: String,

    /// Name of cluster [default: default]
    #[arg(long)]
    pub cluster: Option<String>,

    /// Container to update when the task definition has several
    #[arg(long)]
    pub container: Option<String>,

    /// AWS region
    #[arg(long)]
    pub region: Option<String>,

    /// AWS shared config profile
    #[arg(long)]
    pub profile: Option<String>,

    /// Alternate ECS API endpoint
    #[arg(long)]
    pub endpoint_url: Option<String>,

    /// Timeout for each API operation (e.g. 30s, 2m)
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Identifiers to request per listing call (1-100)
    #[arg(long)]
    pub page_size: Option<i32>,

    /// Follow pagination when looking up the cluster and service
    #[arg(long)]
    pub all_pages: bool,

    /// Config file (defaults to ecs-rollout.yml in the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target destination (defined in config)
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the deployed task definition
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON lines
    #[arg(long)]
    pub json: bool,
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime_serde::re::humantime::parse_duration(s).map_err(|e| e.to_string())
}
