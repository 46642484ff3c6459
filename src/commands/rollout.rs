// ABOUTME: Rollout command implementation.
// ABOUTME: Validates input, merges config, connects to ECS and drives the pipeline.

use crate::cli::Cli;
use ecs_rollout::config::{Config, Overrides, Settings};
use ecs_rollout::diagnostics::Diagnostics;
use ecs_rollout::error::{Error, Result};
use ecs_rollout::orchestrator::EcsOrchestrator;
use ecs_rollout::output::Output;
use ecs_rollout::rollout::{self, RolloutRequest};
use ecs_rollout::types::{ImageRef, ResourceName};
use std::env;

/// Roll the requested service onto the requested image.
pub async fn rollout(cli: Cli, output: &mut Output) -> Result<()> {
    let (request, settings) = prepare(cli)?;

    output.start_timer();
    output.start(&request);

    let orchestrator = EcsOrchestrator::connect(&settings.orchestrator).await;
    let mut diag = Diagnostics::default();

    let result = rollout::run(&orchestrator, request, &mut diag).await;

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.message);
    }

    output.deployed(&result?);
    Ok(())
}

/// Turn arguments and config into a validated request, before any API call.
fn prepare(cli: Cli) -> Result<(RolloutRequest, Settings)> {
    let service = ResourceName::new(&cli.service).map_err(|source| Error::InvalidName {
        field: "service",
        source,
    })?;
    let image = ImageRef::parse(&cli.image)?;
    let cluster = cli
        .cluster
        .as_deref()
        .map(ResourceName::new)
        .transpose()
        .map_err(|source| Error::InvalidName {
            field: "cluster",
            source,
        })?;

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover(&env::current_dir()?)?,
    };
    let config = match &cli.destination {
        Some(dest) => config.for_destination(dest)?,
        None => config,
    };

    let settings = config.resolve(Overrides {
        cluster,
        container: cli.container,
        region: cli.region,
        profile: cli.profile,
        endpoint_url: cli.endpoint_url,
        timeout: cli.timeout,
        page_size: cli.page_size,
        all_pages: cli.all_pages,
    })?;

    let request = RolloutRequest::new(settings.cluster.clone(), service, image)
        .container(settings.container.clone())
        .listing(settings.listing);

    Ok((request, settings))
}
