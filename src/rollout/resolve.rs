// ABOUTME: Name-to-ARN resolution for clusters and services.
// ABOUTME: Matches the trailing ARN path segment literally, first match in listing order.

use std::future::Future;

use snafu::OptionExt;

use crate::diagnostics::{Diagnostics, Warning};
use crate::orchestrator::{ClusterOps, ListPage, OrchestratorError, PageRequest, ServiceOps};
use crate::types::{ClusterArn, Id, ResourceName, ServiceArn};

use super::error::{ClusterNotFoundSnafu, RolloutError, ServiceNotFoundSnafu};
use super::request::ListingOptions;

/// First identifier in `ids` whose trailing path segment is `name`, and how
/// many identifiers in `ids` match in total.
pub fn first_named<'a, T>(ids: &'a [Id<T>], name: &ResourceName) -> Option<(&'a Id<T>, usize)> {
    let mut matches = ids
        .iter()
        .filter(|id| id.has_trailing_segment(name.as_str()));
    let first = matches.next()?;
    Some((first, 1 + matches.count()))
}

/// Walk listing pages until one contains an identifier named `name`.
///
/// Stops after the first page unless `listing.all_pages` is set.
async fn scan<T, F, Fut>(
    name: &ResourceName,
    listing: &ListingOptions,
    diag: &mut Diagnostics,
    mut fetch: F,
) -> Result<Option<Id<T>>, OrchestratorError>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<ListPage<Id<T>>, OrchestratorError>>,
{
    let mut request = listing.first_page();
    loop {
        let page = fetch(request).await?;

        if let Some((first, count)) = first_named(&page.items, name) {
            if count > 1 {
                diag.warn(Warning::ambiguous_name(format!(
                    "{count} identifiers end with '/{name}'; using the first listed: {first}"
                )));
            }
            return Ok(Some(first.clone()));
        }

        match page.next_token {
            Some(token) if listing.all_pages => {
                request = PageRequest::after(listing.page_size, token);
            }
            Some(_) => {
                tracing::debug!(%name, "no match on first page; not following pagination");
                return Ok(None);
            }
            None => return Ok(None),
        }
    }
}

/// Resolve a cluster name to its ARN.
pub async fn find_cluster_arn<O: ClusterOps>(
    orchestrator: &O,
    name: &ResourceName,
    listing: &ListingOptions,
    diag: &mut Diagnostics,
) -> Result<ClusterArn, RolloutError> {
    let found = scan(name, listing, diag, move |page| async move {
        orchestrator.list_clusters(&page).await
    })
    .await?;

    found.context(ClusterNotFoundSnafu { name: name.clone() })
}

/// Resolve a service name to its ARN within a cluster.
pub async fn find_service_arn<O: ServiceOps>(
    orchestrator: &O,
    cluster: &ClusterArn,
    name: &ResourceName,
    listing: &ListingOptions,
    diag: &mut Diagnostics,
) -> Result<ServiceArn, RolloutError> {
    let found = scan(name, listing, diag, move |page| async move {
        orchestrator.list_services(cluster, &page).await
    })
    .await?;

    found.context(ServiceNotFoundSnafu {
        name: name.clone(),
        cluster: cluster.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ResourceName {
        ResourceName::new(s).unwrap()
    }

    #[test]
    fn first_named_counts_all_matches() {
        let ids = vec![
            ClusterArn::new("arn:aws:ecs:us-east-1:1:cluster/web"),
            ClusterArn::new("arn:aws:ecs:eu-west-1:1:cluster/web"),
            ClusterArn::new("arn:aws:ecs:eu-west-1:1:cluster/api"),
        ];
        let (first, count) = first_named(&ids, &name("web")).unwrap();
        assert_eq!(first.as_str(), "arn:aws:ecs:us-east-1:1:cluster/web");
        assert_eq!(count, 2);
    }

    #[test]
    fn first_named_rejects_partial_segment() {
        let ids = vec![ClusterArn::new("arn:aws:ecs:us-east-1:1:cluster/staging-web")];
        assert!(first_named(&ids, &name("web")).is_none());
    }
}
