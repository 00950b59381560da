// One snapshot run: discover targets, then fetch and merge every expression in plan order.
// Fetches are strictly sequential; a failed fetch counts as zero rows.

use crate::models::{HostMap, MetricQuery};
use crate::prom_repo::SeriesSource;
use crate::reconciler::{QUERY_PLAN, merge_series};
use crate::target_directory::{TargetDirectory, build_target_directory};
use tracing::{debug, info, instrument, warn};

/// Target directory from discovery; empty when discovery fails.
pub async fn discover_directory<S: SeriesSource>(source: &S) -> TargetDirectory {
    match source.targets().await {
        Ok(targets) => {
            let directory = build_target_directory(&targets);
            debug!(targets = targets.len(), hosts = directory.len(), "target directory built");
            directory
        }
        Err(e) => {
            warn!(error = %e, "could not retrieve target map, job attribution limited to labels");
            TargetDirectory::default()
        }
    }
}

/// Runs the fixed query plan against `source`.
pub async fn collect<S: SeriesSource>(source: &S) -> HostMap {
    collect_with_plan(source, &QUERY_PLAN).await
}

#[instrument(skip_all, fields(expressions = plan.len()))]
pub async fn collect_with_plan<S: SeriesSource>(source: &S, plan: &[MetricQuery]) -> HostMap {
    let directory = discover_directory(source).await;
    let mut hosts = HostMap::new();
    for query in plan {
        let rows = match source.query(query.expr).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, expression = query.expr, "query failed, treating as no rows");
                continue;
            }
        };
        let merged = merge_series(&mut hosts, query, &rows, &directory);
        debug!(
            os_family = %query.os_family,
            kind = %query.kind,
            rows = rows.len(),
            merged,
            "expression merged"
        );
    }
    info!(hosts = hosts.len(), "snapshot collected");
    hosts
}
