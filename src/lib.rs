//! LXD Stats: a one-shot collector of per-container resource metrics on an LXD host.
//!
//! A run discovers the containers through the LXD management API, then reads the cgroup v1
//! accounting files of every container and queries the network counters of every container
//! concurrently. The results are merged into one record per container, derived metrics are
//! added, and everything is encoded in the line protocol:
//!
//! ```text
//! lxcstats,lxc_host=web01 blkio_reads=10,blkio_writes=4,...,bytes_sent=1200,bytes_recv=800
//! ```
//!
//! Containers that are not running have no cgroup files and no network counters, so they
//! produce no line.
use std::path::Path;
use std::sync::Arc;

pub mod aggregate;
pub mod cgroup;
pub mod config;
pub mod container;
pub mod error;
pub mod fsutil;
pub mod line_protocol;
pub mod lxd;
pub mod meminfo;
pub mod numeric;
pub mod scheduler;

use aggregate::{Aggregator, Records};
use config::Config;
use error::{Error, ResultOkLogExt};
use lxd::{ManagementApi, StateTaskResult, UnixSocketClient};

/// Runs one collection against the local host and returns the encoded lines.
///
/// The output is empty if no container produced any metric.
///
/// # Errors
///
/// Returns an [`Error`] if the containers can't be listed, the management API becomes
/// unreachable while querying container state, or a collection task is lost. No partial
/// output is produced in that case.
pub async fn run(config: &Config) -> Result<String, Error> {
    let api = Arc::new(UnixSocketClient::new(&config.socket_path));
    log::debug!("Using management API at {}", api.socket_path().display());

    let total_memory = meminfo::total_memory(&config.meminfo_path).await.ok_log();
    if total_memory.is_none() {
        log::warn!("host memory unknown, memory limits will be omitted");
    }

    let records = collect(api, &config.cgroup_root, total_memory).await?;
    Ok(line_protocol::encode(&config.measurement, &records))
}

/// Discovers the containers and collects the records of all of them.
///
/// The cgroup round and the state round run concurrently. Both are joined before anything is
/// aggregated.
///
/// # Errors
///
/// See [`run`].
pub async fn collect<A>(
    api: Arc<A>,
    cgroup_root: &Path,
    total_memory: Option<u64>,
) -> Result<Records, Error>
where
    A: ManagementApi,
{
    let containers = lxd::list_containers(&*api)
        .await
        .map_err(Error::Discovery)?;
    log::debug!("Discovered {} containers", containers.len());

    let tasks = cgroup::build_tasks(cgroup_root, &containers);
    let before = std::time::Instant::now();
    let (cgroup_results, state_results) = tokio::join!(
        scheduler::fan_out(tasks, cgroup::read_task),
        scheduler::fan_out(containers.clone(), |id| lxd::state_task(Arc::clone(&api), id)),
    );
    let cgroup_results = cgroup_results.map_err(|source| Error::Join {
        round: "cgroup",
        source,
    })?;
    let state_results = state_results.map_err(|source| Error::Join {
        round: "state",
        source,
    })?;
    let state_results = reject_transport_failure(state_results)?;
    log::trace!(
        "collection rounds took {} microseconds",
        before.elapsed().as_micros()
    );

    let mut aggregator = Aggregator::new(&containers, total_memory);
    aggregator.merge_cgroup_results(cgroup_results);
    aggregator.merge_state_results(state_results);
    aggregator.derive();
    Ok(aggregator.into_records())
}

fn reject_transport_failure(
    mut results: Vec<StateTaskResult>,
) -> Result<Vec<StateTaskResult>, Error> {
    let fatal = results
        .iter()
        .position(|result| matches!(&result.totals, Err(err) if err.is_fatal()));
    if let Some(idx) = fatal {
        let result = results.swap_remove(idx);
        if let Err(source) = result.totals {
            return Err(Error::Transport {
                container_id: result.container_id,
                source,
            });
        }
    }
    Ok(results)
}
