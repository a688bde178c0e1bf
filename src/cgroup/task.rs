use std::path::{Path, PathBuf};

use crate::container::ContainerID;
use crate::fsutil::{self, FileReadError};

use super::MetricFile;

/// One accounting file of one container to read.
#[derive(Debug, Clone)]
pub struct CgroupTask {
    container_id: ContainerID,
    metric_file: MetricFile,
    path: PathBuf,
}

impl CgroupTask {
    pub fn new(cgroup_root: &Path, container_id: ContainerID, metric_file: MetricFile) -> Self {
        let path = metric_file.path(cgroup_root, &container_id);
        Self {
            container_id,
            metric_file,
            path,
        }
    }

    pub fn container_id(&self) -> &ContainerID {
        &self.container_id
    }

    pub fn metric_file(&self) -> MetricFile {
        self.metric_file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The outcome of one [`CgroupTask`].
///
/// A failed read keeps its error so the aggregator can skip it; it is never turned into an
/// empty or zero value.
#[derive(Debug)]
pub struct CgroupTaskResult {
    pub container_id: ContainerID,
    pub metric_file: MetricFile,
    /// Trimmed file content, or the reason it could not be read.
    pub content: Result<String, FileReadError>,
}

/// Builds one task per container and metric file.
///
/// Tasks are grouped by metric file, so the result has exactly
/// `containers.len() * MetricFile::ALL.len()` entries.
pub fn build_tasks(cgroup_root: &Path, containers: &[ContainerID]) -> Vec<CgroupTask> {
    MetricFile::ALL
        .iter()
        .flat_map(|&metric_file| {
            containers
                .iter()
                .map(move |id| CgroupTask::new(cgroup_root, id.clone(), metric_file))
        })
        .collect()
}

/// Reads the file of a task. Read failures are captured in the result rather than returned.
pub async fn read_task(task: CgroupTask) -> CgroupTaskResult {
    log::trace!("reading `{}`", task.path.display());
    let content = fsutil::read_trimmed(&task.path).await;
    if let Err(ref err) = content {
        if err.is_not_found() {
            log::debug!("{err}");
        } else {
            log::warn!("container `{}`: {err}", task.container_id);
        }
    }

    CgroupTaskResult {
        container_id: task.container_id,
        metric_file: task.metric_file,
        content,
    }
}
