use std::fmt;
use std::path::{Path, PathBuf};

use crate::container::ContainerID;

/// The accounting files collected for every container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricFile {
    /// `blkio.throttle.io_serviced`: I/O operations per device and type.
    BlkioServiced,
    /// `blkio.throttle.io_service_bytes`: I/O bytes per device and type.
    BlkioServiceBytes,
    /// `memory.usage_in_bytes`
    MemoryUsage,
    /// `memory.limit_in_bytes`
    MemoryLimit,
    /// `memory.memsw.usage_in_bytes`
    MemswUsage,
    /// `memory.memsw.limit_in_bytes`
    MemswLimit,
    /// `cpuacct.usage`: consumed CPU time in nanoseconds.
    CpuAcctUsage,
    /// `cpuset.cpus`: the CPUs the container may run on.
    CpuSetCpus,
}

impl MetricFile {
    pub const ALL: [MetricFile; 8] = [
        MetricFile::BlkioServiced,
        MetricFile::BlkioServiceBytes,
        MetricFile::MemoryUsage,
        MetricFile::MemoryLimit,
        MetricFile::MemswUsage,
        MetricFile::MemswLimit,
        MetricFile::CpuAcctUsage,
        MetricFile::CpuSetCpus,
    ];

    /// Returns the controller directory the file lives in.
    pub fn controller(self) -> &'static str {
        match self {
            MetricFile::BlkioServiced | MetricFile::BlkioServiceBytes => "blkio",
            MetricFile::MemoryUsage
            | MetricFile::MemoryLimit
            | MetricFile::MemswUsage
            | MetricFile::MemswLimit => "memory",
            MetricFile::CpuAcctUsage => "cpu,cpuacct",
            MetricFile::CpuSetCpus => "cpuset",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            MetricFile::BlkioServiced => "blkio.throttle.io_serviced",
            MetricFile::BlkioServiceBytes => "blkio.throttle.io_service_bytes",
            MetricFile::MemoryUsage => "memory.usage_in_bytes",
            MetricFile::MemoryLimit => "memory.limit_in_bytes",
            MetricFile::MemswUsage => "memory.memsw.usage_in_bytes",
            MetricFile::MemswLimit => "memory.memsw.limit_in_bytes",
            MetricFile::CpuAcctUsage => "cpuacct.usage",
            MetricFile::CpuSetCpus => "cpuset.cpus",
        }
    }

    /// Builds the path of this file for the given container.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::path::Path;
    /// # use lxd_stats::cgroup::MetricFile;
    /// # use lxd_stats::container::ContainerID;
    /// let id = ContainerID::new("web01").unwrap();
    /// let path = MetricFile::CpuAcctUsage.path(Path::new("/sys/fs/cgroup"), &id);
    /// assert_eq!(path, Path::new("/sys/fs/cgroup/cpu,cpuacct/lxc/web01/cpuacct.usage"));
    /// ```
    pub fn path(self, cgroup_root: &Path, container_id: &ContainerID) -> PathBuf {
        cgroup_root
            .join(self.controller())
            .join("lxc")
            .join(container_id.as_str())
            .join(self.file_name())
    }
}

impl fmt::Display for MetricFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
