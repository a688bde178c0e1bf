use std::ffi::OsString;
use std::path::PathBuf;

pub const DEFAULT_SOCKET_PATH: &str = "/var/lib/lxd/unix.socket";
pub const DEFAULT_CGROUP_ROOT: &str = "/sys/fs/cgroup";
pub const DEFAULT_MEMINFO_PATH: &str = "/proc/meminfo";
pub const DEFAULT_MEASUREMENT: &str = "lxcstats";

/// Runtime settings, read from the environment.
///
/// | Variable                | Default                      |
/// |-------------------------|------------------------------|
/// | `LXD_SOCKET_PATH`       | `/var/lib/lxd/unix.socket`   |
/// | `CGROUP_ROOT`           | `/sys/fs/cgroup`             |
/// | `MEMINFO_PATH`          | `/proc/meminfo`              |
/// | `LXD_STATS_MEASUREMENT` | `lxcstats`                   |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Unix socket of the management API.
    pub socket_path: PathBuf,
    /// Root of the cgroup v1 hierarchy.
    pub cgroup_root: PathBuf,
    /// Host memory information file.
    pub meminfo_path: PathBuf,
    /// Measurement name of every emitted line.
    pub measurement: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            cgroup_root: PathBuf::from(DEFAULT_CGROUP_ROOT),
            meminfo_path: PathBuf::from(DEFAULT_MEMINFO_PATH),
            measurement: DEFAULT_MEASUREMENT.to_owned(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(std::env::var_os)
    }

    fn from_lookup(lookup: impl Fn(&'static str) -> Option<OsString>) -> Self {
        let path = |key: &'static str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(default))
        };

        let measurement = match lookup("LXD_STATS_MEASUREMENT").map(OsString::into_string) {
            None => DEFAULT_MEASUREMENT.to_owned(),
            Some(Ok(name)) if !name.trim().is_empty() => name.trim().to_owned(),
            Some(_) => {
                log::warn!(
                    "invalid `LXD_STATS_MEASUREMENT`, falling back to `{DEFAULT_MEASUREMENT}`"
                );
                DEFAULT_MEASUREMENT.to_owned()
            }
        };

        let config = Self {
            socket_path: path("LXD_SOCKET_PATH", DEFAULT_SOCKET_PATH),
            cgroup_root: path("CGROUP_ROOT", DEFAULT_CGROUP_ROOT),
            meminfo_path: path("MEMINFO_PATH", DEFAULT_MEMINFO_PATH),
            measurement,
        };
        log::debug!("{config:?}");
        config
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn from_vars(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(from_vars(&[]), Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = from_vars(&[
            ("LXD_SOCKET_PATH", "/var/snap/lxd/common/lxd/unix.socket"),
            ("CGROUP_ROOT", "/rootfs/sys/fs/cgroup"),
            ("MEMINFO_PATH", "/rootfs/proc/meminfo"),
            ("LXD_STATS_MEASUREMENT", "containers"),
        ]);
        assert_eq!(
            config.socket_path,
            PathBuf::from("/var/snap/lxd/common/lxd/unix.socket")
        );
        assert_eq!(config.cgroup_root, PathBuf::from("/rootfs/sys/fs/cgroup"));
        assert_eq!(config.meminfo_path, PathBuf::from("/rootfs/proc/meminfo"));
        assert_eq!(config.measurement, "containers");
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = from_vars(&[("CGROUP_ROOT", ""), ("LXD_STATS_MEASUREMENT", "  ")]);
        assert_eq!(config.cgroup_root, PathBuf::from(DEFAULT_CGROUP_ROOT));
        assert_eq!(config.measurement, DEFAULT_MEASUREMENT);
    }
}
