use crate::container::ContainerID;
use crate::{lxd, scheduler};

/// Errors that abort a run. Nothing is printed when one occurs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to discover containers: {0}")]
    Discovery(#[source] lxd::Error),
    #[error("management API became unreachable while querying container `{container_id}`: {source}")]
    Transport {
        container_id: ContainerID,
        #[source]
        source: lxd::StateError,
    },
    #[error("{round} collection round failed: {source}")]
    Join {
        round: &'static str,
        #[source]
        source: scheduler::Error,
    },
}

pub trait ResultOkLogExt<T, E> {
    /// Converts into an `Option`, logging the error as a warning.
    fn ok_log(self) -> Option<T>;
}

impl<T, E> ResultOkLogExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error,
{
    fn ok_log(self) -> Option<T> {
        match self {
            Ok(ok) => Some(ok),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        }
    }
}
