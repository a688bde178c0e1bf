use std::sync::Arc;

use crate::container::ContainerID;

use super::models::{ContainerState, ContainerStateResponse};
use super::{Error, ManagementApi};

/// Network byte counters of one container, summed over all interfaces with a host side.
///
/// The counters are taken from the host side of each interface, so `rx_bytes` is what the
/// container sent and `tx_bytes` is what it received.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkTotals {
    /// Bytes received by the host side.
    pub rx_bytes: u64,
    /// Bytes sent by the host side.
    pub tx_bytes: u64,
}

impl NetworkTotals {
    /// Sums the counters of every interface with a non-empty host name.
    ///
    /// Returns `None` if the state has no network section.
    pub fn from_state(container_id: &ContainerID, state: &ContainerState) -> Option<Self> {
        let mut totals = NetworkTotals::default();
        for (name, iface) in state.interfaces()? {
            let iface = match iface {
                Ok(iface) => iface,
                Err(err) => {
                    log::warn!("container `{container_id}`: skipping interface `{name}`: {err}");
                    continue;
                }
            };
            if iface.host_name().is_none() {
                continue;
            }
            let Some(counters) = iface.counters else {
                log::debug!("container `{container_id}`: interface `{name}` has no counters");
                continue;
            };
            totals.rx_bytes = totals.rx_bytes.saturating_add(counters.bytes_received);
            totals.tx_bytes = totals.tx_bytes.saturating_add(counters.bytes_sent);
        }

        Some(totals)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Api(#[from] Error),
    #[error("no metadata in state of container `{0}`")]
    MissingMetadata(ContainerID),
    #[error("no network data in state of container `{0}`")]
    MissingNetwork(ContainerID),
}

impl StateError {
    /// Returns `true` if the error means the management API is unusable for the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StateError::Api(err) if err.is_transport())
    }
}

/// The outcome of querying the state of one container.
#[derive(Debug)]
pub struct StateTaskResult {
    pub container_id: ContainerID,
    pub totals: Result<NetworkTotals, StateError>,
}

/// Queries the live state of a container and sums its network counters.
///
/// # Errors
///
/// - [`StateError::MissingMetadata`] if the response has no metadata.
/// - [`StateError::MissingNetwork`] if the container has no network section, e.g. because it
///   is stopped.
/// - [`StateError::Api`] if the request fails or the body does not decode.
pub async fn fetch_network_totals<A>(
    api: &A,
    container_id: &ContainerID,
) -> Result<NetworkTotals, StateError>
where
    A: ManagementApi + ?Sized,
{
    let path = format!("/1.0/containers/{container_id}/state");
    let body = api.get(&path).await?;
    let response: ContainerStateResponse =
        serde_json::from_slice(&body).map_err(|source| Error::Decode { path, source })?;

    let state = response
        .metadata
        .ok_or_else(|| StateError::MissingMetadata(container_id.clone()))?;
    NetworkTotals::from_state(container_id, &state)
        .ok_or_else(|| StateError::MissingNetwork(container_id.clone()))
}

/// Runs [`fetch_network_totals`] as a collection task. Failures are captured in the result.
pub async fn state_task<A>(api: Arc<A>, container_id: ContainerID) -> StateTaskResult
where
    A: ManagementApi,
{
    let totals = fetch_network_totals(api.as_ref(), &container_id).await;
    match totals {
        Err(ref err @ StateError::MissingNetwork(_)) => log::debug!("{err}"),
        Err(ref err) if !err.is_fatal() => log::warn!("{err}"),
        _ => {}
    }

    StateTaskResult {
        container_id,
        totals,
    }
}
