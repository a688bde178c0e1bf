use crate::container::ContainerID;

use super::models::ContainerList;
use super::{Error, ManagementApi, Result};

/// Endpoint listing all containers.
pub const CONTAINERS_PATH: &str = "/1.0/containers";

/// Lists the containers known to the management API, in the order the API returns them.
///
/// The identifier of a container is the last path segment of its resource reference,
/// e.g. `web01` for `/1.0/containers/web01`. A query string (as added for non-default
/// projects) is ignored.
///
/// # Errors
///
/// Any error is fatal for the run: the API can't be reached, answers with a non-success
/// status, returns a body that does not decode, or lists a reference without a valid
/// container name.
pub async fn list_containers<A>(api: &A) -> Result<Vec<ContainerID>>
where
    A: ManagementApi + ?Sized,
{
    let body = api.get(CONTAINERS_PATH).await?;
    let list: ContainerList = serde_json::from_slice(&body).map_err(|source| Error::Decode {
        path: CONTAINERS_PATH.to_owned(),
        source,
    })?;

    let containers = list
        .metadata
        .iter()
        .map(String::as_str)
        .map(container_id_from_reference)
        .collect::<Result<Vec<_>>>()?;
    log::debug!("Found {} containers", containers.len());

    Ok(containers)
}

fn container_id_from_reference(reference: &str) -> Result<ContainerID> {
    let path = reference
        .split_once('?')
        .map_or(reference, |(path, _query)| path);
    let name = path.rsplit('/').next().unwrap_or(path);
    ContainerID::new(name).map_err(|source| Error::InvalidContainerReference {
        reference: reference.to_owned(),
        source,
    })
}
