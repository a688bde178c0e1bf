//! Client side of the LXD management API.
//!
//! The API is plain HTTP/1.1 spoken over a local Unix socket. Two endpoints are used:
//!
//! - `GET /1.0/containers` lists the containers (see [`list_containers`]).
//! - `GET /1.0/containers/<name>/state` returns the live state of one container, including
//!   the per-interface network counters (see [`fetch_network_totals`]).
//!
//! Everything that talks to the API goes through the [`ManagementApi`] trait, implemented by
//! [`UnixSocketClient`] for the real socket.
mod client;
mod discovery;
mod error;
#[cfg(test)]
pub(crate) mod fake;
pub mod models;
mod state;

pub use client::UnixSocketClient;
pub use discovery::{CONTAINERS_PATH, list_containers};
pub use error::{Error, Result};
pub use state::{NetworkTotals, StateError, StateTaskResult, fetch_network_totals, state_task};

use hyper::body::Bytes;

/// Read access to the management API.
pub trait ManagementApi: Send + Sync + 'static {
    /// Performs a `GET` request for the given absolute path and returns the body of a
    /// `200 OK` response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Status`] for any other status code, and one of the transport variants
    /// (see [`Error::is_transport`]) if the socket can't be reached.
    fn get(&self, path: &str) -> impl Future<Output = Result<Bytes>> + Send;
}
