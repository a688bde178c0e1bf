//! Response bodies of the management API endpoints used by the collector.
//!
//! Only the fields the collector reads are modelled. Sections that the API omits for stopped
//! or network-less containers are `Option`s so that their absence is an explicit case rather
//! than a decoding failure.

use std::collections::HashMap;

use serde::Deserialize;

/// Body of `GET /1.0/containers`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ContainerList {
    /// Resource references such as `/1.0/containers/web01`.
    #[serde(default)]
    pub metadata: Vec<String>,
}

/// Body of `GET /1.0/containers/<name>/state`.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ContainerStateResponse {
    pub metadata: Option<ContainerState>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ContainerState {
    /// Raw network interfaces by name. `None` when the container is stopped.
    ///
    /// Interfaces are decoded one by one through [`ContainerState::interfaces`], so a single
    /// malformed entry does not invalidate the others.
    pub network: Option<HashMap<String, serde_json::Value>>,
}

impl ContainerState {
    /// Decodes every network interface. Returns `None` if there is no network section.
    pub fn interfaces(
        &self,
    ) -> Option<impl Iterator<Item = (&str, Result<NetworkInterface, serde_json::Error>)>> {
        let network = self.network.as_ref()?;
        Some(
            network
                .iter()
                .map(|(name, raw)| (name.as_str(), NetworkInterface::deserialize(raw))),
        )
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct NetworkInterface {
    /// Name of the host side of the interface (e.g. the veth peer). Empty or `null` for
    /// interfaces without a host side, such as `lo`.
    #[serde(default)]
    pub host_name: Option<String>,
    pub counters: Option<NetworkCounters>,
}

impl NetworkInterface {
    pub fn host_name(&self) -> Option<&str> {
        self.host_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Cumulative counters as seen from the host side of an interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
pub struct NetworkCounters {
    #[serde(default, deserialize_with = "counter")]
    pub bytes_received: u64,
    #[serde(default, deserialize_with = "counter")]
    pub bytes_sent: u64,
}

/// Accepts integral and non-negative floating point JSON numbers. Fractions are truncated.
fn counter<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v as u64)
        })
        .ok_or_else(|| serde::de::Error::custom(format!("invalid counter value `{number}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_container_list() {
        let body = r#"{
            "type": "sync",
            "status": "Success",
            "status_code": 200,
            "metadata": ["/1.0/containers/web01", "/1.0/containers/db"]
        }"#;
        let list: ContainerList = serde_json::from_str(body).unwrap();
        assert_eq!(list.metadata, ["/1.0/containers/web01", "/1.0/containers/db"]);
    }

    #[test]
    fn test_decode_running_state() {
        let body = r#"{
            "metadata": {
                "status": "Running",
                "network": {
                    "eth0": {
                        "host_name": "veth4ZB1KL",
                        "counters": {"bytes_received": 1024, "bytes_sent": 2048, "packets_received": 3}
                    },
                    "lo": {
                        "host_name": "",
                        "counters": {"bytes_received": 7, "bytes_sent": 7}
                    }
                }
            }
        }"#;
        let response: ContainerStateResponse = serde_json::from_str(body).unwrap();
        let state = response.metadata.unwrap();
        let network: HashMap<&str, NetworkInterface> = state
            .interfaces()
            .unwrap()
            .map(|(name, iface)| (name, iface.unwrap()))
            .collect();
        assert_eq!(network.len(), 2);
        assert_eq!(network["eth0"].host_name(), Some("veth4ZB1KL"));
        assert_eq!(
            network["eth0"].counters,
            Some(NetworkCounters {
                bytes_received: 1024,
                bytes_sent: 2048
            })
        );
        assert_eq!(network["lo"].host_name(), None);
    }

    #[test]
    fn test_decode_stopped_state() {
        let body = r#"{"metadata": {"status": "Stopped", "network": null}}"#;
        let response: ContainerStateResponse = serde_json::from_str(body).unwrap();
        assert!(response.metadata.unwrap().interfaces().is_none());

        let response: ContainerStateResponse = serde_json::from_str(r#"{"metadata": null}"#).unwrap();
        assert!(response.metadata.is_none());
    }

    #[test]
    fn test_decode_interfaces_individually() {
        let body = r#"{"network": {
            "lo": {"host_name": null, "counters": {"bytes_received": 1, "bytes_sent": 1}},
            "eth0": {"host_name": "vethA", "counters": {"bytes_received": 1.5e3, "bytes_sent": 20}},
            "eth1": {"host_name": "vethB", "counters": {"bytes_received": "many", "bytes_sent": 1}},
            "eth2": null
        }}"#;
        let state: ContainerState = serde_json::from_str(body).unwrap();
        let network: HashMap<&str, Result<NetworkInterface, serde_json::Error>> =
            state.interfaces().unwrap().collect();

        let lo = network["lo"].as_ref().unwrap();
        assert_eq!(lo.host_name(), None);
        let eth0 = network["eth0"].as_ref().unwrap();
        assert_eq!(
            eth0.counters,
            Some(NetworkCounters {
                bytes_received: 1500,
                bytes_sent: 20
            })
        );
        assert!(network["eth1"].is_err());
        assert!(network["eth2"].is_err());
    }

    #[test]
    fn test_negative_counter_is_rejected() {
        let counters = serde_json::from_str::<NetworkCounters>(r#"{"bytes_received": -1.0}"#);
        assert!(counters.is_err());
    }
}
