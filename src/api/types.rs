//! API response types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response wrapper used by create and destroy replies: a non-empty
/// `error` means the daemon refused, otherwise `msg` holds the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub msg: serde_json::Value,
}

/// A single container as the daemon reports it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerInfo {
    pub name: String,
    pub host: String,
    pub status: String,
    /// Flat address field.
    pub ip: String,
    /// Addresses keyed by interface.
    pub ips: BTreeMap<String, Vec<String>>,
}

impl ContainerInfo {
    /// Address shown in listings: the first eth0 entry when addresses
    /// come per interface, the flat field otherwise.
    pub fn display_ip(&self) -> &str {
        self.ips
            .get("eth0")
            .and_then(|addrs| addrs.first())
            .map(String::as_str)
            .unwrap_or(&self.ip)
    }
}

/// Per-host statistics from `/h`. RAM and disk figures arrive in KiB.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostStats {
    pub score: f64,
    pub cpu_capacity: i64,
    pub cpu_usage: i64,
    pub ram_capacity: i64,
    pub ram_free: i64,
    pub disk_capacity: i64,
    pub disk_free: i64,
    pub containers: BTreeMap<String, ContainerInfo>,
    pub pools: Vec<String>,
}

/// The container map of one host, as the listing endpoints return it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostContainers {
    pub containers: BTreeMap<String, ContainerInfo>,
}

/// Pool names of one host.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostPools {
    pub pools: Vec<String>,
}
