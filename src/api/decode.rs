//! Per-operation-kind response decoding

use std::collections::BTreeMap;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::format;
use crate::operation::Operation;
use crate::transport::RawResponse;

use super::types::{ContainerInfo, Envelope, HostContainers, HostPools, HostStats};

pub const MESSAGE_CONTAINER_STARTED: &str = "Container started";
pub const MESSAGE_CONTAINER_STOPPED: &str = "Container stopped";
pub const MESSAGE_CONTAINER_DESTROYED: &str = "Container destroyed";

/// Decode a transport response according to the operation that
/// produced it, yielding the text shown to the user.
///
/// The context decides which shape a container listing has, the same
/// way it decided the URL at resolution time.
pub fn decode(op: &Operation, context: &Context, response: &RawResponse) -> Result<String> {
    match op {
        Operation::Create { .. } => decode_create(response),
        Operation::Start => decode_lifecycle(response, MESSAGE_CONTAINER_STARTED),
        Operation::Stop => decode_lifecycle(response, MESSAGE_CONTAINER_STOPPED),
        Operation::Destroy => decode_destroy(response),
        Operation::ListContainers if context.host.is_empty() => decode_all_containers(response),
        Operation::ListContainers => decode_host_containers(response),
        Operation::ListHosts => decode_hosts(response),
        Operation::ListPools => decode_pools(response),
    }
}

fn decode_create(response: &RawResponse) -> Result<String> {
    let envelope: Envelope = serde_json::from_slice(&response.body)?;
    if !envelope.error.is_empty() {
        return Err(Error::Api(envelope.error));
    }

    let info: ContainerInfo = serde_json::from_value(envelope.msg)?;
    Ok(format!(
        "Created container {} with addresses: {}",
        info.name,
        info.display_ip()
    ))
}

fn decode_lifecycle(response: &RawResponse, success: &str) -> Result<String> {
    match response.status {
        204 => Ok(success.to_string()),
        404 => Err(Error::NoSuchContainer),
        status => Err(Error::UnexpectedStatus(status)),
    }
}

fn decode_destroy(response: &RawResponse) -> Result<String> {
    match response.status {
        204 => Ok(MESSAGE_CONTAINER_DESTROYED.to_string()),
        404 => Err(Error::NoSuchContainer),
        409 => {
            let envelope: Envelope = serde_json::from_slice(&response.body)?;
            Err(Error::Conflict(envelope.error))
        }
        status => Err(Error::UnexpectedStatus(status)),
    }
}

fn decode_all_containers(response: &RawResponse) -> Result<String> {
    let hosts: BTreeMap<String, HostContainers> = serde_json::from_slice(&response.body)?;

    let mut lines = Vec::new();
    for host in hosts.values() {
        lines.extend(format::container_lines(&host.containers));
    }

    Ok(format::join_lines(&lines))
}

fn decode_host_containers(response: &RawResponse) -> Result<String> {
    let host: HostContainers = serde_json::from_slice(&response.body)?;
    Ok(format::join_lines(&format::container_lines(
        &host.containers,
    )))
}

fn decode_hosts(response: &RawResponse) -> Result<String> {
    let hosts: BTreeMap<String, HostStats> = serde_json::from_slice(&response.body)?;

    let blocks: Vec<String> = hosts
        .iter()
        .map(|(name, stats)| format::host_block(name, stats))
        .collect();

    Ok(format::join_blocks(&blocks))
}

fn decode_pools(response: &RawResponse) -> Result<String> {
    let hosts: BTreeMap<String, HostPools> = serde_json::from_slice(&response.body)?;

    // Deduplicate by value, first seen wins; hosts are visited in key
    // order so the result is stable across runs.
    let mut pools: Vec<String> = Vec::new();
    for host in hosts.values() {
        for pool in &host.pools {
            if !pools.iter().any(|seen| seen == pool) {
                pools.push(pool.clone());
            }
        }
    }

    Ok(format::join_lines(&pools))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> Context {
        Context::builder().container("box1").build()
    }

    fn response(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_create_success_mentions_name_and_ip() {
        let body = r#"{
            "error": "",
            "msg": {"name": "box1", "host": "h1", "status": "running", "ip": "10.0.0.1"}
        }"#;

        let text = decode(&Operation::create(), &context(), &response(200, body)).unwrap();
        assert_eq!(text, "Created container box1 with addresses: 10.0.0.1");
    }

    #[test]
    fn test_create_api_error() {
        let body = r#"{"error": "no such image", "msg": null}"#;

        let err = decode(&Operation::create(), &context(), &response(200, body)).unwrap_err();
        assert!(matches!(err, Error::Api(ref reason) if reason == "no such image"));
        assert_eq!(err.to_string(), "no such image");
    }

    #[test]
    fn test_create_malformed_body_is_a_decode_error() {
        let err =
            decode(&Operation::create(), &context(), &response(200, "not json")).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_create_empty_error_with_null_msg_is_a_decode_error() {
        let body = r#"{"error": "", "msg": null}"#;
        let err = decode(&Operation::create(), &context(), &response(200, body)).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_start_and_stop_on_204() {
        assert_eq!(
            decode(&Operation::Start, &context(), &response(204, "")).unwrap(),
            MESSAGE_CONTAINER_STARTED
        );
        assert_eq!(
            decode(&Operation::Stop, &context(), &response(204, "")).unwrap(),
            MESSAGE_CONTAINER_STOPPED
        );
    }

    #[test]
    fn test_start_on_404() {
        let err = decode(&Operation::Start, &context(), &response(404, "")).unwrap_err();
        assert!(matches!(err, Error::NoSuchContainer));
        assert_eq!(err.to_string(), "No such container");
    }

    // Statuses outside the defined set are reported instead of being
    // silently swallowed.
    #[test]
    fn test_start_unexpected_status_is_an_error() {
        let err = decode(&Operation::Start, &context(), &response(500, "")).unwrap_err();
        assert!(matches!(err, Error::UnexpectedStatus(500)));
    }

    #[test]
    fn test_destroy_on_204() {
        assert_eq!(
            decode(&Operation::Destroy, &context(), &response(204, "")).unwrap(),
            MESSAGE_CONTAINER_DESTROYED
        );
    }

    #[test]
    fn test_destroy_conflict_carries_the_daemon_reason() {
        let body = r#"{"error": "container busy", "msg": null}"#;

        let err = decode(&Operation::Destroy, &context(), &response(409, body)).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(err.to_string(), "container busy");
    }

    #[test]
    fn test_list_containers_all_hosts() {
        let body = r#"{
            "h1": {"containers": {"c1": {"name": "c1", "host": "h1", "status": "running", "ip": "10.0.0.1"}}}
        }"#;

        let text = decode(&Operation::ListContainers, &context(), &response(200, body)).unwrap();
        assert_eq!(text, "c1 (on h1): running, ip: 10.0.0.1");
    }

    #[test]
    fn test_list_containers_flattens_hosts_in_key_order() {
        let body = r#"{
            "zeta": {"containers": {"z1": {"name": "z1", "host": "zeta", "status": "stopped", "ip": "10.0.0.3"}}},
            "alpha": {"containers": {"a1": {"name": "a1", "host": "alpha", "status": "running", "ip": "10.0.0.2"}}}
        }"#;

        let text = decode(&Operation::ListContainers, &context(), &response(200, body)).unwrap();
        assert_eq!(
            text,
            "a1 (on alpha): running, ip: 10.0.0.2\nz1 (on zeta): stopped, ip: 10.0.0.3"
        );
    }

    #[test]
    fn test_list_containers_single_host() {
        let context = Context::builder().host("h1").build();
        let body = r#"{
            "containers": {
                "longname": {"name": "longname", "host": "h1", "status": "running", "ip": "10.0.0.1"},
                "c2": {"name": "c2", "host": "h1", "status": "stopped", "ip": "10.0.0.2"}
            }
        }"#;

        let text = decode(&Operation::ListContainers, &context, &response(200, body)).unwrap();
        assert_eq!(
            text,
            "      c2 (on h1): stopped, ip: 10.0.0.2\nlongname (on h1): running, ip: 10.0.0.1"
        );
    }

    #[test]
    fn test_list_hosts_renders_blocks() {
        let body = r#"{
            "h1": {
                "score": 0.25,
                "cpu_capacity": 400, "cpu_usage": 100,
                "ram_capacity": 16384, "ram_free": 8192,
                "disk_capacity": 102400, "disk_free": 51200,
                "containers": {"c1": {"name": "c1", "host": "h1", "status": "running", "ip": "10.0.0.1"}},
                "pools": ["web"]
            }
        }"#;

        let text = decode(&Operation::ListHosts, &context(), &response(200, body)).unwrap();
        assert_eq!(
            text,
            "h1\n--\nscore: 0.2500/1\ncpu: 300/400 %\nram: 8/16 MiB\ndisk: 50/100 MiB\nboxes:\nc1 (on h1): running, ip: 10.0.0.1"
        );
    }

    #[test]
    fn test_list_pools_dedupes_preserving_first_seen_order() {
        let body = r#"{
            "h1": {"pools": ["web", "batch"]},
            "h2": {"pools": ["batch", "web", "staging"]}
        }"#;

        let text = decode(&Operation::ListPools, &context(), &response(200, body)).unwrap();
        assert_eq!(text, "web\nbatch\nstaging");
    }

    #[test]
    fn test_list_malformed_body_is_a_decode_error() {
        let err =
            decode(&Operation::ListHosts, &context(), &response(200, "[]")).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }
}
