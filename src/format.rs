//! Deterministic text rendering of decoded listings

use std::collections::BTreeMap;

use crate::api::{ContainerInfo, HostStats};

/// One line per container, sorted by map key, names right-justified to
/// the longest name in the set so the columns line up.
pub fn container_lines(containers: &BTreeMap<String, ContainerInfo>) -> Vec<String> {
    let width = containers
        .values()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);

    containers
        .values()
        .map(|c| {
            format!(
                "{:>width$} (on {}): {}, ip: {}",
                c.name,
                c.host,
                c.status,
                c.display_ip()
            )
        })
        .collect()
}

/// Newline-joined, no trailing newline.
pub fn join_lines(lines: &[String]) -> String {
    lines.join("\n")
}

/// Host blocks get a blank line between them.
pub fn join_blocks(blocks: &[String]) -> String {
    blocks.join("\n\n")
}

/// Per-host statistics block: underlined hostname, score, free/total
/// resources and the host's container listing. RAM and disk arrive in
/// KiB and are shown in MiB.
pub fn host_block(hostname: &str, stats: &HostStats) -> String {
    let mut block = format!(
        "{hostname}\n{}\nscore: {:.4}/1\ncpu: {}/{} %\nram: {}/{} MiB\ndisk: {}/{} MiB\nboxes:",
        "-".repeat(hostname.len()),
        stats.score,
        stats.cpu_capacity - stats.cpu_usage,
        stats.cpu_capacity,
        stats.ram_free / 1024,
        stats.ram_capacity / 1024,
        stats.disk_free / 1024,
        stats.disk_capacity / 1024,
    );

    let containers = join_lines(&container_lines(&stats.containers));
    if !containers.is_empty() {
        block.push('\n');
        block.push_str(&containers);
    }

    block
}
