//! Page layout for each stage of the display rotation.
//!
//! Builders here are pure: they take values already read from the metrics
//! collaborator (or the empty substitutes used when a read failed) and lay
//! them out as display lines.

use crate::format::{
    fit_lines, format_bytes, format_key_value, normalize_fs_type, short_device_name,
};
use crate::metrics::data::{DiskUsage, InterfaceInfo};
use serde::{Deserialize, Serialize};

/// One screenful of text, every line exactly as wide as the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    lines: Vec<String>,
}

impl Page {
    /// Fit `lines` to the display geometry.
    pub fn new(lines: Vec<String>, columns: u8, rows: u8) -> Self {
        Self {
            lines: fit_lines(&lines, usize::from(columns), usize::from(rows)),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// A slot in the rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Hostname and uptime
    Host,
    /// Memory and swap utilization
    Memory,
    /// Busiest core, hottest sensor and load averages
    Cpu,
    /// Bytes sent and received since boot
    Network,
    /// Preferred interface state and address
    Connectivity,
    /// Capacity of one block device
    Disk(String),
}

/// The stages of one full rotation: the fixed pages, then one per disk.
pub fn rotation(disks: &[String]) -> Vec<Stage> {
    let mut stages = vec![
        Stage::Host,
        Stage::Memory,
        Stage::Cpu,
        Stage::Network,
        Stage::Connectivity,
    ];
    stages.extend(disks.iter().cloned().map(Stage::Disk));
    stages
}

/// Sort and deduplicate device identifiers so page order is stable.
pub fn resolve_disks(devices: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut disks: Vec<String> = devices.into_iter().collect();
    disks.sort();
    disks.dedup();
    disks
}

pub fn host_lines(hostname: &str, uptime: &str, width: usize) -> Vec<String> {
    vec![
        format_key_value("HST", hostname, width),
        format_key_value("UPT", uptime, width),
    ]
}

pub fn memory_lines(memory: &str, swap: &str, width: usize) -> Vec<String> {
    vec![
        format_key_value("MEM", memory, width),
        format_key_value("SWP", swap, width),
    ]
}

/// CPU summary as a key/value line, load averages as a raw line.
pub fn cpu_lines(cpu: &str, load: &str, width: usize) -> Vec<String> {
    vec![format_key_value("CPU", cpu, width), load.to_string()]
}

/// Byte totals use two decimals and a promotion threshold of 9 so counters
/// keep four significant digits before switching units.
pub fn network_lines(tx_bytes: Option<u64>, rx_bytes: Option<u64>, width: usize) -> Vec<String> {
    let scaled = |bytes: Option<u64>| {
        bytes
            .map(|bytes| format!("{:>4}", format_bytes(bytes, 2, 9.0)))
            .unwrap_or_default()
    };

    vec![
        format_key_value("TTX", &scaled(tx_bytes), width),
        format_key_value("TRX", &scaled(rx_bytes), width),
    ]
}

/// Interfaces named in `preferred` that exist on the host, in preference order.
pub fn candidate_interfaces<'a>(
    interfaces: &'a [InterfaceInfo],
    preferred: &[String],
) -> Vec<&'a InterfaceInfo> {
    preferred
        .iter()
        .filter_map(|name| interfaces.iter().find(|iface| &iface.name == name))
        .collect()
}

/// Status of the most preferred interface and the first address among the
/// candidates, starting with that interface.
pub fn connectivity_lines(interfaces: &[InterfaceInfo], preferred: &[String]) -> Vec<String> {
    let candidates = candidate_interfaces(interfaces, preferred);

    let status = candidates
        .first()
        .map(|iface| {
            let state = if iface.is_up { "CONNECTED" } else { "DISCONNECTED" };
            format!("{} {}", iface.name, state)
        })
        .unwrap_or_default();

    let address = candidates
        .iter()
        .find_map(|iface| iface.addresses.first())
        .map(|addr| strip_prefix_len(addr).to_string())
        .unwrap_or_default();

    vec![status, address]
}

/// `sda1 ext4` over `4T 61.32%`, or a placeholder when the device is not mounted.
pub fn disk_lines(device: &str, mounted: Option<(&str, DiskUsage)>) -> Vec<String> {
    let name = short_device_name(device);

    match mounted {
        Some((filesystem, usage)) => vec![
            format!("{} {}", name, normalize_fs_type(filesystem)),
            format!(
                "{} {:.2}%",
                format_bytes(usage.total_bytes, 0, 1.0),
                usage.used_percent
            ),
        ],
        None => vec![format!("no disk: {}", name), String::new()],
    }
}

fn strip_prefix_len(addr: &str) -> &str {
    addr.split_once('/').map_or(addr, |(ip, _)| ip)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(name: &str, is_up: bool, addresses: &[&str]) -> InterfaceInfo {
        InterfaceInfo {
            name: name.to_string(),
            is_up,
            addresses: addresses.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn preferred() -> Vec<String> {
        vec!["eth0".to_string(), "wlan0".to_string()]
    }

    #[test]
    fn test_page_fits_geometry() {
        let page = Page::new(vec!["a".to_string(), "b".to_string(), "c".to_string()], 4, 2);
        assert_eq!(page.lines(), ["   a", "   b"]);
    }

    #[test]
    fn test_rotation_has_one_page_per_disk() {
        assert_eq!(rotation(&[]).len(), 5);

        let disks = vec!["/dev/sda1".to_string(), "/dev/sdb1".to_string()];
        let stages = rotation(&disks);
        assert_eq!(stages.len(), 7);
        assert_eq!(stages[0], Stage::Host);
        assert_eq!(stages[4], Stage::Connectivity);
        assert_eq!(stages[6], Stage::Disk("/dev/sdb1".to_string()));
    }

    #[test]
    fn test_resolve_disks_sorts_and_dedups() {
        let devices = ["/dev/sdb", "/dev/sda", "/dev/sda"].map(String::from);
        assert_eq!(resolve_disks(devices), vec!["/dev/sda", "/dev/sdb"]);
        assert!(resolve_disks(Vec::new()).is_empty());
    }

    #[test]
    fn test_host_lines() {
        let lines = host_lines("nas", "26h0m5s", 16);
        assert_eq!(lines, vec!["HST          nas", "UPT      26h0m5s"]);
    }

    #[test]
    fn test_network_lines_keep_precision_below_threshold() {
        let lines = network_lines(Some(1_500_000), Some(12_000_000_000), 16);
        assert_eq!(lines[0], "TTX     1500.00K");
        assert_eq!(lines[1], "TRX       12.00G");
    }

    #[test]
    fn test_network_lines_blank_on_failure() {
        let lines = network_lines(None, Some(10), 16);
        assert_eq!(lines[0], format!("TTX{}", " ".repeat(13)));
        assert_eq!(lines[1], "TRX       10.00B");
    }

    #[test]
    fn test_connectivity_prefers_configured_order() {
        let interfaces = vec![
            iface("lo", true, &["127.0.0.1"]),
            iface("wlan0", true, &["192.168.1.20"]),
            iface("eth0", false, &[]),
        ];

        // eth0 is preferred even though it is down; the address falls through to wlan0
        let lines = connectivity_lines(&interfaces, &preferred());
        assert_eq!(lines, vec!["eth0 DISCONNECTED", "192.168.1.20"]);
    }

    #[test]
    fn test_connectivity_uses_preferred_address_first() {
        let interfaces = vec![
            iface("wlan0", true, &["192.168.1.20"]),
            iface("eth0", true, &["10.0.0.2/24", "fe80::1"]),
        ];

        let lines = connectivity_lines(&interfaces, &preferred());
        assert_eq!(lines, vec!["eth0 CONNECTED", "10.0.0.2"]);
    }

    #[test]
    fn test_connectivity_falls_back_when_preferred_is_missing() {
        let interfaces = vec![iface("wlan0", true, &["192.168.1.20"])];

        let lines = connectivity_lines(&interfaces, &preferred());
        assert_eq!(lines, vec!["wlan0 CONNECTED", "192.168.1.20"]);
    }

    #[test]
    fn test_connectivity_without_candidates() {
        let interfaces = vec![iface("lo", true, &["127.0.0.1"])];
        assert_eq!(connectivity_lines(&interfaces, &preferred()), vec!["", ""]);
    }

    #[test]
    fn test_disk_lines() {
        let usage = DiskUsage {
            total_bytes: 4_000_000_000_000,
            used_percent: 61.32,
        };
        assert_eq!(
            disk_lines("/dev/sda1", Some(("ext2/ext3", usage))),
            vec!["sda1 ext", "4T 61.32%"]
        );
        assert_eq!(disk_lines("/dev/sdb1", None), vec!["no disk: sdb1", ""]);
    }
}
