//! Data structures returned by the metrics collaborator.

use serde::{Deserialize, Serialize};

/// Used and total bytes for physical memory or swap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    /// Bytes in use
    pub used_bytes: u64,
    /// Total bytes available to the system
    pub total_bytes: u64,
    /// Usage percentage (0.0 to 100.0)
    pub used_percent: f64,
}

/// System load averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadAverage {
    pub one_minute: f64,
    pub five_minutes: f64,
    pub fifteen_minutes: f64,
}

/// Cumulative byte counters summed over every network interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTotals {
    /// Bytes transmitted since boot
    pub tx_bytes: u64,
    /// Bytes received since boot
    pub rx_bytes: u64,
}

/// A network interface as seen by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceInfo {
    /// Interface name (e.g., "eth0", "wlan0")
    pub name: String,
    /// Whether the interface is administratively and operationally up
    pub is_up: bool,
    /// Assigned addresses in the order the kernel reports them, without prefix length
    pub addresses: Vec<String>,
}

/// A mounted partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Device name (e.g., "/dev/sda1")
    pub device: String,
    /// Mount point (e.g., "/", "/srv/media")
    pub mount_point: String,
    /// Filesystem type (e.g., "ext4", "vfat")
    pub filesystem: String,
}

/// Capacity of a mounted filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    /// Total space in bytes
    pub total_bytes: u64,
    /// Usage percentage (0.0 to 100.0)
    pub used_percent: f64,
}

impl MemoryUsage {
    /// Build a usage record, deriving the percentage from the byte counts.
    pub fn new(used_bytes: u64, total_bytes: u64) -> Self {
        Self {
            used_bytes,
            total_bytes,
            used_percent: percent(used_bytes, total_bytes),
        }
    }
}

impl DiskUsage {
    /// Build a usage record from total and available space.
    pub fn from_available(total_bytes: u64, available_bytes: u64) -> Self {
        let used_bytes = total_bytes.saturating_sub(available_bytes);
        Self {
            total_bytes,
            used_percent: percent(used_bytes, total_bytes),
        }
    }
}

fn percent(used: u64, total: u64) -> f64 {
    if total > 0 {
        used as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_usage_percent() {
        let usage = MemoryUsage::new(2_000, 8_000);
        assert_eq!(usage.used_percent, 25.0);

        let empty = MemoryUsage::new(0, 0);
        assert_eq!(empty.used_percent, 0.0);
    }

    #[test]
    fn test_disk_usage_from_available() {
        let usage = DiskUsage::from_available(1_000, 250);
        assert_eq!(usage.total_bytes, 1_000);
        assert_eq!(usage.used_percent, 75.0);

        // available can exceed total on some filesystems
        let odd = DiskUsage::from_available(100, 200);
        assert_eq!(odd.used_percent, 0.0);
    }
}
