//! Host metrics collection backed by sysinfo, procfs and sysfs.

use crate::error::{DisplayError, Result};
use crate::metrics::{
    data::*,
    traits::MetricsProvider,
};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;
use sysinfo::{Components, Disks, Networks, System, MINIMUM_CPU_UPDATE_INTERVAL};
use tokio::time;

/// Time between the two observations that make up a CPU usage sample.
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

const SYS_CLASS_NET: &str = "/sys/class/net";

/// Interface is running, from `include/uapi/linux/if.h`.
const IFF_RUNNING: u32 = 0x40;

/// System metrics collector using sysinfo and direct /proc and /sys access.
pub struct SystemCollector {
    system: System,
    disks: Disks,
    networks: Networks,
    components: Components,
}

impl SystemCollector {
    /// Create a new system collector instance.
    pub fn new() -> Result<Self> {
        let mut system = System::new();
        system.refresh_memory();
        system.refresh_cpu_usage();

        Ok(Self {
            system,
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            components: Components::new_with_refreshed_list(),
        })
    }

    /// Read system load averages.
    fn read_load_average(&self) -> Result<LoadAverage> {
        let loadavg = fs::read_to_string("/proc/loadavg")?;
        parse_load_average(&loadavg)
            .ok_or_else(|| DisplayError::metrics_error("Malformed /proc/loadavg"))
    }

    /// Read whether an interface is up from its sysfs operstate.
    ///
    /// Drivers that do not track carrier report `unknown`; for those the
    /// running flag decides.
    fn read_link_state(name: &str) -> bool {
        let base = Path::new(SYS_CLASS_NET).join(name);
        let operstate = fs::read_to_string(base.join("operstate")).unwrap_or_default();

        match operstate.trim() {
            "up" => true,
            "unknown" => fs::read_to_string(base.join("flags"))
                .ok()
                .and_then(|flags| parse_interface_flags(&flags))
                .is_some_and(|flags| flags & IFF_RUNNING != 0),
            _ => false,
        }
    }
}

impl MetricsProvider for SystemCollector {
    fn hostname(&mut self) -> Result<String> {
        System::host_name().ok_or_else(|| DisplayError::metrics_error("Hostname unavailable"))
    }

    fn uptime(&mut self) -> Result<Duration> {
        Ok(Duration::from_secs(System::uptime()))
    }

    fn memory(&mut self) -> Result<MemoryUsage> {
        self.system.refresh_memory();
        Ok(MemoryUsage::new(
            self.system.used_memory(),
            self.system.total_memory(),
        ))
    }

    fn swap(&mut self) -> Result<MemoryUsage> {
        self.system.refresh_memory();
        Ok(MemoryUsage::new(
            self.system.used_swap(),
            self.system.total_swap(),
        ))
    }

    async fn cpu_usage(&mut self) -> Result<Vec<f32>> {
        self.system.refresh_cpu_usage();
        time::sleep(CPU_SAMPLE_WINDOW.max(MINIMUM_CPU_UPDATE_INTERVAL)).await;
        self.system.refresh_cpu_usage();

        let cpus = self.system.cpus();
        if cpus.is_empty() {
            return Err(DisplayError::metrics_error("No CPU information available"));
        }

        Ok(cpus.iter().map(|cpu| cpu.cpu_usage()).collect())
    }

    fn max_temperature(&mut self, pattern: &str) -> Result<Option<f32>> {
        self.components.refresh();

        Ok(self
            .components
            .list()
            .iter()
            .filter(|component| component.label().starts_with(pattern))
            .map(|component| component.temperature())
            .filter(|celsius| celsius.is_finite())
            .reduce(f32::max))
    }

    fn load_average(&mut self) -> Result<LoadAverage> {
        self.read_load_average()
    }

    fn network_totals(&mut self) -> Result<NetworkTotals> {
        self.networks.refresh();

        Ok(self
            .networks
            .iter()
            .fold(NetworkTotals::default(), |totals, (_, network)| NetworkTotals {
                tx_bytes: totals.tx_bytes + network.total_transmitted(),
                rx_bytes: totals.rx_bytes + network.total_received(),
            }))
    }

    fn interfaces(&mut self) -> Result<Vec<InterfaceInfo>> {
        let mut addresses: HashMap<String, Vec<String>> = HashMap::new();
        let assigned = local_ip_address::list_afinet_netifas()
            .map_err(|e| DisplayError::metrics_error(format!("Failed to list addresses: {}", e)))?;
        for (name, addr) in assigned {
            addresses.entry(name).or_default().push(addr.to_string());
        }

        let mut names = fs::read_dir(SYS_CLASS_NET)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| InterfaceInfo {
                is_up: Self::read_link_state(&name),
                addresses: addresses.remove(&name).unwrap_or_default(),
                name,
            })
            .collect())
    }

    fn partitions(&mut self) -> Result<Vec<Partition>> {
        self.disks.refresh_list();

        Ok(self
            .disks
            .iter()
            .map(|disk| Partition {
                device: disk.name().to_string_lossy().to_string(),
                mount_point: disk.mount_point().to_string_lossy().to_string(),
                filesystem: disk.file_system().to_string_lossy().to_string(),
            })
            .collect())
    }

    fn disk_usage(&mut self, mount_point: &str) -> Result<DiskUsage> {
        self.disks.refresh();

        self.disks
            .iter()
            .find(|disk| disk.mount_point() == Path::new(mount_point))
            .map(|disk| DiskUsage::from_available(disk.total_space(), disk.available_space()))
            .ok_or_else(|| {
                DisplayError::metrics_error(format!("Nothing mounted at {}", mount_point))
            })
    }
}

/// Parse the first three fields of `/proc/loadavg`.
fn parse_load_average(loadavg: &str) -> Option<LoadAverage> {
    let mut parts = loadavg.split_whitespace();

    Some(LoadAverage {
        one_minute: parts.next()?.parse().ok()?,
        five_minutes: parts.next()?.parse().ok()?,
        fifteen_minutes: parts.next()?.parse().ok()?,
    })
}

/// Parse a sysfs interface flags word such as `0x1003`.
fn parse_interface_flags(flags: &str) -> Option<u32> {
    let flags = flags.trim();
    u32::from_str_radix(flags.strip_prefix("0x").unwrap_or(flags), 16).ok()
}
