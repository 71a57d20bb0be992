//! The display loop.
//!
//! [`PageScheduler`] owns the transport for the life of the process. Each
//! rotation walks the fixed stages and then one stage per disk, reading fresh
//! values for every page. A failed metrics read blanks the affected value and
//! is logged; a failed write to the display ends the loop with an error.

use crate::config::DisplayConfig;
use crate::error::Result;
use crate::format::{format_cpu, format_load, format_uptime, format_utilization};
use crate::lcd::LcdTransport;
use crate::metrics::{DiskUsage, MetricsProvider, Partition};
use crate::pages::{self, Page, Stage};
use tokio::time;
use tracing::{debug, info, warn};

/// Drives the rotating status pages.
pub struct PageScheduler<M, T> {
    config: DisplayConfig,
    metrics: M,
    transport: T,
    disks: Vec<String>,
}

impl<M, T> PageScheduler<M, T>
where
    M: MetricsProvider,
    T: LcdTransport,
{
    /// Validate `config` and resolve the disk list once for the process lifetime.
    ///
    /// Disks come from the configuration when it names any, otherwise from
    /// the mounted partitions.
    pub fn new(config: DisplayConfig, mut metrics: M, transport: T) -> Result<Self> {
        config.validate()?;

        let disks = if config.disks.is_empty() {
            match metrics.partitions() {
                Ok(partitions) => pages::resolve_disks(partitions.into_iter().map(|p| p.device)),
                Err(err) => {
                    warn!("Failed to list partitions, no disk pages will be shown: {}", err);
                    Vec::new()
                }
            }
        } else {
            pages::resolve_disks(config.disks.iter().cloned())
        };
        info!("Disk pages: {:?}", disks);

        Ok(Self {
            config,
            metrics,
            transport,
            disks,
        })
    }

    /// Resolved disk identifiers, sorted and without duplicates.
    pub fn disks(&self) -> &[String] {
        &self.disks
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give the transport back, e.g. to close it explicitly.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Stages of one rotation in display order.
    pub fn stages(&self) -> Vec<Stage> {
        pages::rotation(&self.disks)
    }

    /// Show every page forever. Returns only when the display fails.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Rotating {} pages every {}s",
            self.stages().len(),
            self.config.interval_secs
        );
        loop {
            self.run_rotation().await?;
        }
    }

    /// Show each page of one rotation, pausing after each.
    pub async fn run_rotation(&mut self) -> Result<()> {
        for stage in self.stages() {
            let page = self.render(&stage).await;
            self.push(&stage, &page)?;
            time::sleep(self.config.interval()).await;
        }
        Ok(())
    }

    /// Build every page of one rotation without touching the display.
    pub async fn render_rotation(&mut self) -> Vec<Page> {
        let mut rendered = Vec::new();
        for stage in self.stages() {
            rendered.push(self.render(&stage).await);
        }
        rendered
    }

    /// Read current values and lay out the page for `stage`.
    pub async fn render(&mut self, stage: &Stage) -> Page {
        let width = usize::from(self.config.columns);

        let lines = match stage {
            Stage::Host => {
                let hostname = or_blank("hostname", self.metrics.hostname());
                let uptime = or_blank("uptime", self.metrics.uptime().map(format_uptime));
                pages::host_lines(&hostname, &uptime, width)
            }
            Stage::Memory => {
                let memory = or_blank(
                    "memory",
                    self.metrics
                        .memory()
                        .map(|m| format_utilization(m.used_bytes, m.total_bytes, m.used_percent)),
                );
                let swap = or_blank(
                    "swap",
                    self.metrics
                        .swap()
                        .map(|s| format_utilization(s.used_bytes, s.total_bytes, s.used_percent)),
                );
                pages::memory_lines(&memory, &swap, width)
            }
            Stage::Cpu => {
                let cpu = self.cpu_summary().await;
                let load = or_blank(
                    "load average",
                    self.metrics.load_average().map(|l| format_load(&l)),
                );
                pages::cpu_lines(&cpu, &load, width)
            }
            Stage::Network => match self.metrics.network_totals() {
                Ok(totals) => {
                    pages::network_lines(Some(totals.tx_bytes), Some(totals.rx_bytes), width)
                }
                Err(err) => {
                    warn!("Failed to read network totals: {}", err);
                    pages::network_lines(None, None, width)
                }
            },
            Stage::Connectivity => match self.metrics.interfaces() {
                Ok(interfaces) => {
                    pages::connectivity_lines(&interfaces, &self.config.interfaces)
                }
                Err(err) => {
                    warn!("Failed to list network interfaces: {}", err);
                    vec![String::new(), String::new()]
                }
            },
            Stage::Disk(device) => {
                let mounted = self.mounted_usage(device);
                pages::disk_lines(
                    device,
                    mounted
                        .as_ref()
                        .map(|(partition, usage)| (partition.filesystem.as_str(), *usage)),
                )
            }
        };

        Page::new(lines, self.config.columns, self.config.rows)
    }

    /// Busiest core and hottest matching sensor; blank if the CPU sample fails.
    async fn cpu_summary(&mut self) -> String {
        let busiest = match self.metrics.cpu_usage().await {
            Ok(cores) => cores.into_iter().fold(0.0_f32, f32::max),
            Err(err) => {
                warn!("Failed to sample CPU usage: {}", err);
                return String::new();
            }
        };

        let hottest = match self.metrics.max_temperature(&self.config.sensor_pattern) {
            Ok(Some(celsius)) => celsius,
            Ok(None) => {
                debug!("No sensor label starts with {:?}", self.config.sensor_pattern);
                0.0
            }
            Err(err) => {
                warn!("Failed to read temperatures: {}", err);
                0.0
            }
        };

        format_cpu(busiest, hottest)
    }

    /// Partition and usage for `device`, or `None` if it is not mounted or unreadable.
    fn mounted_usage(&mut self, device: &str) -> Option<(Partition, DiskUsage)> {
        let partition = match self.metrics.partitions() {
            Ok(partitions) => partitions.into_iter().find(|p| p.device == device),
            Err(err) => {
                warn!("Failed to list partitions: {}", err);
                return None;
            }
        };
        let Some(partition) = partition else {
            warn!("{} is not mounted", device);
            return None;
        };

        match self.metrics.disk_usage(&partition.mount_point) {
            Ok(usage) => Some((partition, usage)),
            Err(err) => {
                warn!("Failed to read usage of {}: {}", partition.mount_point, err);
                None
            }
        }
    }

    fn push(&mut self, stage: &Stage, page: &Page) -> Result<()> {
        debug!("{:?} page: {:?}", stage, page.lines());
        self.transport.write_lines(page.lines())
    }
}

fn or_blank(what: &str, value: Result<String>) -> String {
    value.unwrap_or_else(|err| {
        warn!("Failed to read {}: {}", what, err);
        String::new()
    })
}
