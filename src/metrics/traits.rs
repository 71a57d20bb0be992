//! Traits for system metrics collection.

use crate::error::Result;
use crate::metrics::data::{
    DiskUsage, InterfaceInfo, LoadAverage, MemoryUsage, NetworkTotals, Partition,
};
use std::time::Duration;

/// Source of the host statistics shown on the display.
///
/// Every query fails independently. Callers decide how to render a failed
/// value; the display loop substitutes an empty string and moves on.
pub trait MetricsProvider {
    /// Host name of the machine.
    fn hostname(&mut self) -> Result<String>;

    /// Time since boot.
    fn uptime(&mut self) -> Result<Duration>;

    /// Physical memory utilization.
    fn memory(&mut self) -> Result<MemoryUsage>;

    /// Swap utilization.
    fn swap(&mut self) -> Result<MemoryUsage>;

    /// Per-core CPU utilization percentages.
    ///
    /// Sampling needs two observations roughly a second apart, so this
    /// suspends for the sampling window.
    fn cpu_usage(&mut self) -> impl std::future::Future<Output = Result<Vec<f32>>> + Send;

    /// Highest reading among temperature sensors whose label starts with `pattern`.
    ///
    /// Returns `None` when no sensor matches.
    fn max_temperature(&mut self, pattern: &str) -> Result<Option<f32>>;

    /// 1, 5 and 15 minute load averages.
    fn load_average(&mut self) -> Result<LoadAverage>;

    /// Cumulative bytes sent and received across all interfaces.
    fn network_totals(&mut self) -> Result<NetworkTotals>;

    /// Every network interface on the host.
    fn interfaces(&mut self) -> Result<Vec<InterfaceInfo>>;

    /// Every mounted partition.
    fn partitions(&mut self) -> Result<Vec<Partition>>;

    /// Capacity of the filesystem mounted at `mount_point`.
    fn disk_usage(&mut self, mount_point: &str) -> Result<DiskUsage>;
}
