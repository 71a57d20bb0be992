//! Host metrics consumed by the display pages.
//!
//! This module defines the [`MetricsProvider`] seam the page scheduler reads
//! from, the plain data it returns, and [`SystemCollector`], the
//! implementation that queries the running Linux host.

pub mod collector;
pub mod data;
pub mod traits;

// Re-export commonly used items
pub use collector::SystemCollector;
pub use data::{DiskUsage, InterfaceInfo, LoadAverage, MemoryUsage, NetworkTotals, Partition};
pub use traits::MetricsProvider;
