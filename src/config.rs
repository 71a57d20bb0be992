//! Display configuration.

use crate::error::{DisplayError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything the display loop needs to know, fixed at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// I2C bus number (`/dev/i2c-N`)
    pub bus: u8,
    /// 7-bit I2C address of the backpack
    pub address: u16,
    /// Characters per row
    pub columns: u8,
    /// Rows on the display
    pub rows: u8,
    /// Seconds each page stays on screen
    pub interval_secs: u64,
    /// Block devices to show; empty means every mounted partition
    pub disks: Vec<String>,
    /// Network interfaces in order of preference for the connectivity page
    pub interfaces: Vec<String>,
    /// Temperature sensors whose label starts with this are considered CPU cores
    pub sensor_pattern: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            bus: crate::DEFAULT_BUS,
            address: crate::DEFAULT_ADDRESS,
            columns: crate::DEFAULT_COLUMNS,
            rows: crate::DEFAULT_ROWS,
            interval_secs: crate::DEFAULT_INTERVAL_SECS,
            disks: Vec::new(),
            interfaces: vec!["eth0".to_string(), "wlan0".to_string()],
            sensor_pattern: crate::DEFAULT_SENSOR_PATTERN.to_string(),
        }
    }
}

impl DisplayConfig {
    /// Create a new configuration for a display of the given geometry.
    pub fn new(address: u16, columns: u8, rows: u8) -> Self {
        Self {
            address,
            columns,
            rows,
            ..Default::default()
        }
    }

    /// Set the I2C bus number.
    pub fn with_bus(mut self, bus: u8) -> Self {
        self.bus = bus;
        self
    }

    /// Set how long each page is shown.
    pub fn with_interval_secs(mut self, secs: u64) -> Self {
        self.interval_secs = secs;
        self
    }

    /// Show only these disks instead of every mounted partition.
    pub fn with_disks(mut self, disks: Vec<String>) -> Self {
        self.disks = disks;
        self
    }

    /// Set the interface preference order. An empty list keeps the default.
    pub fn with_interfaces(mut self, interfaces: Vec<String>) -> Self {
        if !interfaces.is_empty() {
            self.interfaces = interfaces;
        }
        self
    }

    /// Set the temperature sensor label prefix.
    pub fn with_sensor_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.sensor_pattern = pattern.into();
        self
    }

    /// Time each page stays on screen.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Reject geometry and timing the display loop cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.address > 0x7f {
            return Err(DisplayError::config_error(format!(
                "I2C address {:#04x} is outside the 7-bit range",
                self.address
            )));
        }
        if self.rows == 0 {
            return Err(DisplayError::config_error("rows must be at least 1"));
        }
        if usize::from(self.columns) < crate::format::KEY_WIDTH + 1 {
            return Err(DisplayError::config_error(format!(
                "columns must be at least {}, got {}",
                crate::format::KEY_WIDTH + 1,
                self.columns
            )));
        }
        if self.interval_secs == 0 {
            return Err(DisplayError::config_error("page interval must be at least 1 second"));
        }
        Ok(())
    }
}
