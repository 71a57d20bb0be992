//! # NAS LCD - rotating status pages on a character display
//!
//! Polls host statistics and shows them a page at a time on a small
//! HD44780 character LCD attached over I2C, the kind found on the front of
//! home storage appliances.
//!
//! ## Pages
//!
//! - **Host**: hostname and uptime
//! - **Memory**: memory and swap utilization
//! - **CPU**: busiest core, hottest core sensor and load averages
//! - **Network**: bytes sent and received since boot
//! - **Connectivity**: preferred interface state and local address
//! - **Disks**: one page per block device with filesystem, size and usage
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nas_lcd::{lcd, DisplayConfig, PageScheduler, SystemCollector};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DisplayConfig::default();
//!     let transport = lcd::open_default(&config)?;
//!     let mut scheduler = PageScheduler::new(config, SystemCollector::new()?, transport)?;
//!
//!     scheduler.run().await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod lcd;
pub mod metrics;
pub mod pages;
pub mod scheduler;

// Re-export public API
pub use config::DisplayConfig;
pub use error::{DisplayError, Result};
pub use lcd::{ConsoleTransport, DefaultTransport, LcdTransport};
pub use metrics::{MetricsProvider, SystemCollector};
pub use pages::{Page, Stage};
pub use scheduler::PageScheduler;

/// The default I2C bus (`/dev/i2c-1` on a Raspberry Pi)
pub const DEFAULT_BUS: u8 = 1;

/// The default address of the Adafruit I2C backpack
pub const DEFAULT_ADDRESS: u16 = 0x20;

/// The default display width in characters
pub const DEFAULT_COLUMNS: u8 = 16;

/// The default display height in rows
pub const DEFAULT_ROWS: u8 = 2;

/// The default time each page stays on screen, in seconds
pub const DEFAULT_INTERVAL_SECS: u64 = 3;

/// The default temperature sensor label prefix for CPU cores
pub const DEFAULT_SENSOR_PATTERN: &str = "coretemp Core";
