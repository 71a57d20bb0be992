//! Character display transports.
//!
//! The page scheduler only talks to [`LcdTransport`]. On a Raspberry Pi built
//! with the `i2c` feature the default transport drives an HD44780 panel
//! through the Adafruit I2C backpack; everywhere else it prints framed pages
//! to stdout so the loop can run on a development machine.

pub mod console;

#[cfg(feature = "i2c")]
pub mod adafruit;

use crate::config::DisplayConfig;
use crate::error::Result;

pub use console::ConsoleTransport;

#[cfg(feature = "i2c")]
pub use adafruit::AdafruitLcd;

/// Transport used by the binary for the current build.
#[cfg(feature = "i2c")]
pub type DefaultTransport = AdafruitLcd;

/// Transport used by the binary for the current build.
#[cfg(not(feature = "i2c"))]
pub type DefaultTransport = ConsoleTransport<std::io::Stdout>;

/// Delivers rendered text to a character display.
pub trait LcdTransport {
    /// Show `lines`, one per row from the top.
    ///
    /// Lines beyond the row count are dropped and every line is padded or
    /// clipped to the column count.
    fn write_lines(&mut self, lines: &[String]) -> Result<()>;

    /// Switch the backlight on or off.
    fn set_backlight(&mut self, on: bool) -> Result<()>;

    /// Release the display.
    fn close(&mut self) -> Result<()>;
}

/// Open the build's default transport with the configured geometry.
#[cfg(feature = "i2c")]
pub fn open_default(config: &DisplayConfig) -> Result<DefaultTransport> {
    AdafruitLcd::open(config.bus, config.address, config.columns, config.rows)
}

/// Open the build's default transport with the configured geometry.
#[cfg(not(feature = "i2c"))]
pub fn open_default(config: &DisplayConfig) -> Result<DefaultTransport> {
    tracing::warn!(
        "Built without the i2c feature, printing to stdout instead of bus {} address {:#04x}",
        config.bus,
        config.address
    );
    Ok(ConsoleTransport::stdout(config.columns, config.rows))
}
