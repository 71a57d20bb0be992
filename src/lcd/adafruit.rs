//! HD44780 character LCD behind the Adafruit I2C/SPI backpack.
//!
//! The backpack is an MCP23008 port expander. Its GPIO register drives the
//! panel in 4-bit mode:
//!
//! | GP | 0 | 1  | 2 | 3  | 4  | 5  | 6  | 7         |
//! |----|---|----|---|----|----|----|----|-----------|
//! |    | - | RS | E | D4 | D5 | D6 | D7 | backlight |

use crate::error::{DisplayError, Result};
use crate::format::fit_lines;
use crate::lcd::LcdTransport;
use rppal::i2c::I2c;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

const MCP23008_IODIR: u8 = 0x00;
const MCP23008_GPIO: u8 = 0x09;

const PIN_RS: u8 = 1 << 1;
const PIN_ENABLE: u8 = 1 << 2;
const DATA_SHIFT: u8 = 3;
const PIN_BACKLIGHT: u8 = 1 << 7;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_INCREMENT: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0c;
const CMD_DISPLAY_OFF: u8 = 0x08;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM_ADDR: u8 = 0x80;

/// Commands sent by `close`, in order.
const SHUTDOWN_COMMANDS: [u8; 2] = [CMD_CLEAR, CMD_DISPLAY_OFF];

/// DDRAM address of the first column of each row.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Most instructions finish within 37us.
const COMMAND_DELAY: Duration = Duration::from_micros(50);
const CLEAR_DELAY: Duration = Duration::from_millis(2);

/// An HD44780 panel driven through an MCP23008 on the I2C bus.
///
/// The bus handle is held until [`LcdTransport::close`] or drop, whichever
/// comes first.
pub struct AdafruitLcd {
    i2c: Option<I2c>,
    columns: u8,
    rows: u8,
    backlight: bool,
}

impl AdafruitLcd {
    /// Open `/dev/i2c-{bus}`, configure the expander at `address` and
    /// initialize the panel.
    pub fn open(bus: u8, address: u16, columns: u8, rows: u8) -> Result<Self> {
        let mut i2c = I2c::with_bus(bus)?;
        i2c.set_slave_address(address)?;
        // every expander pin is an output
        i2c.smbus_write_byte(MCP23008_IODIR, 0x00)?;

        let mut lcd = Self {
            i2c: Some(i2c),
            columns,
            rows,
            backlight: true,
        };
        lcd.initialize()?;

        info!(
            "Opened {}x{} LCD on bus {} at address {:#04x}",
            columns, rows, bus, address
        );
        Ok(lcd)
    }

    /// Power-on reset into 4-bit mode, then clear the panel.
    fn initialize(&mut self) -> Result<()> {
        thread::sleep(Duration::from_millis(50));

        for _ in 0..3 {
            self.write_nibble(0x03, false)?;
            thread::sleep(Duration::from_micros(4500));
        }
        self.write_nibble(0x02, false)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.command(CMD_CLEAR)?;
        thread::sleep(CLEAR_DELAY);
        self.command(CMD_ENTRY_INCREMENT)
    }

    /// Latch four bits into the controller with an enable pulse.
    fn write_nibble(&mut self, nibble: u8, data: bool) -> Result<()> {
        let value = port_value(nibble, data, self.backlight);
        let i2c = self.bus()?;
        i2c.smbus_write_byte(MCP23008_GPIO, value)?;
        i2c.smbus_write_byte(MCP23008_GPIO, value | PIN_ENABLE)?;
        i2c.smbus_write_byte(MCP23008_GPIO, value)?;
        thread::sleep(COMMAND_DELAY);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8, data: bool) -> Result<()> {
        self.write_nibble(byte >> 4, data)?;
        self.write_nibble(byte & 0x0f, data)
    }

    fn command(&mut self, command: u8) -> Result<()> {
        self.write_byte(command, false)
    }

    fn set_cursor(&mut self, row: u8, column: u8) -> Result<()> {
        let offset = ROW_OFFSETS[usize::from(row) % ROW_OFFSETS.len()];
        self.command(CMD_SET_DDRAM_ADDR | offset.wrapping_add(column))
    }

    fn bus(&mut self) -> Result<&mut I2c> {
        self.i2c
            .as_mut()
            .ok_or_else(|| DisplayError::transport_error("LCD is closed"))
    }

    /// Blank the panel and turn every expander output off.
    fn shut_down(&mut self) -> Result<()> {
        for command in SHUTDOWN_COMMANDS {
            self.command(command)?;
        }
        thread::sleep(CLEAR_DELAY);
        self.backlight = false;
        self.bus()?
            .smbus_write_byte(MCP23008_GPIO, port_value(0, false, false))?;
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<()> {
        for c in text.chars() {
            // the character ROM only agrees with ASCII on the printable range
            let byte = if c.is_ascii() && !c.is_ascii_control() {
                c as u8
            } else {
                b'?'
            };
            self.write_byte(byte, true)?;
        }
        Ok(())
    }
}

impl LcdTransport for AdafruitLcd {
    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        self.set_backlight(true)?;

        let lines = fit_lines(lines, usize::from(self.columns), usize::from(self.rows));
        for (row, line) in lines.iter().enumerate() {
            self.set_cursor(row as u8, 0)?;
            self.print(line)?;
        }
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<()> {
        let value = port_value(0, false, on);
        self.bus()?.smbus_write_byte(MCP23008_GPIO, value)?;
        self.backlight = on;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.i2c.is_none() {
            return Ok(());
        }
        debug!("Closing LCD");
        let result = self.shut_down();
        // dropping the handle closes /dev/i2c-N
        self.i2c = None;
        result
    }
}

impl Drop for AdafruitLcd {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!("Failed to close LCD: {}", err);
        }
    }
}

/// Expander output byte for one nibble of a command or data transfer.
fn port_value(nibble: u8, data: bool, backlight: bool) -> u8 {
    let mut value = (nibble & 0x0f) << DATA_SHIFT;
    if data {
        value |= PIN_RS;
    }
    if backlight {
        value |= PIN_BACKLIGHT;
    }
    value
}
