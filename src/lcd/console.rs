//! Text-mode stand-in for the LCD.

use crate::error::Result;
use crate::format::fit_lines;
use crate::lcd::LcdTransport;
use std::io::{self, Write};

/// Prints each page inside a frame the size of the display.
pub struct ConsoleTransport<W: Write> {
    out: W,
    columns: u8,
    rows: u8,
    backlight: bool,
}

impl ConsoleTransport<io::Stdout> {
    /// Console transport writing to stdout.
    pub fn stdout(columns: u8, rows: u8) -> Self {
        Self::new(io::stdout(), columns, rows)
    }
}

impl<W: Write> ConsoleTransport<W> {
    pub fn new(out: W, columns: u8, rows: u8) -> Self {
        Self {
            out,
            columns,
            rows,
            backlight: true,
        }
    }

    /// Whether the simulated backlight is on.
    pub fn backlight(&self) -> bool {
        self.backlight
    }

    /// Consume the transport and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn border(&self) -> String {
        format!("+{}+", "-".repeat(usize::from(self.columns)))
    }
}

impl<W: Write> LcdTransport for ConsoleTransport<W> {
    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        let mut lines = fit_lines(lines, usize::from(self.columns), usize::from(self.rows));
        // blank rows so the frame keeps the display's height
        lines.resize(usize::from(self.rows), " ".repeat(usize::from(self.columns)));

        let border = self.border();
        writeln!(self.out, "{}", border)?;
        for line in &lines {
            writeln!(self.out, "|{}|", line)?;
        }
        writeln!(self.out, "{}", border)?;
        self.out.flush()?;
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<()> {
        self.backlight = on;
        tracing::debug!("Backlight {}", if on { "on" } else { "off" });
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
