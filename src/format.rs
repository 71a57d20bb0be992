//! Fixed-width text formatting for the character display.
//!
//! Every line pushed to the LCD has exactly as many characters as the display
//! has columns, so stale characters from a previous page are always
//! overwritten. Key/value lines reserve three characters for an upper-cased
//! label, one separator space and `width - 4` characters for the value.

use crate::metrics::data::LoadAverage;
use std::time::Duration;

/// Width of the label field in a key/value line.
pub const KEY_WIDTH: usize = 3;

const BYTE_UNIT: u64 = 1000;
const BYTE_SUFFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

/// Render `key` and `text` as a right-justified line of exactly `width` characters.
///
/// The key is upper-cased and clipped to three characters. The text is
/// trimmed of whitespace and control characters, then clipped to the value
/// field. Widths below 4 are rejected by [`DisplayConfig::validate`]; here they
/// collapse the value field to nothing.
///
/// [`DisplayConfig::validate`]: crate::config::DisplayConfig::validate
pub fn format_key_value(key: &str, text: &str, width: usize) -> String {
    let field = width.saturating_sub(KEY_WIDTH + 1);
    let key: String = key.to_uppercase().chars().take(KEY_WIDTH).collect();
    let value = clip(trim_value(text), field);

    format!("{key:>3} {value:>field$}")
}

/// Scale a byte count into a short human-readable string.
///
/// Values under 1000 are printed in bytes. Larger values are divided by 1000
/// and promoted to the next unit only while the quotient stays at or above
/// `threshold * 1000`, so a threshold above 1.0 keeps extra precision near
/// unit boundaries instead of flapping between suffixes.
pub fn format_bytes(bytes: u64, precision: usize, threshold: f64) -> String {
    if bytes < BYTE_UNIT {
        return format!("{:.precision$}B", bytes as f64);
    }

    let unit_threshold = (BYTE_UNIT as f64 * threshold) as u64;
    let mut divisor = BYTE_UNIT;
    let mut exp = 0;
    let mut quotient = bytes / BYTE_UNIT;

    while quotient >= unit_threshold && exp + 1 < BYTE_SUFFIXES.len() {
        divisor *= BYTE_UNIT;
        exp += 1;
        quotient /= BYTE_UNIT;
    }

    format!(
        "{:.precision$}{}",
        bytes as f64 / divisor as f64,
        BYTE_SUFFIXES[exp]
    )
}

/// `used/total pct%` for memory and swap pages.
pub fn format_utilization(used: u64, total: u64, used_percent: f64) -> String {
    format!(
        "{:>3}/{:>3} {:3.0}%",
        format_bytes(used, 0, 1.0),
        format_bytes(total, 0, 1.0),
        used_percent
    )
}

/// Compact uptime, e.g. `26h0m5s`, `1m5s`, `0s`.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let hours = secs / 3600;
    let minutes = secs % 3600 / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Busiest core percentage and hottest matching sensor.
pub fn format_cpu(max_core_percent: f32, max_temperature: f32) -> String {
    format!("{max_core_percent:6.2}% {max_temperature:3.0}C")
}

/// 1/5/15 minute load averages joined by `/`.
pub fn format_load(load: &LoadAverage) -> String {
    format!(
        "{:.1}/{:.1}/{:.1}",
        load.one_minute, load.five_minutes, load.fifteen_minutes
    )
}

/// Pad or clip a raw line to exactly `columns` characters, right-justified.
///
/// Applying it twice yields the same line.
pub fn fit_line(line: &str, columns: usize) -> String {
    let line = clip(line.trim_matches([' ', '\t']), columns);
    format!("{line:>columns$}")
}

/// Keep the first `rows` lines and fit each to `columns`.
pub fn fit_lines(lines: &[String], columns: usize, rows: usize) -> Vec<String> {
    lines
        .iter()
        .take(rows)
        .map(|line| fit_line(line, columns))
        .collect()
}

/// Collapse legacy ext filesystem names into `ext`.
pub fn normalize_fs_type(fs_type: &str) -> &str {
    match fs_type {
        "ext2/ext3" | "ext2" => "ext",
        other => other,
    }
}

/// `/dev/sda1` -> `sda1`.
pub fn short_device_name(device: &str) -> &str {
    device.strip_prefix("/dev/").unwrap_or(device)
}

fn trim_value(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c.is_control())
}

/// Keep at most `max` characters, dropping whitespace the cut exposed.
fn clip(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].trim_end(),
        None => text,
    }
}
