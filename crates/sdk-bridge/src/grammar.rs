//! Output grammars of the SDK tools
//!
//! Each tool's stdout is line oriented. These classifiers decide what kind
//! of line they are looking at; the parsers drive their state from that.
//! All patterns match the whole line.

use once_cell::sync::Lazy;
use regex::Regex;

static AVD_FIELD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([^\s]+):\s*(.*)$").unwrap());
static AVD_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^--+$").unwrap());
static PROPERTY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[(.*)\]:\s*\[(.*)\]$").unwrap());
static DEVICE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*)\s+(.*)$").unwrap());

/// First line printed by `adb devices`
pub const DEVICES_HEADER: &str = "List of devices attached";

/// Prefix of the adb server's startup notices, e.g.
/// `* daemon not running; starting now at tcp:5037`
pub const DAEMON_NOTICE: &str = "* daemon";

/// A line of `android list avd` output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvdLine<'a> {
    /// `key: value`
    Field { key: &'a str, value: &'a str },
    /// `--` or longer
    Separator,
    /// Anything else
    Other,
}

impl<'a> AvdLine<'a> {
    /// Classify one line of `android list avd` output
    pub fn classify(line: &'a str) -> Self {
        if let Some(caps) = AVD_FIELD.captures(line) {
            let key = caps.get(1).map_or("", |m| m.as_str());
            let value = caps.get(2).map_or("", |m| m.as_str());
            return AvdLine::Field { key, value };
        }
        if AVD_SEPARATOR.is_match(line) {
            return AvdLine::Separator;
        }
        AvdLine::Other
    }
}

/// Split a `[key]: [value]` line
pub fn property_line(line: &str) -> Option<(&str, &str)> {
    let caps = PROPERTY.captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// A line of `adb devices` output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceLine<'a> {
    Header,
    /// adb server status, printed when the server starts
    Daemon,
    Blank,
    /// `serial<whitespace>status`
    Device { serial: &'a str },
    Malformed,
}

impl<'a> DeviceLine<'a> {
    /// Classify one line of `adb devices` output
    pub fn classify(line: &'a str) -> Self {
        if line.starts_with(DEVICES_HEADER) {
            return DeviceLine::Header;
        }
        if line.starts_with(DAEMON_NOTICE) {
            return DeviceLine::Daemon;
        }
        if line.trim().is_empty() {
            return DeviceLine::Blank;
        }
        match DEVICE.captures(line) {
            Some(caps) => {
                let first = caps.get(1).map_or("", |m| m.as_str());
                match first.split_whitespace().next() {
                    Some(serial) => DeviceLine::Device { serial },
                    None => DeviceLine::Malformed,
                }
            }
            None => DeviceLine::Malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avd_field_lines() {
        assert_eq!(
            AvdLine::classify("    Name: Pixel_API_28"),
            AvdLine::Field { key: "Name", value: "Pixel_API_28" }
        );
        assert_eq!(
            AvdLine::classify("Tag/ABI: google_apis/x86"),
            AvdLine::Field { key: "Tag/ABI", value: "google_apis/x86" }
        );
        assert_eq!(
            AvdLine::classify("  Path: /Users/dev/.android/avd/Pixel.avd"),
            AvdLine::Field { key: "Path", value: "/Users/dev/.android/avd/Pixel.avd" }
        );
        assert_eq!(AvdLine::classify("Skin:"), AvdLine::Field { key: "Skin", value: "" });
    }

    #[test]
    fn test_avd_other_lines() {
        assert_eq!(AvdLine::classify("---------"), AvdLine::Separator);
        assert_eq!(AvdLine::classify("--"), AvdLine::Separator);
        assert_eq!(AvdLine::classify("-"), AvdLine::Other);
        assert_eq!(AvdLine::classify("Available Android Virtual Devices:"), AvdLine::Other);
        assert_eq!(AvdLine::classify("  Based on: Android 9.0 (Pie)"), AvdLine::Other);
        assert_eq!(AvdLine::classify(""), AvdLine::Other);
    }

    #[test]
    fn test_property_line() {
        assert_eq!(property_line("[ro.build.version]: [9]"), Some(("ro.build.version", "9")));
        assert_eq!(property_line("[empty]: []"), Some(("empty", "")));
        assert_eq!(property_line("[spaced]:[x]"), Some(("spaced", "x")));
        assert_eq!(property_line("garbage line"), None);
        assert_eq!(property_line("[ro.x]: [1] trailing"), None);
    }

    #[test]
    fn test_device_lines() {
        assert_eq!(DeviceLine::classify("List of devices attached"), DeviceLine::Header);
        assert_eq!(DeviceLine::classify(""), DeviceLine::Blank);
        assert_eq!(DeviceLine::classify("   "), DeviceLine::Blank);
        assert_eq!(
            DeviceLine::classify("emulator-5554\tdevice"),
            DeviceLine::Device { serial: "emulator-5554" }
        );
        assert_eq!(
            DeviceLine::classify("0123456789ABCDEF  unauthorized"),
            DeviceLine::Device { serial: "0123456789ABCDEF" }
        );
        assert_eq!(DeviceLine::classify("nospace"), DeviceLine::Malformed);
        assert_eq!(
            DeviceLine::classify("* daemon not running; starting now at tcp:5037"),
            DeviceLine::Daemon
        );
        assert_eq!(DeviceLine::classify("* daemon started successfully"), DeviceLine::Daemon);
    }
}
