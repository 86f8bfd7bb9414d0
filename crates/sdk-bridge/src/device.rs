//! Attached Devices
//!
//! Parses `adb devices`, which lists one `serial<TAB>state` pair per line
//! under a fixed header.

use crate::error::SdkError;
use crate::grammar::DeviceLine;
use crate::parser::LineParser;

/// Serial of an attached device or running emulator
pub type DeviceSerial = String;

/// Parser for `adb devices`
#[derive(Debug, Default)]
pub struct DeviceListParser {
    devices: Vec<DeviceSerial>,
}

impl DeviceListParser {
    /// Create an empty parser
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineParser for DeviceListParser {
    type Output = Vec<DeviceSerial>;

    fn feed(&mut self, line: &str) -> Result<(), SdkError> {
        match DeviceLine::classify(line) {
            DeviceLine::Header | DeviceLine::Daemon | DeviceLine::Blank => Ok(()),
            DeviceLine::Device { serial } => {
                self.devices.push(serial.to_string());
                Ok(())
            }
            DeviceLine::Malformed => Err(SdkError::UnexpectedOutput(line.to_string())),
        }
    }

    fn finish(self) -> Self::Output {
        self.devices
    }
}

/// Whether a serial names an emulator rather than a physical device
pub fn is_emulator(serial: &str) -> bool {
    serial.starts_with("emulator-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_emulator() {
        let devices = DeviceListParser::new()
            .parse_all("List of devices attached\nemulator-5554\tdevice\n\n")
            .unwrap();
        assert_eq!(devices, vec!["emulator-5554".to_string()]);
        assert!(is_emulator(&devices[0]));
    }

    #[test]
    fn test_multiple_devices_in_order() {
        let devices = DeviceListParser::new()
            .parse_all("List of devices attached\n\nHT4CJJT00123\tunauthorized\n\nemulator-5556\toffline\n")
            .unwrap();
        assert_eq!(devices, vec!["HT4CJJT00123".to_string(), "emulator-5556".to_string()]);
        assert!(!is_emulator(&devices[0]));
    }

    #[test]
    fn test_no_devices() {
        let devices = DeviceListParser::new()
            .parse_all("List of devices attached\n\n")
            .unwrap();
        assert!(devices.is_empty());
    }

    #[test]
    fn test_daemon_startup_notices_ignored() {
        let devices = DeviceListParser::new()
            .parse_all(
                "* daemon not running; starting now at tcp:5037\n\
                 * daemon started successfully\n\
                 List of devices attached\nemulator-5554\tdevice\n",
            )
            .unwrap();
        assert_eq!(devices, vec!["emulator-5554".to_string()]);
    }

    #[test]
    fn test_malformed_line_fails() {
        let err = DeviceListParser::new()
            .parse_all("List of devices attached\nbroken\n")
            .unwrap_err();
        assert!(matches!(err, SdkError::UnexpectedOutput(ref line) if line == "broken"));
    }
}
