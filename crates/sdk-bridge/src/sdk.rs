//! Android SDK Service
//!
//! Runs the SDK's command-line tools and returns their output as
//! structured values.

use std::path::Path;

use tracing::{debug, info, warn};

use andmore_core::SharedConsole;

use crate::avd::{AvdListParser, AvdRecord};
use crate::device::{DeviceListParser, DeviceSerial};
use crate::error::SdkError;
use crate::location::SdkLocation;
use crate::parser::LastLineCollector;
use crate::process::{ConsoleForwarder, ToolCommand, ToolRun};
use crate::props::{PropertyMap, PropertyParser};

/// Adapter over the `android` and `adb` command-line tools
#[derive(Debug, Clone)]
pub struct AndroidSdk {
    location: SdkLocation,
}

impl AndroidSdk {
    /// Create an adapter for the SDK at `location`
    pub fn new(location: SdkLocation) -> Self {
        Self { location }
    }

    /// SDK this adapter runs tools from
    pub fn location(&self) -> &SdkLocation {
        &self.location
    }

    fn android(&self) -> ToolCommand {
        ToolCommand::new(self.location.android_path())
    }

    fn adb(&self) -> ToolCommand {
        ToolCommand::new(self.location.adb_path())
    }

    /// List the configured virtual devices (`android list avd`)
    pub async fn list_avds(&self, console: &SharedConsole) -> Result<Vec<AvdRecord>, SdkError> {
        let avds = self
            .android()
            .args(["list", "avd"])
            .run(AvdListParser::new(), console)
            .await?
            .checked()?;

        debug!("found {} AVDs", avds.len());
        Ok(avds)
    }

    /// Install (or reinstall) an APK (`adb install -r`)
    pub async fn install_apk(&self, apk_path: &Path, console: &SharedConsole) -> Result<(), SdkError> {
        info!("Installing {}", apk_path.display());

        self.adb()
            .args(["install", "-r"])
            .arg(apk_path)
            .run(ConsoleForwarder::new(console.clone()), console)
            .await?
            .checked()
    }

    /// Launch an activity (`adb shell am start -n package/activity`)
    pub async fn start_app(
        &self,
        package_id: &str,
        activity_id: &str,
        console: &SharedConsole,
    ) -> Result<(), SdkError> {
        info!("Starting {}/{}", package_id, activity_id);

        self.adb()
            .args(["shell", "am", "start", "-n"])
            .arg(format!("{}/{}", package_id, activity_id))
            .run(ConsoleForwarder::new(console.clone()), console)
            .await?
            .checked()
    }

    /// All system properties of a device (`adb -s serial shell getprop`)
    pub async fn get_properties(&self, serial: &str) -> Result<PropertyMap, SdkError> {
        self.adb()
            .args(["-s", serial, "shell", "getprop"])
            .run_merged(PropertyParser::new())
            .await?
            .checked()
    }

    /// One system property of a device (`adb -s serial shell getprop key`).
    ///
    /// The tool may print warnings before the value, so the last line wins.
    pub async fn get_property(&self, serial: &str, key: &str) -> Result<Option<String>, SdkError> {
        let run = self
            .adb()
            .args(["-s", serial, "shell", "getprop", key])
            .run_merged(LastLineCollector::new())
            .await?;

        property_value(run, serial, key)
    }

    /// Serials of attached devices and running emulators (`adb devices`)
    pub async fn list_devices(&self) -> Result<Vec<DeviceSerial>, SdkError> {
        let devices = self
            .adb()
            .arg("devices")
            .run_merged(DeviceListParser::new())
            .await?
            .checked()?;

        debug!("found {} devices", devices.len());
        Ok(devices)
    }
}

/// Value of a finished `getprop <key>` run.
///
/// A failed wait still yields the value read so far.
fn property_value(run: ToolRun<Option<String>>, serial: &str, key: &str) -> Result<Option<String>, SdkError> {
    match run.status {
        Ok(status) if status.success() => Ok(run.output),
        Ok(status) => Err(SdkError::exit(status, run.last_line)),
        Err(e) => {
            warn!("waiting for getprop {} on {}: {}", key, serial, e);
            Ok(run.output)
        }
    }
}
