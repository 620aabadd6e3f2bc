//! Device discovery for GMK67 keyboards

use std::sync::Arc;

use hidapi::HidApi;
use tracing::{debug, info};

use crate::error::TransportError;
use crate::hid_wired::HidWiredTransport;
use crate::printer::{PrinterConfig, PrinterTransport};
use crate::protocol::device;
use crate::types::{DiscoveredDevice, TransportDeviceInfo};
use crate::Transport;

/// HID device discovery by VID/PID
pub struct HidDiscovery {
    /// Known VID/PID pairs to look for
    known_devices: Vec<(u16, u16)>,
    /// Optional printer config for monitoring mode - wraps transports automatically
    printer_config: Option<PrinterConfig>,
}

impl Default for HidDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl HidDiscovery {
    /// Create a discovery instance that looks for the stock GMK67 identifiers
    pub fn new() -> Self {
        Self {
            known_devices: vec![(device::VENDOR_ID, device::PRODUCT_ID)],
            printer_config: None,
        }
    }

    /// Create with printer config for monitoring mode
    /// All transports opened via open_device() will be wrapped with Printer
    pub fn with_printer_config(config: PrinterConfig) -> Self {
        Self {
            printer_config: Some(config),
            ..Self::new()
        }
    }

    /// Add a VID/PID pair to discover
    pub fn add_device(&mut self, vid: u16, pid: u16) {
        if !self.known_devices.contains(&(vid, pid)) {
            self.known_devices.push((vid, pid));
        }
    }

    /// Check if a device matches our known devices
    fn is_known_device(&self, vid: u16, pid: u16) -> bool {
        self.known_devices.contains(&(vid, pid))
    }

    /// Check if this is the vendor feature interface.
    ///
    /// Some hidapi backends (libusb) report usage page 0 for every
    /// interface; those are accepted and the open is left to decide.
    fn is_feature_interface(device_info: &hidapi::DeviceInfo) -> bool {
        let page = device_info.usage_page();
        page == 0 || (page == device::USAGE_PAGE && device_info.usage() == device::USAGE_FEATURE)
    }

    fn to_info(d: &hidapi::DeviceInfo) -> TransportDeviceInfo {
        TransportDeviceInfo {
            vid: d.vendor_id(),
            pid: d.product_id(),
            device_path: d.path().to_string_lossy().into_owned(),
            interface_number: d.interface_number(),
            serial: d.serial_number().map(str::to_owned),
            product_name: d.product_string().map(str::to_owned),
        }
    }

    /// List currently available devices
    pub fn list_devices(&self) -> Result<Vec<DiscoveredDevice>, TransportError> {
        let api = HidApi::new()?;
        let devices: Vec<DiscoveredDevice> = api
            .device_list()
            .filter(|d| self.is_known_device(d.vendor_id(), d.product_id()))
            .filter(|d| Self::is_feature_interface(d))
            .map(|d| DiscoveredDevice {
                info: Self::to_info(d),
            })
            .collect();
        debug!("Found {} matching HID interface(s)", devices.len());
        Ok(devices)
    }

    /// Open a specific device
    pub fn open_device(
        &self,
        device: &DiscoveredDevice,
    ) -> Result<Arc<dyn Transport>, TransportError> {
        let api = HidApi::new()?;
        let path = std::ffi::CString::new(device.info.device_path.clone())
            .map_err(|e| TransportError::Internal(e.to_string()))?;
        let hid = api.open_path(&path).map_err(|e| match TransportError::from(e) {
            TransportError::HidError(msg) => TransportError::DeviceNotFound(format!(
                "{} at {}: {msg}",
                device.info.id_string(),
                device.info.device_path
            )),
            other => other,
        })?;

        let transport: Arc<dyn Transport> =
            Arc::new(HidWiredTransport::new(hid, device.info.clone()));
        Ok(self.wrap(transport))
    }

    /// Open the first device matching `vid`/`pid`
    pub fn open(&self, vid: u16, pid: u16) -> Result<Arc<dyn Transport>, TransportError> {
        let api = HidApi::new()?;
        let found = api
            .device_list()
            .filter(|d| d.vendor_id() == vid && d.product_id() == pid)
            .find(|d| Self::is_feature_interface(d))
            .map(|d| DiscoveredDevice {
                info: Self::to_info(d),
            })
            .ok_or_else(|| {
                TransportError::DeviceNotFound(format!("no HID device {vid:04x}:{pid:04x}"))
            })?;

        info!("Opening {} ({})", found.info.id_string(), found.info.device_path);
        self.open_device(&found)
    }

    fn wrap(&self, transport: Arc<dyn Transport>) -> Arc<dyn Transport> {
        match &self.printer_config {
            Some(config) => PrinterTransport::wrap(transport, config.clone()),
            None => transport,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_device_deduplicates() {
        let mut discovery = HidDiscovery::new();
        discovery.add_device(device::VENDOR_ID, device::PRODUCT_ID);
        discovery.add_device(0x1234, 0x5678);
        assert_eq!(discovery.known_devices.len(), 2);
        assert!(discovery.is_known_device(0x1234, 0x5678));
        assert!(!discovery.is_known_device(0x1234, 0x0000));
    }
}
