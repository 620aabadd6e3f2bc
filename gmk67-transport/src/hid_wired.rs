//! HID wired transport implementation for direct USB connection

use hidapi::HidDevice;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::error::TransportError;
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// HID transport for wired USB connection
///
/// Owns the feature-report handle. The handle is released when the
/// transport is dropped, on every exit path.
pub struct HidWiredTransport {
    /// Feature interface for commands
    feature_device: Mutex<HidDevice>,
    /// Device information
    info: TransportDeviceInfo,
}

impl HidWiredTransport {
    /// Create a new wired transport from an opened HID device
    pub fn new(feature_device: HidDevice, info: TransportDeviceInfo) -> Self {
        info!("Opened {} at {}", info.id_string(), info.device_path);
        Self {
            feature_device: Mutex::new(feature_device),
            info,
        }
    }
}

impl Transport for HidWiredTransport {
    fn send_feature_report(&self, report: &[u8]) -> Result<(), TransportError> {
        let device = self.feature_device.lock();
        device.send_feature_report(report)?;
        Ok(())
    }

    fn get_feature_report(&self, report_id: u8, len: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = feature_buffer(report_id, len)?;
        let device = self.feature_device.lock();
        let read = device.get_feature_report(&mut buf)?;
        if read == 0 {
            return Err(TransportError::EmptyResponse);
        }
        buf.truncate(read);
        Ok(buf)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    fn close(&self) -> Result<(), TransportError> {
        // HidDevice is released on drop
        Ok(())
    }
}

impl Drop for HidWiredTransport {
    fn drop(&mut self) {
        debug!("HidWiredTransport dropped, releasing {}", self.info.id_string());
        info!("Closed connection to {}", self.info.id_string());
    }
}

/// Zeroed read buffer with the report ID in byte 0
fn feature_buffer(report_id: u8, len: usize) -> Result<Vec<u8>, TransportError> {
    if len == 0 {
        return Err(TransportError::Internal(
            "feature report length must include the report ID byte".into(),
        ));
    }
    let mut buf = vec![0u8; len];
    buf[0] = report_id;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_buffer_carries_report_id() {
        let buf = feature_buffer(0x06, 65).unwrap();
        assert_eq!(buf.len(), 65);
        assert_eq!(buf[0], 0x06);
        assert!(buf[1..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zero_length_read_is_rejected() {
        assert!(matches!(
            feature_buffer(0x06, 0),
            Err(TransportError::Internal(_))
        ));
    }
}
