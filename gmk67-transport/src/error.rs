//! Transport error types

use thiserror::Error;

/// Errors that can occur during transport operations
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Device disconnected")]
    Disconnected,

    #[error("Communication timeout")]
    Timeout,

    #[error("Device returned an empty feature report")]
    EmptyResponse,

    // HID-specific errors
    #[error("HID error: {0}")]
    HidError(String),

    #[error("HID permission denied: {0}")]
    HidPermissionDenied(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<hidapi::HidError> for TransportError {
    fn from(e: hidapi::HidError) -> Self {
        let msg = e.to_string();
        if msg.contains("Permission denied") || msg.contains("EPERM") {
            TransportError::HidPermissionDenied(msg)
        } else if msg.contains("No such device") || msg.contains("ENODEV") {
            TransportError::Disconnected
        } else {
            TransportError::HidError(msg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_errors_are_classified() {
        let err: TransportError = hidapi::HidError::HidApiError {
            message: "open failed: Permission denied".into(),
        }
        .into();
        assert!(matches!(err, TransportError::HidPermissionDenied(_)));
    }

    #[test]
    fn test_other_hid_errors_pass_through() {
        let err: TransportError = hidapi::HidError::HidApiError {
            message: "hid_error is not implemented yet".into(),
        }
        .into();
        assert!(matches!(err, TransportError::HidError(_)));
    }
}
