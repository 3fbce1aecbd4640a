//! Input device enumeration.

use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};
use tracing::warn;

use super::AudioError;

/// Device id prefix selecting the WAV file source instead of a live device
pub const FILE_DEVICE_PREFIX: &str = "file:";

/// Like [`FILE_DEVICE_PREFIX`], but the file plays once and then stays silent
pub const FILE_ONCE_DEVICE_PREFIX: &str = "file-once:";

/// A selectable audio input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputDevice {
    pub id: String,
    pub label: String,
}

impl InputDevice {
    /// Build a device entry, synthesizing a label when the platform gives none
    pub fn new(id: impl Into<String>, label: Option<String>) -> Self {
        let id = id.into();
        let label = match label {
            Some(l) if !l.trim().is_empty() => l,
            _ => format!("Microphone {}", id.chars().take(5).collect::<String>()),
        };
        Self { id, label }
    }
}

/// List the live input devices of the default host
pub fn list_input_devices() -> Result<Vec<InputDevice>, AudioError> {
    let host = cpal::default_host();
    let devices = host.input_devices()?;

    let mut out = Vec::new();
    for (index, device) in devices.enumerate() {
        match device.name() {
            Ok(name) => out.push(InputDevice::new(name.clone(), Some(name))),
            Err(e) => {
                // Unnamed devices cannot be reselected by id, so skip them
                warn!("Skipping input device #{}: {}", index, e);
            }
        }
    }
    Ok(out)
}

/// Resolve a device id to a live device; empty id selects the host default
pub fn find_input_device(host: &Host, device_id: &str) -> Result<Device, AudioError> {
    if device_id.is_empty() {
        return host
            .default_input_device()
            .ok_or_else(|| AudioError::DeviceUnavailable("no default input device".to_string()));
    }

    let devices = host.input_devices().map_err(lookup_error)?;
    for device in devices {
        if device.name().map(|n| n == device_id).unwrap_or(false) {
            return Ok(device);
        }
    }
    Err(AudioError::DeviceUnavailable(format!(
        "no input device named '{}'",
        device_id
    )))
}

/// Enumeration failing while opening a device means the device cannot be reached
fn lookup_error(err: cpal::DevicesError) -> AudioError {
    AudioError::DeviceUnavailable(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_fallback() {
        let dev = InputDevice::new("abcdef123", None);
        assert_eq!(dev.label, "Microphone abcde");

        let blank = InputDevice::new("xy", Some("   ".to_string()));
        assert_eq!(blank.label, "Microphone xy");

        let named = InputDevice::new("hw:1", Some("USB Mic".to_string()));
        assert_eq!(named.label, "USB Mic");
    }

    #[test]
    fn test_lookup_failure_is_unavailable() {
        let err = cpal::DevicesError::BackendSpecific {
            err: cpal::BackendSpecificError {
                description: "host went away".to_string(),
            },
        };
        assert!(matches!(lookup_error(err), AudioError::DeviceUnavailable(_)));
    }
}
