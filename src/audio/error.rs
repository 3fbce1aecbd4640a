//! Audio engine errors.

use thiserror::Error;

/// Non-fatal audio failures. All of them leave the engine disabled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("Microphone access was denied. Please check permissions.")]
    PermissionDenied,

    #[error("Audio input device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to get audio devices: {0}")]
    EnumerationFailed(String),

    #[error("Invalid analyser config: {0}")]
    InvalidConfig(String),
}

impl From<cpal::DevicesError> for AudioError {
    fn from(err: cpal::DevicesError) -> Self {
        AudioError::EnumerationFailed(err.to_string())
    }
}

impl From<cpal::DefaultStreamConfigError> for AudioError {
    fn from(err: cpal::DefaultStreamConfigError) -> Self {
        AudioError::DeviceUnavailable(err.to_string())
    }
}

impl From<cpal::BuildStreamError> for AudioError {
    fn from(err: cpal::BuildStreamError) -> Self {
        match err {
            cpal::BuildStreamError::BackendSpecific { err } if is_permission(&err.description) => {
                AudioError::PermissionDenied
            }
            other => AudioError::DeviceUnavailable(other.to_string()),
        }
    }
}

impl From<cpal::PlayStreamError> for AudioError {
    fn from(err: cpal::PlayStreamError) -> Self {
        match err {
            cpal::PlayStreamError::BackendSpecific { err } if is_permission(&err.description) => {
                AudioError::PermissionDenied
            }
            other => AudioError::DeviceUnavailable(other.to_string()),
        }
    }
}

impl From<hound::Error> for AudioError {
    fn from(err: hound::Error) -> Self {
        AudioError::DeviceUnavailable(err.to_string())
    }
}

fn is_permission(description: &str) -> bool {
    let lower = description.to_lowercase();
    lower.contains("permission") || lower.contains("access denied") || lower.contains("not authorized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_permission_maps_to_denied() {
        let err = cpal::BuildStreamError::BackendSpecific {
            err: cpal::BackendSpecificError {
                description: "Permission denied (os error 13)".to_string(),
            },
        };
        assert_eq!(AudioError::from(err), AudioError::PermissionDenied);
    }

    #[test]
    fn test_missing_device_maps_to_unavailable() {
        let err = AudioError::from(cpal::BuildStreamError::DeviceNotAvailable);
        assert!(matches!(err, AudioError::DeviceUnavailable(_)));
    }
}
