//! Audio capture and spectral analysis.
//!
//! Captures an input device (or a WAV file) into a sample ring, runs a
//! byte-magnitude FFT once per displayed frame and reduces it to three
//! smoothed band levels for audio-reactive motion.

mod analyser;
mod bands;
mod capture;
mod device;
mod engine;
mod error;
mod ring;

// Re-export public types
pub use analyser::{blackman_window, SpectrumAnalyser};
pub use bands::{average_frequency, raw_band_level, Band, BandLevels, SmoothingState};
pub use capture::{open_wav, read_wav_mono, Capture, CaptureStream, InputBackend, SharedRing, SystemBackend};
pub use device::{list_input_devices, InputDevice, FILE_DEVICE_PREFIX, FILE_ONCE_DEVICE_PREFIX};
pub use engine::{AudioEngine, AudioFrame, EngineState};
pub use error::AudioError;
pub use ring::SampleRing;
