//! Audio analysis engine: capture lifecycle plus per-frame band levels.

use tracing::{debug, info, trace, warn};

use super::analyser::SpectrumAnalyser;
use super::bands::{average_frequency, raw_band_level, Band, BandLevels, SmoothingState};
use super::capture::{release, Capture, InputBackend, SystemBackend};
use super::device::InputDevice;
use super::AudioError;
use crate::params::AnalyserConfig;

/// Engine lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Disabled,
    Enabled,
}

/// One live capture session
struct AudioSession {
    device_id: String,
    capture: Capture,
    analyser: SpectrumAnalyser,
    smoothing: SmoothingState,
}

impl AudioSession {
    /// Re-analyse the newest captured window
    fn pull(&mut self) -> &[u8] {
        let ring = match self.capture.ring.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.analyser.analyse(&ring)
    }
}

/// Per-frame audio values consumed by the motion driver
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioFrame {
    pub levels: BandLevels,
    /// Unsmoothed mean of all bins (0 - 1)
    pub average: f32,
}

/// Audio analysis engine
///
/// Owns at most one [`AudioSession`]. All queries return zeros while disabled.
pub struct AudioEngine<B: InputBackend = SystemBackend> {
    backend: B,
    config: AnalyserConfig,
    devices: Vec<InputDevice>,
    selected_device: String,
    session: Option<AudioSession>,
    last_error: Option<AudioError>,
}

impl AudioEngine<SystemBackend> {
    pub fn new(config: AnalyserConfig) -> Self {
        Self::with_backend(SystemBackend, config)
    }
}

impl<B: InputBackend> AudioEngine<B> {
    pub fn with_backend(backend: B, config: AnalyserConfig) -> Self {
        Self {
            backend,
            config,
            devices: Vec::new(),
            selected_device: String::new(),
            session: None,
            last_error: None,
        }
    }

    pub fn state(&self) -> EngineState {
        if self.session.is_some() {
            EngineState::Enabled
        } else {
            EngineState::Disabled
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.session.is_some()
    }

    /// Most recent user-facing error, cleared by a successful enable
    pub fn last_error(&self) -> Option<&AudioError> {
        self.last_error.as_ref()
    }

    /// Enumerate input devices and cache them for selection
    ///
    /// Selects the first device when nothing is selected yet.
    pub fn list_input_devices(&mut self) -> Result<Vec<InputDevice>, AudioError> {
        match self.backend.list_devices() {
            Ok(devices) => {
                debug!("Found {} input device(s)", devices.len());
                if self.selected_device.is_empty() {
                    if let Some(first) = devices.first() {
                        self.selected_device = first.id.clone();
                    }
                }
                self.devices = devices.clone();
                Ok(devices)
            }
            Err(e) => {
                warn!("Error getting audio devices: {}", e);
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Devices from the last successful enumeration
    pub fn devices(&self) -> &[InputDevice] {
        &self.devices
    }

    pub fn selected_device(&self) -> &str {
        &self.selected_device
    }

    /// Select the device used by the next [`enable_selected`](Self::enable_selected)
    pub fn set_selected_device(&mut self, device_id: impl Into<String>) {
        self.selected_device = device_id.into();
        info!("Selected audio device '{}'", self.selected_device);
    }

    /// Device id of the live session, if any
    pub fn active_device(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.device_id.as_str())
    }

    /// Open `device_id` and start analysing it
    ///
    /// Enabling while already enabled is a no-op; no second capture is opened.
    pub fn enable(&mut self, device_id: &str) -> Result<(), AudioError> {
        if let Some(session) = &self.session {
            debug!(
                "Audio already enabled on '{}', ignoring enable('{}')",
                session.device_id, device_id
            );
            return Ok(());
        }

        if let Err(msg) = self.config.validate() {
            let err = AudioError::InvalidConfig(msg);
            self.last_error = Some(err.clone());
            return Err(err);
        }

        let capture = match self.backend.open(device_id, &self.config) {
            Ok(capture) => capture,
            Err(e) => {
                warn!("Error starting audio: {}", e);
                self.last_error = Some(e.clone());
                return Err(e);
            }
        };

        info!(
            "Audio enabled: {} @ {}Hz (fft {})",
            capture.label, capture.sample_rate, self.config.fft_size
        );

        self.session = Some(AudioSession {
            device_id: device_id.to_string(),
            capture,
            analyser: SpectrumAnalyser::new(self.config.clone()),
            smoothing: SmoothingState::default(),
        });
        self.last_error = None;
        Ok(())
    }

    /// Enable the currently selected device
    pub fn enable_selected(&mut self) -> Result<(), AudioError> {
        let device_id = self.selected_device.clone();
        self.enable(&device_id)
    }

    /// Release the session and reset levels. Idempotent.
    pub fn disable(&mut self) {
        if let Some(mut session) = self.session.take() {
            release(&mut session.capture);
            info!("Audio disabled ({})", session.capture.label);
        }
    }

    /// Flip between enabled and disabled; returns the new enabled flag
    pub fn toggle(&mut self) -> Result<bool, AudioError> {
        if self.is_enabled() {
            self.disable();
            Ok(false)
        } else {
            self.enable_selected().map(|_| true)
        }
    }

    /// Pull the latest byte spectrum (empty while disabled)
    pub fn get_frequency_snapshot(&mut self) -> &[u8] {
        match self.session.as_mut() {
            Some(session) => session.pull(),
            None => &[],
        }
    }

    /// Smoothed level of `band` from the current snapshot
    ///
    /// Does not re-pull; call [`get_frequency_snapshot`](Self::get_frequency_snapshot)
    /// once per frame first, or use [`band_levels`](Self::band_levels).
    pub fn get_band_level(&mut self, band: Band) -> f32 {
        let factor = self.config.level_smoothing;
        match self.session.as_mut() {
            Some(session) => {
                let raw = raw_band_level(session.analyser.bytes(), band, &self.config);
                session.smoothing.update(band, raw, factor)
            }
            None => 0.0,
        }
    }

    /// Pull one snapshot and advance all three bands from it
    pub fn band_levels(&mut self) -> BandLevels {
        if self.session.is_none() {
            return BandLevels::ZERO;
        }
        self.get_frequency_snapshot();
        let levels = BandLevels {
            bass: self.get_band_level(Band::Bass),
            mid: self.get_band_level(Band::Mid),
            treble: self.get_band_level(Band::Treble),
        };
        trace!(
            "bands bass={:.3} mid={:.3} treble={:.3}",
            levels.bass,
            levels.mid,
            levels.treble
        );
        levels
    }

    /// Unsmoothed mean of the current snapshot
    pub fn get_average_frequency(&self) -> f32 {
        self.session
            .as_ref()
            .map(|s| average_frequency(s.analyser.bytes()))
            .unwrap_or(0.0)
    }

    /// Smoothed levels as of the last query, without advancing them
    pub fn levels(&self) -> BandLevels {
        self.session
            .as_ref()
            .map(|s| s.smoothing.levels())
            .unwrap_or(BandLevels::ZERO)
    }

    /// Per-frame entry point: one snapshot, three bands, one average
    pub fn frame(&mut self) -> Option<AudioFrame> {
        if !self.is_enabled() {
            return None;
        }
        let levels = self.band_levels();
        Some(AudioFrame {
            levels,
            average: self.get_average_frequency(),
        })
    }
}

impl<B: InputBackend> Drop for AudioEngine<B> {
    fn drop(&mut self) {
        self.disable();
    }
}
