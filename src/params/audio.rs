//! Audio analysis configuration and constants.

use std::ops::Range;

/// Spectrum analyser configuration with fractional band mappings
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// FFT window size in samples (must be power of 2)
    /// Produces `fft_size / 2` frequency bins
    pub fft_size: usize,

    /// Per-bin temporal smoothing inside the transform (0.0 - 1.0)
    /// Higher values hold peaks longer
    pub smoothing_time_constant: f32,

    /// Level mapped to byte value 0 (dBFS)
    pub min_decibels: f32,

    /// Level mapped to byte value 255 (dBFS)
    pub max_decibels: f32,

    /// Fraction of bins where bass ends and mid begins
    pub bass_end_fraction: f32,

    /// Fraction of bins where mid ends and treble begins
    pub mid_end_fraction: f32,

    /// Weight kept from the previous band level on each query
    /// Formula: smoothed = smoothed * factor + raw * (1 - factor)
    pub level_smoothing: f32,

    /// Ring buffer capacity for captured samples (seconds of audio at 48 kHz)
    pub ring_seconds: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            smoothing_time_constant: 0.9,
            min_decibels: -100.0,
            max_decibels: -30.0,
            bass_end_fraction: 0.1,
            mid_end_fraction: 0.6,
            level_smoothing: 0.7,
            ring_seconds: 0.5,
        }
    }
}

impl AnalyserConfig {
    /// Number of frequency bins the analyser produces
    pub fn bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Bin range for the bass band given `len` bins
    pub fn bass_bins(&self, len: usize) -> Range<usize> {
        0..fraction_index(len, self.bass_end_fraction)
    }

    /// Bin range for the mid band given `len` bins
    pub fn mid_bins(&self, len: usize) -> Range<usize> {
        fraction_index(len, self.bass_end_fraction)..fraction_index(len, self.mid_end_fraction)
    }

    /// Bin range for the treble band given `len` bins
    pub fn treble_bins(&self, len: usize) -> Range<usize> {
        fraction_index(len, self.mid_end_fraction)..len
    }

    /// Ring buffer capacity in samples, never smaller than two FFT windows
    pub fn ring_capacity(&self, sample_rate: u32) -> usize {
        let secs = (sample_rate as f32 * self.ring_seconds) as usize;
        secs.max(self.fft_size * 2)
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 32 {
            return Err(format!(
                "FFT size must be a power of 2 >= 32, got {}",
                self.fft_size
            ));
        }
        if !(0.0..1.0).contains(&self.smoothing_time_constant) {
            return Err(format!(
                "Smoothing time constant must be in [0, 1), got {}",
                self.smoothing_time_constant
            ));
        }
        if self.min_decibels >= self.max_decibels {
            return Err(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            ));
        }
        if !(0.0 < self.bass_end_fraction
            && self.bass_end_fraction < self.mid_end_fraction
            && self.mid_end_fraction < 1.0)
        {
            return Err(format!(
                "Band fractions must satisfy 0 < bass ({}) < mid ({}) < 1",
                self.bass_end_fraction, self.mid_end_fraction
            ));
        }
        if !(0.0..1.0).contains(&self.level_smoothing) {
            return Err(format!(
                "Level smoothing must be in [0, 1), got {}",
                self.level_smoothing
            ));
        }
        Ok(())
    }
}

fn fraction_index(len: usize, fraction: f32) -> usize {
    ((len as f32 * fraction).floor() as usize).min(len)
}
