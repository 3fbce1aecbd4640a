//! Byte-magnitude spectrum analyser.
//!
//! Each call to [`SpectrumAnalyser::analyse`] windows the most recent
//! `fft_size` samples, runs the FFT, smooths magnitudes per bin over time and
//! maps them from decibels onto `0..=255`.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use tracing::debug;

use super::ring::SampleRing;
use crate::params::AnalyserConfig;

pub struct SpectrumAnalyser {
    fft: Arc<dyn Fft<f32>>,
    config: AnalyserConfig,
    window: Vec<f32>,
    samples: Vec<f32>,
    fft_buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    /// Time-smoothed linear magnitudes, one per bin
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

impl SpectrumAnalyser {
    pub fn new(config: AnalyserConfig) -> Self {
        let fft_size = config.fft_size;
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let scratch_len = fft.get_inplace_scratch_len();

        let window = (0..fft_size).map(|i| blackman_window(i, fft_size)).collect();
        let bins = config.bin_count();

        debug!(
            "Spectrum analyser: fft_size={}, bins={}, smoothing={}",
            fft_size, bins, config.smoothing_time_constant
        );

        Self {
            fft,
            window,
            samples: vec![0.0; fft_size],
            fft_buffer: vec![Complex::new(0.0, 0.0); fft_size],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            smoothed: vec![0.0; bins],
            bytes: vec![0; bins],
            config,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.bytes.len()
    }

    /// Latest byte spectrum without re-analysing
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Analyse the newest window held by `ring`
    pub fn analyse(&mut self, ring: &SampleRing) -> &[u8] {
        ring.copy_latest(&mut self.samples);
        self.analyse_window()
    }

    /// Analyse an explicit block of samples (zero-padded or truncated to `fft_size`)
    pub fn analyse_samples(&mut self, input: &[f32]) -> &[u8] {
        let n = self.samples.len();
        let take = input.len().min(n);
        self.samples[..n - take].fill(0.0);
        self.samples[n - take..].copy_from_slice(&input[input.len() - take..]);
        self.analyse_window()
    }

    fn analyse_window(&mut self) -> &[u8] {
        let n = self.config.fft_size;

        // Apply Blackman window
        for i in 0..n {
            self.fft_buffer[i] = Complex::new(self.samples[i] * self.window[i], 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.fft_buffer, &mut self.scratch);

        let tau = self.config.smoothing_time_constant;
        let min_db = self.config.min_decibels;
        let range_db = self.config.max_decibels - min_db;
        let norm = 1.0 / n as f32;

        for (k, byte) in self.bytes.iter_mut().enumerate() {
            let magnitude = self.fft_buffer[k].norm() * norm;
            let smoothed = tau * self.smoothed[k] + (1.0 - tau) * magnitude;
            // Non-finite input must not poison later frames
            self.smoothed[k] = if smoothed.is_finite() { smoothed } else { 0.0 };

            let db = linear_to_db(self.smoothed[k]);
            let scaled = 255.0 * (db - min_db) / range_db;
            *byte = scaled.clamp(0.0, 255.0) as u8;
        }

        &self.bytes
    }

    /// Forget temporal smoothing history
    pub fn reset(&mut self) {
        self.smoothed.fill(0.0);
        self.bytes.fill(0);
    }
}

/// Blackman window coefficient (a0 = 0.42, a1 = 0.5, a2 = 0.08)
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}

fn linear_to_db(value: f32) -> f32 {
    if value <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * value.log10()
    }
}
