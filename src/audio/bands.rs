//! Three-band reduction of a byte spectrum and per-band smoothing.

use std::ops::Range;

use crate::params::AnalyserConfig;

/// Frequency band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Bass,
    Mid,
    Treble,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Bass, Band::Mid, Band::Treble];

    /// Round-robin band assignment for primitive `index`
    pub fn for_index(index: usize) -> Band {
        Self::ALL[index % 3]
    }

    pub fn slot(self) -> usize {
        match self {
            Band::Bass => 0,
            Band::Mid => 1,
            Band::Treble => 2,
        }
    }

    /// Bin range of this band within `len` bins
    pub fn bins(self, config: &AnalyserConfig, len: usize) -> Range<usize> {
        match self {
            Band::Bass => config.bass_bins(len),
            Band::Mid => config.mid_bins(len),
            Band::Treble => config.treble_bins(len),
        }
    }
}

/// Band energy snapshot, each level in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BandLevels {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
}

impl BandLevels {
    pub const ZERO: BandLevels = BandLevels {
        bass: 0.0,
        mid: 0.0,
        treble: 0.0,
    };

    pub fn get(&self, band: Band) -> f32 {
        match band {
            Band::Bass => self.bass,
            Band::Mid => self.mid,
            Band::Treble => self.treble,
        }
    }

    /// Mean of the three bands
    pub fn overall(&self) -> f32 {
        (self.bass + self.mid + self.treble) / 3.0
    }
}

/// Exponentially smoothed band levels carried across queries within a session
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SmoothingState {
    levels: BandLevels,
}

impl SmoothingState {
    /// Fold one raw reading into `band` and return the smoothed value
    pub fn update(&mut self, band: Band, raw: f32, factor: f32) -> f32 {
        let slot = match band {
            Band::Bass => &mut self.levels.bass,
            Band::Mid => &mut self.levels.mid,
            Band::Treble => &mut self.levels.treble,
        };
        *slot = (*slot * factor + raw * (1.0 - factor)).clamp(0.0, 1.0);
        *slot
    }

    pub fn levels(&self) -> BandLevels {
        self.levels
    }

    pub fn reset(&mut self) {
        self.levels = BandLevels::ZERO;
    }
}

/// Unsmoothed band level: mean byte magnitude over the band's bins / 255
///
/// An empty slice (too few bins for the band) reads as silence.
pub fn raw_band_level(bins: &[u8], band: Band, config: &AnalyserConfig) -> f32 {
    mean_normalized(&bins[band.bins(config, bins.len())])
}

/// Unsmoothed mean over all bins / 255
pub fn average_frequency(bins: &[u8]) -> f32 {
    mean_normalized(bins)
}

fn mean_normalized(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f32 / bins.len() as f32 / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_scale_is_unity() {
        let config = AnalyserConfig::default();
        let bins = vec![255u8; 255];
        for band in Band::ALL {
            assert_eq!(raw_band_level(&bins, band, &config), 1.0);
        }
        assert_eq!(average_frequency(&bins), 1.0);
    }

    #[test]
    fn test_band_slices_read_their_own_bins() {
        let config = AnalyserConfig::default();
        // 100 bins: bass 0..10, mid 10..60, treble 60..100
        let mut bins = vec![0u8; 100];
        bins[..10].fill(255);
        assert_eq!(raw_band_level(&bins, Band::Bass, &config), 1.0);
        assert_eq!(raw_band_level(&bins, Band::Mid, &config), 0.0);
        assert_eq!(raw_band_level(&bins, Band::Treble, &config), 0.0);
        assert!((average_frequency(&bins) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_spectrum_has_no_nan() {
        let config = AnalyserConfig::default();
        let bins = [200u8; 3];
        assert_eq!(raw_band_level(&bins, Band::Bass, &config), 0.0);
        assert_eq!(raw_band_level(&[], Band::Treble, &config), 0.0);
        assert_eq!(average_frequency(&[]), 0.0);
    }

    #[test]
    fn test_round_robin_assignment() {
        assert_eq!(Band::for_index(0), Band::Bass);
        assert_eq!(Band::for_index(4), Band::Mid);
        assert_eq!(Band::for_index(8), Band::Treble);
    }

    #[test]
    fn test_smoothing_step() {
        let mut state = SmoothingState::default();
        let v = state.update(Band::Mid, 1.0, 0.7);
        assert!((v - 0.3).abs() < 1e-6);
        assert_eq!(state.levels().bass, 0.0);

        state.reset();
        assert_eq!(state.levels(), BandLevels::ZERO);
    }

    proptest! {
        #[test]
        fn prop_bands_partition_bins(len in 0usize..5000) {
            let config = AnalyserConfig::default();
            let bass = Band::Bass.bins(&config, len);
            let mid = Band::Mid.bins(&config, len);
            let treble = Band::Treble.bins(&config, len);

            prop_assert_eq!(bass.start, 0);
            prop_assert_eq!(bass.end, mid.start);
            prop_assert_eq!(mid.end, treble.start);
            prop_assert_eq!(treble.end, len);
            prop_assert_eq!(bass.len() + mid.len() + treble.len(), len);
        }

        #[test]
        fn prop_smoothing_converges_without_overshoot(raw in 0.0f32..=1.0, start in 0.0f32..=1.0) {
            let mut state = SmoothingState::default();
            state.update(Band::Bass, start, 0.0);

            let mut prev = state.levels().bass;
            for _ in 0..200 {
                let next = state.update(Band::Bass, raw, 0.7);
                // Moves monotonically toward raw, never past it
                if start <= raw {
                    prop_assert!(next >= prev - 1e-6 && next <= raw + 1e-6);
                } else {
                    prop_assert!(next <= prev + 1e-6 && next >= raw - 1e-6);
                }
                prev = next;
            }
            prop_assert!((prev - raw).abs() < 1e-4);
        }
    }
}
