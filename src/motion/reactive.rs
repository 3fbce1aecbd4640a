//! Band level to audio multiplier mapping.

use crate::audio::{Band, BandLevels};
use crate::params::ReactiveMapping;

/// Clamped user intensity scaled into multiplier space
pub fn base_intensity(intensity: f32, mapping: &ReactiveMapping) -> f32 {
    let clamped = if intensity.is_finite() {
        intensity.clamp(0.0, mapping.max_intensity)
    } else {
        0.0
    };
    clamped * mapping.intensity_scale
}

/// `1 + level * base_intensity * weight(band)`, with level clamped to [0, 1]
pub fn audio_multiplier(level: f32, intensity: f32, band: Band, mapping: &ReactiveMapping) -> f32 {
    let level = if level.is_finite() { level.clamp(0.0, 1.0) } else { 0.0 };
    1.0 + level * base_intensity(intensity, mapping) * mapping.band_weights[band.slot()]
}

/// Per-frame reactive inputs shared by every primitive
#[derive(Debug, Clone, Copy)]
pub struct Reactivity {
    pub levels: BandLevels,
    pub base_intensity: f32,
    multipliers: [f32; 3],
}

impl Reactivity {
    /// Resolve multipliers for this frame; `None` levels means audio is off
    pub fn new(levels: Option<BandLevels>, intensity: f32, mapping: &ReactiveMapping) -> Self {
        let levels = levels.unwrap_or(BandLevels::ZERO);
        let multipliers =
            Band::ALL.map(|band| audio_multiplier(levels.get(band), intensity, band, mapping));
        Self {
            levels,
            base_intensity: base_intensity(intensity, mapping),
            multipliers,
        }
    }

    /// Non-reactive frame: every multiplier is exactly 1
    pub fn idle() -> Self {
        Self {
            levels: BandLevels::ZERO,
            base_intensity: 0.0,
            multipliers: [1.0; 3],
        }
    }

    pub fn multiplier(&self, band: Band) -> f32 {
        self.multipliers[band.slot()]
    }

    pub fn level(&self, band: Band) -> f32 {
        self.levels.get(band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_weights_favor_bass() {
        let mapping = ReactiveMapping::default();
        let bass = audio_multiplier(1.0, 10.0, Band::Bass, &mapping);
        let mid = audio_multiplier(1.0, 10.0, Band::Mid, &mapping);
        let treble = audio_multiplier(1.0, 10.0, Band::Treble, &mapping);

        assert!((bass - 4.6).abs() < 1e-5);
        assert!((mid - 4.0).abs() < 1e-5);
        assert!((treble - 4.3).abs() < 1e-5);
    }

    #[test]
    fn test_intensity_is_clamped() {
        let mapping = ReactiveMapping::default();
        assert_eq!(base_intensity(25.0, &mapping), base_intensity(10.0, &mapping));
        assert_eq!(base_intensity(-3.0, &mapping), 0.0);
        assert_eq!(base_intensity(f32::NAN, &mapping), 0.0);
    }

    #[test]
    fn test_idle_matches_silent_reactivity() {
        let mapping = ReactiveMapping::default();
        let silent = Reactivity::new(None, 7.0, &mapping);
        for band in Band::ALL {
            assert_eq!(silent.multiplier(band), 1.0);
            assert_eq!(Reactivity::idle().multiplier(band), 1.0);
        }
    }

    proptest! {
        #[test]
        fn prop_zero_level_is_unity(intensity in -5.0f32..20.0) {
            let mapping = ReactiveMapping::default();
            for band in Band::ALL {
                prop_assert_eq!(audio_multiplier(0.0, intensity, band, &mapping), 1.0);
            }
        }

        #[test]
        fn prop_multiplier_bounded(level in 0.0f32..=1.0, intensity in 0.0f32..=10.0) {
            let mapping = ReactiveMapping::default();
            for band in Band::ALL {
                let m = audio_multiplier(level, intensity, band, &mapping);
                prop_assert!(m >= 1.0);
                prop_assert!(m <= 1.0 + 3.0 * 1.2 + 1e-5);
            }
        }

        #[test]
        fn prop_multiplier_monotone(
            a in 0.0f32..=1.0,
            b in 0.0f32..=1.0,
            i in 0.0f32..=10.0,
            j in 0.0f32..=10.0,
        ) {
            let mapping = ReactiveMapping::default();
            let (lo_l, hi_l) = if a <= b { (a, b) } else { (b, a) };
            let (lo_i, hi_i) = if i <= j { (i, j) } else { (j, i) };
            for band in Band::ALL {
                let base = audio_multiplier(lo_l, lo_i, band, &mapping);
                prop_assert!(audio_multiplier(hi_l, lo_i, band, &mapping) >= base);
                prop_assert!(audio_multiplier(lo_l, hi_i, band, &mapping) >= base);
            }
        }
    }
}
