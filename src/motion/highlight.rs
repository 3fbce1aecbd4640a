//! Impulse highlight: fast rise on sudden level changes, geometric decay.

use crate::params::HighlightParams;

/// Carried-forward per-primitive state, owned by the scene layer
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimatedPrimitiveState {
    /// Level of the primitive's band on the previous frame
    pub last_observed_level: f32,
    /// Decaying impulse accumulator in [0, 1]
    pub highlight_energy: f32,
}

impl AnimatedPrimitiveState {
    /// Feed this frame's band level and return the updated highlight
    pub fn observe(&mut self, level: f32, params: &HighlightParams) -> f32 {
        let level = if level.is_finite() { level } else { 0.0 };
        let delta = (level - self.last_observed_level).abs();
        if delta > params.threshold {
            self.highlight_energy = (self.highlight_energy + delta * params.gain).min(1.0);
        }
        self.highlight_energy *= params.decay;
        self.last_observed_level = level;
        self.highlight_energy
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_impulse_decays_geometrically() {
        let params = HighlightParams::default();
        let mut state = AnimatedPrimitiveState::default();

        // delta = 0.5 on the first frame, then the level holds still
        let mut prev = state.observe(0.5, &params);
        assert!((prev - 0.95).abs() < 1e-6);

        for n in 2..=40 {
            let h = state.observe(0.5, &params);
            let expected = (0.5f32 * 2.0).min(1.0) * 0.95f32.powi(n);
            assert!((h - expected).abs() < 1e-5, "frame {}: {} vs {}", n, h, expected);
            assert!(h < prev);
            prev = h;
        }
    }

    #[test]
    fn test_small_changes_do_not_trigger() {
        let params = HighlightParams::default();
        let mut state = AnimatedPrimitiveState::default();

        for i in 0..20 {
            state.observe(i as f32 * 0.05, &params);
        }
        assert_eq!(state.highlight_energy, 0.0);
        assert!((state.last_observed_level - 0.95).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_highlight_never_exceeds_one(levels in prop::collection::vec(-5.0f32..5.0, 1..200)) {
            let params = HighlightParams::default();
            let mut state = AnimatedPrimitiveState::default();
            for level in levels {
                let h = state.observe(level, &params);
                prop_assert!((0.0..=1.0).contains(&h));
            }
        }

        #[test]
        fn prop_non_increasing_without_impulses(start in 0.0f32..=1.0, level in 0.0f32..=1.0) {
            let params = HighlightParams::default();
            let mut state = AnimatedPrimitiveState {
                last_observed_level: level,
                highlight_energy: start,
            };
            let mut prev = start;
            for _ in 0..50 {
                let h = state.observe(level, &params);
                prop_assert!(h <= prev);
                prev = h;
            }
        }
    }
}
