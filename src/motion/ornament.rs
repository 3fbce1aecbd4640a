//! Group ornaments (aurora streams, glow lines): audio remapping of an
//! immutable baseline polyline.

use std::f32::consts::PI;

use glam::Vec3;

use super::highlight::AnimatedPrimitiveState;
use crate::audio::{Band, BandLevels};
use crate::params::MotionConfig;

/// One animated polyline
///
/// `baseline` never changes after construction; `points` is rebuilt from it
/// in full every frame.
#[derive(Debug, Clone)]
pub struct Ornament {
    pub index: usize,
    /// Phase offset fixed at creation (radians)
    pub phase_offset: f32,
    /// Base hue (0 - 1)
    pub hue: f32,
    /// Hue drift rate
    pub color_shift: f32,
    baseline: Vec<Vec3>,
    points: Vec<Vec3>,
    state: AnimatedPrimitiveState,
}

/// Material values for one ornament this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnamentStyle {
    pub hue: f32,
    pub opacity: f32,
    pub highlight: f32,
}

impl Ornament {
    pub fn new(index: usize, baseline: Vec<Vec3>, phase_offset: f32, hue: f32, color_shift: f32) -> Self {
        let points = baseline.clone();
        Self {
            index,
            phase_offset,
            hue,
            color_shift,
            baseline,
            points,
            state: AnimatedPrimitiveState::default(),
        }
    }

    pub fn band(&self) -> Band {
        Band::for_index(self.index)
    }

    pub fn baseline(&self) -> &[Vec3] {
        &self.baseline
    }

    /// Display points as of the last update
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn state(&self) -> &AnimatedPrimitiveState {
        &self.state
    }

    /// Forget highlight history
    pub fn reset_state(&mut self) {
        self.state.reset();
    }

    /// Recompute display points and style for `time_s`
    ///
    /// `levels` is `None` while audio is disabled; the ornament then rests on
    /// its baseline at base opacity.
    pub fn update(
        &mut self,
        time_s: f32,
        levels: Option<&BandLevels>,
        intensity: f32,
        motion: &MotionConfig,
    ) -> OrnamentStyle {
        let map = &motion.ornament;
        let levels = levels.copied().unwrap_or(BandLevels::ZERO);
        let reactivity = if intensity.is_finite() {
            intensity.clamp(0.0, motion.mapping.max_intensity)
        } else {
            0.0
        };

        let overall = levels.overall().clamp(0.0, 1.0);
        let band_level = levels.get(self.band()).clamp(0.0, 1.0);

        let height_mul = 1.0 + band_level * reactivity * map.height_scale;
        let radius_mul = 1.0 + overall * reactivity * map.radius_scale;

        let count = self.baseline.len();
        for (i, (point, base)) in self.points.iter_mut().zip(&self.baseline).enumerate() {
            let s = i as f32 / count as f32;
            let wave = (time_s * map.wave_speed + self.phase_offset + s * PI).sin()
                * overall
                * map.wave_gain;

            *point = Vec3::new(
                base.x * radius_mul + wave * map.wave_axis[0],
                base.y * height_mul + wave * map.wave_axis[1],
                base.z * radius_mul + wave * map.wave_axis[2],
            );
        }

        let highlight = self.state.observe(band_level, &motion.highlight);

        OrnamentStyle {
            hue: (self.hue + time_s * self.color_shift * map.hue_drift).rem_euclid(1.0),
            opacity: map.base_opacity + overall * map.opacity_gain,
            highlight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::new(1.0 + i as f32, i as f32 * 0.5, -1.0)).collect()
    }

    #[test]
    fn test_idle_rests_on_baseline() {
        let motion = MotionConfig::default();
        let mut orn = Ornament::new(0, line(16), 0.4, 0.2, 0.5);

        let style = orn.update(3.0, None, 10.0, &motion);
        assert_eq!(orn.points(), orn.baseline());
        assert!((style.opacity - 0.4).abs() < 1e-6);
        assert_eq!(style.highlight, 0.0);
    }

    #[test]
    fn test_no_incremental_drift() {
        let motion = MotionConfig::default();
        let mut orn = Ornament::new(2, line(32), 1.1, 0.0, 0.0);
        let loud = BandLevels {
            bass: 0.9,
            mid: 0.6,
            treble: 0.7,
        };

        let mut first = Vec::new();
        for frame in 0..100 {
            orn.update(2.5, Some(&loud), 6.0, &motion);
            if frame == 0 {
                first = orn.points().to_vec();
            }
        }
        // Same inputs produce the same points no matter how many frames ran
        assert_eq!(orn.points(), &first[..]);
        assert_eq!(orn.baseline(), &line(32)[..]);
    }

    #[test]
    fn test_band_drives_height() {
        let motion = MotionConfig::default();
        // index 1 -> mid band
        let mut orn = Ornament::new(1, vec![Vec3::new(0.0, 2.0, 0.0)], 0.0, 0.0, 0.0);
        let mid_only = BandLevels {
            mid: 1.0,
            ..BandLevels::ZERO
        };

        // Pick a time where the wave term is zero: sin(t*2 + 0 + 0) = 0 at t = 0
        let style = orn.update(0.0, Some(&mid_only), 10.0, &motion);
        // height_mul = 1 + 1.0 * 10 * 0.3 = 4
        assert!((orn.points()[0].y - 8.0).abs() < 1e-5);
        // overall = 1/3 -> opacity 0.4 + 0.2
        assert!((style.opacity - 0.6).abs() < 1e-5);
        assert!(style.highlight > 0.0);
    }

    #[test]
    fn test_hue_wraps() {
        let motion = MotionConfig::default();
        let mut orn = Ornament::new(0, line(2), 0.0, 0.9, 1.0);
        let style = orn.update(2.0, None, 5.0, &motion);
        // 0.9 + 2.0 * 1.0 * 0.1 = 1.1 -> 0.1
        assert!((style.hue - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_reset_state_clears_highlight() {
        let motion = MotionConfig::default();
        let mut orn = Ornament::new(0, line(4), 0.0, 0.0, 0.0);
        let bass = BandLevels {
            bass: 0.8,
            ..BandLevels::ZERO
        };

        assert!(orn.update(0.0, Some(&bass), 5.0, &motion).highlight > 0.0);
        orn.reset_state();
        assert_eq!(*orn.state(), AnimatedPrimitiveState::default());
        assert_eq!(orn.update(0.1, None, 5.0, &motion).highlight, 0.0);
    }
}
