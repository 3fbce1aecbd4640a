//! Reactive glow: the center glow and radial glow lines.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::ornament::Ornament;

/// Center glow spin speed (rad/s)
const CORE_SPIN: f32 = 0.1;
/// Core opacity while audio is disabled
const CORE_IDLE_OPACITY: f32 = 0.1;
/// Core opacity floor and gain while audio is enabled
const CORE_ACTIVE_OPACITY: (f32, f32) = (0.3, 0.2);

/// Points per glow line
const LINE_POINTS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlowCore {
    pub rotation_y: f32,
    pub opacity: f32,
}

/// Center glow for `time_s`; `average` is `None` while audio is disabled
pub fn glow_core(time_s: f32, average: Option<f32>) -> GlowCore {
    let opacity = match average {
        Some(avg) => CORE_ACTIVE_OPACITY.0 + avg.clamp(0.0, 1.0) * CORE_ACTIVE_OPACITY.1,
        None => CORE_IDLE_OPACITY,
    };
    GlowCore {
        rotation_y: time_s * CORE_SPIN,
        opacity,
    }
}

/// Radial lines from the center out to `length`, one band per line index
pub fn glow_lines(count: usize, length: f32, seed: u64) -> Vec<Ornament> {
    // Decorrelated from the aurora field under the same scene seed
    let mut rng = StdRng::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15);

    (0..count)
        .map(|index| {
            let angle = index as f32 / count as f32 * TAU;
            let dir = Vec3::new(angle.cos(), 0.0, angle.sin());
            let baseline = (0..LINE_POINTS)
                .map(|i| dir * (length * i as f32 / (LINE_POINTS - 1) as f32))
                .collect();
            let phase_offset = rng.gen_range(0.0..TAU);
            let hue = rng.gen_range(0.85..1.0);
            Ornament::new(index, baseline, phase_offset, hue, 0.3)
        })
        .collect()
}
