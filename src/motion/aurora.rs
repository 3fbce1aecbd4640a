//! Aurora stream field: seeded spiral polylines around the flower.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::ornament::Ornament;
use crate::params::StreamFieldConfig;

/// Build the stream field. Identical seeds give identical streams.
pub fn generate_streams(config: &StreamFieldConfig, seed: u64) -> Vec<Ornament> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = config.points_per_stream.max(2);

    let streams: Vec<Ornament> = (0..config.count)
        .map(|index| {
            let start_angle = index as f32 / config.count as f32 * TAU;
            let phase_offset = rng.gen_range(0.0..TAU);
            let hue = rng.gen_range(0.0..1.0);
            let color_shift = rng.gen_range(0.2..1.0);
            // Per-stream height variation
            let lift = rng.gen_range(0.8..1.2);

            let baseline = (0..n)
                .map(|i| {
                    let s = i as f32 / (n - 1) as f32;
                    let angle = start_angle + s * config.turns * TAU;
                    let r = config.inner_radius + s * config.radial_spread;
                    Vec3::new(
                        angle.cos() * r,
                        (s - 0.5) * config.height * lift,
                        angle.sin() * r,
                    )
                })
                .collect();

            Ornament::new(index, baseline, phase_offset, hue, color_shift)
        })
        .collect();

    debug!(
        "Generated {} aurora streams x {} points (seed {})",
        streams.len(),
        n,
        seed
    );
    streams
}
