//! Per-petal pose: sway, breathing and positional warp scaled by the audio multiplier.

use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use super::highlight::AnimatedPrimitiveState;
use super::reactive::Reactivity;
use crate::audio::Band;
use crate::params::MotionConfig;

/// Static identity of one petal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Petal {
    pub index: usize,
    pub total_count: usize,
    /// Rest angle around the flower center (radians)
    pub angle: f32,
    /// Distance of the petal root from the center (scene units)
    pub radius: f32,
}

impl Petal {
    /// Evenly spaced petals around a ring
    pub fn ring(count: usize, radius: f32) -> Vec<Petal> {
        (0..count)
            .map(|index| Petal {
                index,
                total_count: count,
                angle: index as f32 * TAU / count as f32,
                radius,
            })
            .collect()
    }

    /// Fixed round-robin band
    pub fn band(&self) -> Band {
        Band::for_index(self.index)
    }

    /// Phase offset from the petal's position in the ring
    pub fn phase(&self) -> f32 {
        self.index as f32 / self.total_count.max(1) as f32 * TAU
    }
}

/// This frame's transform and highlight for one petal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PetalPose {
    pub rotation_z: f32,
    pub scale: f32,
    pub position: Vec3,
    pub highlight: f32,
}

impl PetalPose {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_z(self.rotation_z),
            self.position,
        )
    }

    /// GPU instance record relative to a parent (flower) transform
    pub fn to_instance(&self, parent: Mat4) -> PetalInstance {
        PetalInstance {
            model: (parent * self.model_matrix()).to_cols_array_2d(),
            highlight: self.highlight,
            _padding: [0.0; 3],
        }
    }
}

/// Instance buffer layout for petal rendering (model matrix + highlight)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct PetalInstance {
    pub model: [[f32; 4]; 4],
    pub highlight: f32,
    pub _padding: [f32; 3],
}

/// Compute a petal's pose for `time_s` and advance its highlight state
pub fn petal_pose(
    time_s: f32,
    petal: &Petal,
    reactivity: &Reactivity,
    motion: &MotionConfig,
    state: &mut AnimatedPrimitiveState,
) -> PetalPose {
    let p = &motion.petal;
    let band = petal.band();
    let m = reactivity.multiplier(band);
    let offset = petal.phase();
    let t = time_s;

    // Sway: speed and amplitude both follow the multiplier; treble adds a twist
    let treble_twist =
        reactivity.level(Band::Treble) * reactivity.base_intensity * motion.mapping.treble_twist;
    let rotation_z =
        petal.angle + (t * p.wave_speed * m + offset).sin() * p.wave_amplitude * m + treble_twist;

    // Breathing
    let scale = 1.0 + (t * p.breathing_speed + offset * 0.5).sin() * p.breathing_amplitude * m;

    // Position warp (z drift is audio independent)
    let x = petal.angle.sin() * petal.radius + (t * p.warp_x.0 + offset).sin() * p.warp_x.1 * m;
    let y = petal.angle.cos() * petal.radius + (t * p.warp_y.0 + offset).cos() * p.warp_y.1 * m;
    let z = (t * p.drift_z.0 + offset).sin() * p.drift_z.1;

    let highlight = state.observe(reactivity.level(band), &motion.highlight);

    PetalPose {
        rotation_z,
        scale,
        position: Vec3::new(x, y, z),
        highlight,
    }
}
