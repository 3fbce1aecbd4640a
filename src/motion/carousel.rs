//! Carousel placement of several flowers orbiting the scene center.

use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};

use crate::params::SceneConfig;

/// Bobbing speed of each flower (rad/s)
const BOB_SPEED: f32 = 1.5;

/// Flower group transform for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowerPlacement {
    pub position: Vec3,
    pub rotation_y: f32,
}

impl FlowerPlacement {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(Quat::from_rotation_y(self.rotation_y), self.position)
    }
}

/// Orbit position, vertical bob and optional spin for flower `index` of `total`
pub fn carousel_placement(
    time_s: f32,
    index: usize,
    total: usize,
    config: &SceneConfig,
) -> FlowerPlacement {
    let base_angle = index as f32 / total.max(1) as f32 * TAU;
    let orbit_angle = base_angle + time_s * config.carousel_speed;

    let x = orbit_angle.cos() * config.orbit_radius;
    let z = orbit_angle.sin() * config.orbit_radius;
    let y = (time_s * BOB_SPEED + base_angle).sin() * config.vertical_oscillation;

    let rotation_y = if config.auto_rotate {
        time_s * config.rotation_speed * 0.1
    } else {
        0.0
    };

    FlowerPlacement {
        position: Vec3::new(x, y, z),
        rotation_y,
    }
}
