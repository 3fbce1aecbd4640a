//! Motion parameters for petals and ornaments.
//!
//! Frequencies are angular speeds (radians per second) applied as `sin(t * speed)`.
//! Amplitudes are in scene units unless noted.

/// Baseline petal animation (the idle, non-reactive motion)
#[derive(Debug, Clone)]
pub struct PetalMotion {
    /// Sway speed of the petal rotation (rad/s)
    pub wave_speed: f32,

    /// Sway amplitude of the petal rotation (radians)
    pub wave_amplitude: f32,

    /// Breathing (uniform scale) speed (rad/s)
    pub breathing_speed: f32,

    /// Breathing amplitude (fraction of unit scale)
    pub breathing_amplitude: f32,

    /// Position warp along X: (speed rad/s, amplitude)
    pub warp_x: (f32, f32),

    /// Position warp along Y: (speed rad/s, amplitude)
    pub warp_y: (f32, f32),

    /// Audio-independent drift along Z: (speed rad/s, amplitude)
    pub drift_z: (f32, f32),
}

impl Default for PetalMotion {
    fn default() -> Self {
        Self {
            wave_speed: 0.8,
            wave_amplitude: 0.15,
            breathing_speed: 1.2,
            breathing_amplitude: 0.3,
            warp_x: (0.5, 0.2),
            warp_y: (0.7, 0.15),
            drift_z: (0.3, 0.1),
        }
    }
}

/// Mapping from band levels to the audio multiplier
#[derive(Debug, Clone)]
pub struct ReactiveMapping {
    /// Upper bound for the user intensity control
    pub max_intensity: f32,

    /// Scale applied to the clamped intensity
    /// Formula: base_intensity = clamp(intensity, 0, max) * this_scale
    pub intensity_scale: f32,

    /// Per-band weights [bass, mid, treble]
    /// Formula: multiplier = 1 + level * base_intensity * weight
    pub band_weights: [f32; 3],

    /// Extra petal rotation per unit of treble * base_intensity (radians)
    pub treble_twist: f32,
}

impl Default for ReactiveMapping {
    fn default() -> Self {
        Self {
            max_intensity: 10.0,
            intensity_scale: 0.3,
            band_weights: [1.2, 1.0, 1.1],
            treble_twist: 0.05,
        }
    }
}

/// Impulse ("touch") highlight detection
#[derive(Debug, Clone)]
pub struct HighlightParams {
    /// Minimum frame-to-frame level change that counts as an impulse
    pub threshold: f32,

    /// Energy added per unit of level change
    pub gain: f32,

    /// Per-frame geometric decay factor
    pub decay: f32,
}

impl Default for HighlightParams {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            gain: 2.0,
            decay: 0.95,
        }
    }
}

/// Audio remapping of ornament point sequences (aurora streams, glow lines)
#[derive(Debug, Clone)]
pub struct OrnamentMapping {
    /// Height gain per unit of assigned band level * reactivity
    pub height_scale: f32,

    /// Radius gain per unit of overall intensity * reactivity
    pub radius_scale: f32,

    /// Wave speed along the sequence (rad/s)
    pub wave_speed: f32,

    /// Wave amplitude per unit of overall intensity
    pub wave_gain: f32,

    /// Wave displacement weights per axis [x, y, z]
    pub wave_axis: [f32; 3],

    /// Opacity with audio disabled or silent
    pub base_opacity: f32,

    /// Opacity gain per unit of overall intensity
    pub opacity_gain: f32,

    /// Hue rotation per unit of color shift per second
    pub hue_drift: f32,
}

impl Default for OrnamentMapping {
    fn default() -> Self {
        Self {
            height_scale: 0.3,
            radius_scale: 0.1,
            wave_speed: 2.0,
            wave_gain: 2.0,
            wave_axis: [0.2, 0.1, 0.15],
            base_opacity: 0.4,
            opacity_gain: 0.6,
            hue_drift: 0.1,
        }
    }
}

/// All motion parameters
#[derive(Debug, Clone, Default)]
pub struct MotionConfig {
    pub petal: PetalMotion,
    pub mapping: ReactiveMapping,
    pub highlight: HighlightParams,
    pub ornament: OrnamentMapping,
}
