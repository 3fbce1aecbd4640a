//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (seconds, rad/s, scene units, dB)
//! - Documented ranges and meanings

mod audio;
mod flower;
mod motion;
mod scene;

// Re-export all types
pub use audio::AnalyserConfig;
pub use flower::{FlowerSpecies, PetalShape, SpeciesParams};
pub use motion::{HighlightParams, MotionConfig, OrnamentMapping, PetalMotion, ReactiveMapping};
pub use scene::{ConfigError, SceneConfig, StreamFieldConfig};
