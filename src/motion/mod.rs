//! Procedural motion driver.
//!
//! Pure per-frame functions of elapsed time, static primitive identity and
//! (optionally) band levels. The only carried state is each primitive's
//! [`AnimatedPrimitiveState`], passed in by the owner.

mod aurora;
mod carousel;
mod glow;
mod highlight;
mod ornament;
mod petal;
mod reactive;

pub use aurora::generate_streams;
pub use carousel::{carousel_placement, FlowerPlacement};
pub use glow::{glow_core, glow_lines, GlowCore};
pub use highlight::AnimatedPrimitiveState;
pub use ornament::{Ornament, OrnamentStyle};
pub use petal::{petal_pose, Petal, PetalInstance, PetalPose};
pub use reactive::{audio_multiplier, base_intensity, Reactivity};
