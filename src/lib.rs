//! Petalwave library - Audio-reactive generative flower motion

pub mod audio;
pub mod cli;
pub mod motion;
pub mod params;
pub mod scene;
