//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::audio::{FILE_DEVICE_PREFIX, FILE_ONCE_DEVICE_PREFIX};
use crate::params::{ConfigError, FlowerSpecies, SceneConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Petalwave")]
#[command(about = "Audio-reactive generative flower (headless motion runner)", long_about = None)]
pub struct Args {
    /// List audio input devices and exit
    #[arg(long)]
    pub list_devices: bool,

    /// Input device id (empty = system default)
    #[arg(long, value_name = "ID")]
    pub device: Option<String>,

    /// Replay a WAV file instead of a live device
    #[arg(long, value_name = "PATH", conflicts_with = "device")]
    pub wav: Option<PathBuf>,

    /// Play the WAV file once instead of looping it
    #[arg(long, requires = "wav")]
    pub wav_once: bool,

    /// Run without audio (idle motion only)
    #[arg(long)]
    pub no_audio: bool,

    /// Scene config file (TOML)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Audio reactivity strength (0-10)
    #[arg(long, value_name = "LEVEL")]
    pub intensity: Option<f32>,

    /// Flower species: default, iris, dandelion, daisy
    #[arg(long, value_name = "SPECIES")]
    pub species: Option<FlowerSpecies>,

    /// Number of carousel flowers
    #[arg(long, value_name = "COUNT")]
    pub flowers: Option<usize>,

    /// Seed for randomized ornament phases
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// How long to run (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "10")]
    pub seconds: f32,

    /// Frame rate of the motion loop
    #[arg(long, value_name = "FPS", default_value = "60")]
    pub fps: u32,
}

impl Args {
    /// Build the scene config: file first, flags second
    pub fn scene_config(&self) -> Result<SceneConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)?,
            None => SceneConfig::default(),
        };

        if let Some(v) = self.intensity {
            config.intensity = v;
        }
        if let Some(v) = self.species {
            config.species = v;
        }
        if let Some(v) = self.flowers {
            config.flowers = v;
            if v > 1 && config.orbit_radius == 0.0 {
                config.orbit_radius = 6.0;
            }
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        config.sanitize();

        info!(
            "Flower: {} ({} petals, radius {}), intensity {}",
            config.species.params().name,
            config.petal_count(),
            config.petal_radius(),
            config.intensity
        );
        Ok(config)
    }

    /// Device id to enable, or `None` when audio is off
    pub fn device_id(&self) -> Option<String> {
        if self.no_audio {
            return None;
        }
        match (&self.wav, &self.device) {
            (Some(path), _) => {
                let prefix = if self.wav_once {
                    FILE_ONCE_DEVICE_PREFIX
                } else {
                    FILE_DEVICE_PREFIX
                };
                Some(format!("{}{}", prefix, path.display()))
            }
            (None, Some(id)) => Some(id.clone()),
            (None, None) => Some(String::new()),
        }
    }

    /// Total frames to run
    pub fn total_frames(&self) -> usize {
        (self.seconds.max(0.0) * self.fps.max(1) as f32).ceil() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wav_maps_to_file_device() {
        let args = Args::parse_from(["petalwave", "--wav", "song.wav"]);
        assert_eq!(args.device_id().as_deref(), Some("file:song.wav"));

        let once = Args::parse_from(["petalwave", "--wav", "song.wav", "--wav-once"]);
        assert_eq!(once.device_id().as_deref(), Some("file-once:song.wav"));
        assert!(Args::try_parse_from(["petalwave", "--wav-once"]).is_err());

        let quiet = Args::parse_from(["petalwave", "--no-audio"]);
        assert_eq!(quiet.device_id(), None);

        let default = Args::parse_from(["petalwave"]);
        assert_eq!(default.device_id().as_deref(), Some(""));
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::parse_from([
            "petalwave",
            "--species",
            "dandelion",
            "--intensity",
            "12",
            "--flowers",
            "3",
        ]);
        let config = args.scene_config().unwrap();
        assert_eq!(config.species, FlowerSpecies::Dandelion);
        assert_eq!(config.intensity, 10.0);
        assert_eq!(config.flowers, 3);
        assert!(config.orbit_radius > 0.0);
    }

    #[test]
    fn test_total_frames() {
        let args = Args::parse_from(["petalwave", "--seconds", "2", "--fps", "30"]);
        assert_eq!(args.total_frames(), 60);
    }
}
