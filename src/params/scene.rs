//! Scene configuration: per-run inputs the motion driver reads each frame.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use super::flower::FlowerSpecies;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Aurora stream generation parameters
#[derive(Debug, Clone)]
pub struct StreamFieldConfig {
    /// Number of streams around the flower
    pub count: usize,

    /// Points per stream polyline
    pub points_per_stream: usize,

    /// Inner radius of the stream spirals (scene units)
    pub inner_radius: f32,

    /// Radial growth from first to last point (scene units)
    pub radial_spread: f32,

    /// Vertical extent of each stream (scene units)
    pub height: f32,

    /// Spiral turns per stream
    pub turns: f32,
}

impl Default for StreamFieldConfig {
    fn default() -> Self {
        Self {
            count: 12,
            points_per_stream: 64,
            inner_radius: 3.0,
            radial_spread: 2.0,
            height: 4.0,
            turns: 0.75,
        }
    }
}

/// Externally supplied scene inputs
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Audio reactivity strength (0 - 10)
    pub intensity: f32,

    pub species: FlowerSpecies,

    /// Petal count override (0 = species default)
    pub petal_count: usize,

    /// Petal radius override (0 = species default)
    pub radius: f32,

    /// Number of flowers on the carousel
    pub flowers: usize,

    /// Carousel orbit radius (scene units)
    pub orbit_radius: f32,

    /// Carousel angular speed (rad/s)
    pub carousel_speed: f32,

    /// Vertical bobbing amplitude of each flower (scene units)
    pub vertical_oscillation: f32,

    pub auto_rotate: bool,

    /// Flower spin speed (tenths of rad/s)
    pub rotation_speed: f32,

    /// Number of radial glow lines
    pub glow_lines: usize,

    /// Seed for per-instance randomized phases
    pub seed: u64,

    pub streams: StreamFieldConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            intensity: 5.0,
            species: FlowerSpecies::Default,
            petal_count: 0,
            radius: 0.0,
            flowers: 1,
            orbit_radius: 0.0,
            carousel_speed: 0.2,
            vertical_oscillation: 0.3,
            auto_rotate: true,
            rotation_speed: 1.0,
            glow_lines: 8,
            seed: 7,
            streams: StreamFieldConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Load a config file on top of the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: FileConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded scene config from {}", path.display());

        let mut cfg = Self::default();
        cfg.apply_file(file);
        cfg.sanitize();
        Ok(cfg)
    }

    /// Resolved petal count (override or species default)
    pub fn petal_count(&self) -> usize {
        self.species.petal_count_or(self.petal_count)
    }

    /// Resolved petal radius (override or species default)
    pub fn petal_radius(&self) -> f32 {
        self.species.radius_or(self.radius)
    }

    fn apply_file(&mut self, fc: FileConfig) {
        if let Some(v) = fc.intensity {
            self.intensity = v;
        }
        if let Some(v) = fc.species {
            self.species = v;
        }
        if let Some(v) = fc.petal_count {
            self.petal_count = v;
        }
        if let Some(v) = fc.radius {
            self.radius = v;
        }
        if let Some(v) = fc.flowers {
            self.flowers = v;
        }
        if let Some(v) = fc.orbit_radius {
            self.orbit_radius = v;
        }
        if let Some(v) = fc.carousel_speed {
            self.carousel_speed = v;
        }
        if let Some(v) = fc.vertical_oscillation {
            self.vertical_oscillation = v;
        }
        if let Some(v) = fc.auto_rotate {
            self.auto_rotate = v;
        }
        if let Some(v) = fc.rotation_speed {
            self.rotation_speed = v;
        }
        if let Some(v) = fc.glow_lines {
            self.glow_lines = v;
        }
        if let Some(v) = fc.seed {
            self.seed = v;
        }
        if let Some(v) = fc.stream_count {
            self.streams.count = v;
        }
        if let Some(v) = fc.points_per_stream {
            self.streams.points_per_stream = v;
        }
    }

    /// Clamp out-of-range values instead of failing
    pub fn sanitize(&mut self) {
        if !self.intensity.is_finite() || !(0.0..=10.0).contains(&self.intensity) {
            let clamped = if self.intensity.is_finite() {
                self.intensity.clamp(0.0, 10.0)
            } else {
                SceneConfig::default().intensity
            };
            warn!("Intensity {} out of range, using {}", self.intensity, clamped);
            self.intensity = clamped;
        }
        self.petal_count = self.petal_count.min(256);
        self.radius = self.radius.clamp(0.0, 10.0);
        self.flowers = self.flowers.clamp(1, 16);
        self.orbit_radius = self.orbit_radius.clamp(0.0, 50.0);
        self.glow_lines = self.glow_lines.min(128);
        self.streams.count = self.streams.count.min(128);
        self.streams.points_per_stream = self.streams.points_per_stream.clamp(2, 4096);
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    intensity: Option<f32>,
    species: Option<FlowerSpecies>,
    petal_count: Option<usize>,
    radius: Option<f32>,
    flowers: Option<usize>,
    orbit_radius: Option<f32>,
    carousel_speed: Option<f32>,
    vertical_oscillation: Option<f32>,
    auto_rotate: Option<bool>,
    rotation_speed: Option<f32>,
    glow_lines: Option<usize>,
    seed: Option<u64>,
    stream_count: Option<usize>,
    points_per_stream: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "intensity = 8.0\nspecies = \"iris\"\nstream_count = 3").unwrap();

        let cfg = SceneConfig::load(file.path()).unwrap();
        assert_eq!(cfg.intensity, 8.0);
        assert_eq!(cfg.species, FlowerSpecies::Iris);
        assert_eq!(cfg.streams.count, 3);
        // Untouched fields keep defaults
        assert_eq!(cfg.glow_lines, SceneConfig::default().glow_lines);
        assert_eq!(cfg.petal_count(), 6);
    }

    #[test]
    fn test_load_clamps_intensity() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "intensity = 42.0").unwrap();

        let cfg = SceneConfig::load(file.path()).unwrap();
        assert_eq!(cfg.intensity, 10.0);
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bloom = 1.0").unwrap();

        assert!(matches!(
            SceneConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SceneConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
