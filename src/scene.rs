//! Flower rig: fans one frame of audio out to every animated primitive.

use tracing::{debug, trace};

use crate::audio::AudioFrame;
use crate::motion::{
    carousel_placement, generate_streams, glow_core, glow_lines, petal_pose,
    AnimatedPrimitiveState, FlowerPlacement, GlowCore, Ornament, OrnamentStyle, Petal,
    PetalInstance, PetalPose, Reactivity,
};
use crate::params::{MotionConfig, SceneConfig};

/// Poses for one flower
#[derive(Debug, Clone)]
pub struct FlowerFrame {
    pub placement: FlowerPlacement,
    pub petals: Vec<PetalPose>,
}

/// Everything the rendering side needs for one displayed frame
#[derive(Debug, Clone)]
pub struct FrameOutput {
    pub time_s: f32,
    pub flowers: Vec<FlowerFrame>,
    pub streams: Vec<OrnamentStyle>,
    pub glow_lines: Vec<OrnamentStyle>,
    pub core: GlowCore,
}

impl FrameOutput {
    /// Petal instance records for every flower, in flower-major order
    pub fn petal_instances(&self) -> Vec<PetalInstance> {
        self.flowers
            .iter()
            .flat_map(|flower| {
                let parent = flower.placement.matrix();
                flower.petals.iter().map(move |pose| pose.to_instance(parent))
            })
            .collect()
    }

    /// Strongest highlight across all petals
    pub fn peak_highlight(&self) -> f32 {
        self.flowers
            .iter()
            .flat_map(|f| f.petals.iter().map(|p| p.highlight))
            .fold(0.0, f32::max)
    }
}

/// Owns primitive identities and their carried state
pub struct FlowerRig {
    config: SceneConfig,
    motion: MotionConfig,
    petals: Vec<Petal>,
    /// Highlight state per flower per petal
    petal_states: Vec<Vec<AnimatedPrimitiveState>>,
    streams: Vec<Ornament>,
    glow_lines: Vec<Ornament>,
    /// Whether the previous tick carried audio
    had_audio: bool,
}

impl FlowerRig {
    pub fn new(config: SceneConfig, motion: MotionConfig) -> Self {
        let petals = Petal::ring(config.petal_count(), config.petal_radius());
        let petal_states = vec![vec![AnimatedPrimitiveState::default(); petals.len()]; config.flowers];
        let streams = generate_streams(&config.streams, config.seed);
        let glow_lines = glow_lines(config.glow_lines, config.petal_radius(), config.seed);

        Self {
            config,
            motion,
            petals,
            petal_states,
            streams,
            glow_lines,
            had_audio: false,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn petals(&self) -> &[Petal] {
        &self.petals
    }

    pub fn streams(&self) -> &[Ornament] {
        &self.streams
    }

    pub fn glow_lines(&self) -> &[Ornament] {
        &self.glow_lines
    }

    /// Change reactivity strength (clamped to 0 - 10)
    pub fn set_intensity(&mut self, intensity: f32) {
        self.config.intensity = intensity;
        self.config.sanitize();
    }

    /// Forget all highlight history of petals, streams and glow lines
    pub fn reset_highlights(&mut self) {
        for state in self.petal_states.iter_mut().flatten() {
            state.reset();
        }
        for ornament in self.streams.iter_mut().chain(self.glow_lines.iter_mut()) {
            ornament.reset_state();
        }
    }

    /// Advance every primitive to `time_s`; `audio` is `None` while disabled
    pub fn tick(&mut self, time_s: f32, audio: Option<&AudioFrame>) -> FrameOutput {
        // The drop from live levels to idle zeros is not an impulse
        if self.had_audio && audio.is_none() {
            debug!("Audio went idle, clearing highlights");
            self.reset_highlights();
        }
        self.had_audio = audio.is_some();

        let levels = audio.map(|a| a.levels);
        let reactivity = match levels {
            Some(l) => Reactivity::new(Some(l), self.config.intensity, &self.motion.mapping),
            None => Reactivity::idle(),
        };

        let total = self.petal_states.len();
        let flowers = self
            .petal_states
            .iter_mut()
            .enumerate()
            .map(|(index, states)| {
                let placement = carousel_placement(time_s, index, total, &self.config);
                let petals = self
                    .petals
                    .iter()
                    .zip(states.iter_mut())
                    .map(|(petal, state)| {
                        petal_pose(time_s, petal, &reactivity, &self.motion, state)
                    })
                    .collect();
                FlowerFrame { placement, petals }
            })
            .collect();

        let intensity = self.config.intensity;
        let streams = self
            .streams
            .iter_mut()
            .map(|s| s.update(time_s, levels.as_ref(), intensity, &self.motion))
            .collect();
        let glow_lines = self
            .glow_lines
            .iter_mut()
            .map(|g| g.update(time_s, levels.as_ref(), intensity, &self.motion))
            .collect();

        let core = glow_core(time_s, audio.map(|a| a.average));

        let output = FrameOutput {
            time_s,
            flowers,
            streams,
            glow_lines,
            core,
        };
        trace!(
            "tick t={:.3} peak_highlight={:.3}",
            time_s,
            output.peak_highlight()
        );
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::BandLevels;
    use crate::params::FlowerSpecies;

    fn rig(flowers: usize) -> FlowerRig {
        let config = SceneConfig {
            species: FlowerSpecies::Iris,
            flowers,
            orbit_radius: 5.0,
            ..Default::default()
        };
        FlowerRig::new(config, MotionConfig::default())
    }

    #[test]
    fn test_rig_sizes_follow_config() {
        let mut rig = rig(3);
        let out = rig.tick(0.5, None);

        assert_eq!(rig.petals().len(), 6);
        assert_eq!(out.flowers.len(), 3);
        assert!(out.flowers.iter().all(|f| f.petals.len() == 6));
        assert_eq!(out.streams.len(), rig.config().streams.count);
        assert_eq!(out.glow_lines.len(), rig.config().glow_lines);
        assert_eq!(out.petal_instances().len(), 18);
    }

    #[test]
    fn test_disabled_audio_is_idle() {
        let mut rig = rig(1);
        let out = rig.tick(1.0, None);

        assert_eq!(out.peak_highlight(), 0.0);
        assert_eq!(out.core.opacity, 0.1);
        assert!(out.streams.iter().all(|s| (s.opacity - 0.4).abs() < 1e-6));
        for stream in rig.streams() {
            assert_eq!(stream.points(), stream.baseline());
        }
    }

    #[test]
    fn test_sudden_bass_lights_bass_petals_only() {
        let mut rig = rig(1);
        let quiet = AudioFrame::default();
        let hit = AudioFrame {
            levels: BandLevels {
                bass: 0.8,
                ..BandLevels::ZERO
            },
            average: 0.3,
        };

        rig.tick(0.0, Some(&quiet));
        let out = rig.tick(0.016, Some(&hit));

        for (petal, pose) in rig.petals().iter().zip(&out.flowers[0].petals) {
            if petal.index % 3 == 0 {
                assert!(pose.highlight > 0.5);
            } else {
                assert_eq!(pose.highlight, 0.0);
            }
        }
        assert!((out.core.opacity - 0.36).abs() < 1e-5);
    }

    #[test]
    fn test_highlights_decay_after_impulse() {
        let mut rig = rig(1);
        let hit = AudioFrame {
            levels: BandLevels {
                bass: 1.0,
                mid: 1.0,
                treble: 1.0,
            },
            average: 1.0,
        };

        rig.tick(0.0, Some(&AudioFrame::default()));
        let mut prev = rig.tick(0.016, Some(&hit)).peak_highlight();
        for i in 2..30 {
            let now = rig.tick(i as f32 * 0.016, Some(&hit)).peak_highlight();
            assert!(now < prev);
            prev = now;
        }

        rig.reset_highlights();
        let quiet = AudioFrame::default();
        assert_eq!(rig.tick(1.0, Some(&quiet)).peak_highlight(), 0.0);
    }

    #[test]
    fn test_set_intensity_clamps() {
        let mut rig = rig(1);
        rig.set_intensity(50.0);
        assert_eq!(rig.config().intensity, 10.0);
    }

    #[test]
    fn test_disabling_audio_does_not_flash() {
        let mut rig = rig(2);
        let steady = AudioFrame {
            levels: BandLevels {
                bass: 0.6,
                mid: 0.6,
                treble: 0.6,
            },
            average: 0.6,
        };

        for i in 0..200 {
            rig.tick(i as f32 * 0.016, Some(&steady));
        }
        let out = rig.tick(3.4, None);
        let ornament_peak = out
            .streams
            .iter()
            .chain(&out.glow_lines)
            .map(|s| s.highlight)
            .fold(0.0, f32::max);

        assert_eq!(out.peak_highlight(), 0.0);
        assert_eq!(ornament_peak, 0.0);

        // Staying idle stays dark
        let later = rig.tick(3.5, None);
        assert!(later.streams.iter().all(|s| s.highlight == 0.0));
    }

    #[test]
    fn test_reset_highlights_covers_ornaments() {
        let mut rig = rig(1);
        let hit = AudioFrame {
            levels: BandLevels {
                bass: 1.0,
                mid: 1.0,
                treble: 1.0,
            },
            average: 1.0,
        };
        rig.tick(0.0, Some(&hit));
        assert!(rig.streams().iter().any(|s| s.state().highlight_energy > 0.0));

        rig.reset_highlights();
        assert!(rig
            .streams()
            .iter()
            .chain(rig.glow_lines())
            .all(|s| s.state().highlight_energy == 0.0));
    }
}
