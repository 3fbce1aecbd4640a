//! Petalwave - Audio-reactive generative flower
//!
//! Headless motion runner: captures audio, drives every petal, stream and
//! glow line at a fixed cadence and logs what the flower is doing.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use petalwave::audio::{list_input_devices, AudioEngine};
use petalwave::cli::Args;
use petalwave::params::{AnalyserConfig, MotionConfig};
use petalwave::scene::FlowerRig;

/// Log a status line every this many frames
const STATUS_EVERY: usize = 30;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    if args.list_devices {
        let devices = list_input_devices().context("Failed to enumerate input devices")?;
        if devices.is_empty() {
            println!("No audio input devices found");
        }
        for device in devices {
            println!("{}\t{}", device.id, device.label);
        }
        return Ok(());
    }

    let scene = args.scene_config().context("Failed to load scene config")?;
    let mut rig = FlowerRig::new(scene, MotionConfig::default());

    let mut engine = AudioEngine::new(AnalyserConfig::default());
    if let Some(device_id) = args.device_id() {
        // Capture failures leave the flower idling
        if let Err(e) = engine.enable(&device_id) {
            warn!("Audio unavailable, running idle: {}", e);
        }
    } else {
        info!("Audio disabled, running idle");
    }

    let fps = args.fps.max(1);
    let frame_budget = Duration::from_secs_f64(1.0 / fps as f64);
    let total_frames = args.total_frames();
    info!("Running {} frames at {} fps", total_frames, fps);

    let start_time = Instant::now();
    for frame in 0..total_frames {
        let frame_start = Instant::now();
        let time_s = start_time.elapsed().as_secs_f32();

        let audio = engine.frame();
        let output = rig.tick(time_s, audio.as_ref());

        if frame % STATUS_EVERY == 0 {
            match audio {
                Some(a) => info!(
                    "t={:5.2}s bass={:.2} mid={:.2} treble={:.2} avg={:.2} highlight={:.2}",
                    time_s,
                    a.levels.bass,
                    a.levels.mid,
                    a.levels.treble,
                    a.average,
                    output.peak_highlight()
                ),
                None => info!("t={:5.2}s idle core_opacity={:.2}", time_s, output.core.opacity),
            }
            debug!(
                "{} petal instances, {} streams, {} glow lines",
                output.petal_instances().len(),
                output.streams.len(),
                output.glow_lines.len()
            );
        }

        if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }

    engine.disable();
    info!("Done after {:.1}s", start_time.elapsed().as_secs_f32());
    Ok(())
}
