//! Capture sources feeding the sample ring.
//!
//! Live input goes through cpal; a WAV file can stand in for a device by using a
//! `file:<path>` id (looping) or `file-once:<path>`. Both downmix to mono and push into the same [`SampleRing`].
//! No echo cancellation, noise suppression or gain control is applied.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, StreamTrait};
use cpal::{Device, FromSample, Sample, SampleFormat, SizedSample, StreamConfig};
use tracing::{debug, info, warn};

use super::device::{
    find_input_device, list_input_devices, InputDevice, FILE_DEVICE_PREFIX, FILE_ONCE_DEVICE_PREFIX,
};
use super::ring::SampleRing;
use super::AudioError;
use crate::params::AnalyserConfig;

/// Shared handle to the ring the capture side writes into
pub type SharedRing = Arc<Mutex<SampleRing>>;

/// A running capture. Stopping releases the underlying platform resources.
pub trait CaptureStream {
    /// Stop capturing. Must be idempotent.
    fn stop(&mut self);
}

/// An opened input, ready to be analysed
pub struct Capture {
    pub ring: SharedRing,
    pub sample_rate: u32,
    pub label: String,
    pub stream: Box<dyn CaptureStream>,
}

/// Platform seam for device enumeration and capture
pub trait InputBackend {
    fn list_devices(&self) -> Result<Vec<InputDevice>, AudioError>;

    fn open(&self, device_id: &str, config: &AnalyserConfig) -> Result<Capture, AudioError>;
}

/// Default backend: cpal host devices plus `file:` / `file-once:` WAV replay
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBackend;

impl InputBackend for SystemBackend {
    fn list_devices(&self) -> Result<Vec<InputDevice>, AudioError> {
        list_input_devices()
    }

    fn open(&self, device_id: &str, config: &AnalyserConfig) -> Result<Capture, AudioError> {
        if let Some(path) = device_id.strip_prefix(FILE_ONCE_DEVICE_PREFIX) {
            return open_wav(Path::new(path), config, false);
        }
        match device_id.strip_prefix(FILE_DEVICE_PREFIX) {
            Some(path) => open_wav(Path::new(path), config, true),
            None => open_mic(device_id, config),
        }
    }
}

// ---------------------------------------------------------------------------
// Live input (cpal)

struct MicStream {
    stream: Option<cpal::Stream>,
}

impl CaptureStream for MicStream {
    fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            // Already-stopped streams may report errors here; nothing to recover
            let _ = stream.pause();
        }
    }
}

impl Drop for MicStream {
    fn drop(&mut self) {
        self.stop();
    }
}

fn open_mic(device_id: &str, config: &AnalyserConfig) -> Result<Capture, AudioError> {
    let host = cpal::default_host();
    let device = find_input_device(&host, device_id)?;
    let label = device.name().unwrap_or_else(|_| "mic".to_string());

    let supported = device.default_input_config()?;
    let sample_format = supported.sample_format();
    let stream_config: StreamConfig = supported.config();
    let sample_rate = stream_config.sample_rate.0;

    let ring = Arc::new(Mutex::new(SampleRing::new(config.ring_capacity(sample_rate))));

    let stream = match sample_format {
        SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, Arc::clone(&ring))?,
        SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, Arc::clone(&ring))?,
        SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, Arc::clone(&ring))?,
        SampleFormat::I32 => build_stream::<i32>(&device, &stream_config, Arc::clone(&ring))?,
        other => {
            return Err(AudioError::DeviceUnavailable(format!(
                "unsupported sample format {:?}",
                other
            )))
        }
    };
    stream.play()?;

    info!(
        "Audio input: {} @ {}Hz, {} ch",
        label, sample_rate, stream_config.channels
    );

    Ok(Capture {
        ring,
        sample_rate,
        label,
        stream: Box::new(MicStream {
            stream: Some(stream),
        }),
    })
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    ring: SharedRing,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = (config.channels as usize).max(1);

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            // Never block the audio thread; a dropped callback is a stale frame
            if let Ok(mut ring) = ring.try_lock() {
                downmix_into(&mut ring, data, channels);
            }
        },
        |err| warn!("Audio stream error: {}", err),
        None,
    )?;

    Ok(stream)
}

/// Average interleaved frames of any sample type into mono f32 samples
fn downmix_into<T>(ring: &mut SampleRing, data: &[T], channels: usize)
where
    T: Sample,
    f32: FromSample<T>,
{
    let channels = channels.max(1);
    for frame in data.chunks_exact(channels) {
        let sum: f32 = frame.iter().map(|&s| f32::from_sample(s)).sum();
        ring.push(sum / channels as f32);
    }
}

// ---------------------------------------------------------------------------
// WAV replay (hound)

struct FileStream {
    stop: Arc<AtomicBool>,
    join: Option<thread::JoinHandle<()>>,
}

impl CaptureStream for FileStream {
    fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(join) = self.join.take() {
            if join.join().is_err() {
                warn!("WAV replay thread panicked");
            }
        }
    }
}

impl Drop for FileStream {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Decode a WAV file to mono f32 samples
pub fn read_wav_mono(path: &Path) -> Result<(Vec<f32>, u32), AudioError> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = (spec.channels as usize).max(1);

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 * scale))
                .collect::<Result<_, _>>()?
        }
    };

    let mono = interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();

    Ok((mono, spec.sample_rate))
}

/// Replay a WAV file into a ring in real time
pub fn open_wav(path: &Path, config: &AnalyserConfig, looping: bool) -> Result<Capture, AudioError> {
    let (samples, sample_rate) = read_wav_mono(path)?;
    if samples.is_empty() || sample_rate == 0 {
        return Err(AudioError::DeviceUnavailable(format!(
            "{} contains no audio",
            path.display()
        )));
    }

    let ring = Arc::new(Mutex::new(SampleRing::new(config.ring_capacity(sample_rate))));
    let stop = Arc::new(AtomicBool::new(false));

    let ring_writer = Arc::clone(&ring);
    let stop_flag = Arc::clone(&stop);
    let join = thread::spawn(move || {
        let started = Instant::now();
        let mut written = 0usize;

        while !stop_flag.load(Ordering::Relaxed) {
            // Catch up to wall clock, then sleep ~10ms
            let due = (started.elapsed().as_secs_f64() * sample_rate as f64) as usize;
            if due > written {
                if let Ok(mut ring) = ring_writer.lock() {
                    for i in written..due {
                        let sample = if looping {
                            samples[i % samples.len()]
                        } else {
                            samples.get(i).copied().unwrap_or(0.0)
                        };
                        ring.push(sample);
                    }
                }
                written = due;
            }
            thread::sleep(Duration::from_millis(10));
        }
    });

    let prefix = if looping {
        FILE_DEVICE_PREFIX
    } else {
        FILE_ONCE_DEVICE_PREFIX
    };
    let label = format!("{}{}", prefix, path.display());
    debug!("Replaying {} @ {}Hz", label, sample_rate);

    Ok(Capture {
        ring,
        sample_rate,
        label,
        stream: Box::new(FileStream {
            stop,
            join: Some(join),
        }),
    })
}

/// Stop a capture, tolerating already-released resources
pub fn release(capture: &mut Capture) {
    capture.stream.stop();
    match capture.ring.lock() {
        Ok(mut ring) => ring.clear(),
        Err(poisoned) => poisoned.into_inner().clear(),
    }
}
