//! Song playback behind a recoverable interface.
//!
//! Audio failure never ends the run: a missing device or an unreadable song
//! file downgrades the session to silence and the loop keeps going. Decoding
//! real song data is out of scope, so playback is a looping arpeggio seeded
//! from the song path; the point is that switching songs is audible.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::f32::consts::TAU;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{error, info};

/// Playback errors. Callers log these and fall back to silence.
#[derive(Error, Debug)]
pub enum AudioError {
    /// Song file missing or unreadable
    #[error("failed to load song {path:?}: {reason}")]
    Load { path: PathBuf, reason: String },

    /// No usable output device
    #[error("audio device error: {0}")]
    Device(String),

    /// Output stream refused to build or start
    #[error("audio stream error: {0}")]
    Stream(String),
}

/// Playback surface the game loop talks to.
pub trait SongPlayer {
    /// Prepare a song for playback. On error the previously loaded song, if
    /// any, keeps playing.
    fn load(&mut self, path: &Path) -> Result<(), AudioError>;

    /// Fire-and-forget start. Never blocks on playback progress.
    fn play(&mut self) -> Result<(), AudioError>;
}

/// Player that swallows everything. Used for `--mute` and as the fallback
/// when the device hunt fails.
pub struct SilentPlayer;

impl SongPlayer for SilentPlayer {
    fn load(&mut self, _path: &Path) -> Result<(), AudioError> {
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Eight-step arpeggio looping over a pentatonic scale. The song path seeds
/// the note choice, so each song has a stable, distinct motif.
struct TonePattern {
    freqs: [f32; 8],
    samples_per_note: u32,
    sample_rate: f32,
    cursor: u32,
    phase: f32,
}

impl TonePattern {
    /// A-minor pentatonic base notes, doubled an octave on a coin flip.
    const SCALE: [f32; 5] = [220.0, 261.63, 293.66, 329.63, 392.0];

    fn from_seed(seed: u64, sample_rate: u32) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut freqs = [0.0f32; 8];
        for f in freqs.iter_mut() {
            let base = Self::SCALE[rng.random_range(0..Self::SCALE.len())];
            *f = if rng.random_bool(0.5) { base * 2.0 } else { base };
        }
        Self {
            freqs,
            samples_per_note: (sample_rate / 4).max(1),
            sample_rate: sample_rate as f32,
            cursor: 0,
            phase: 0.0,
        }
    }

    fn next_sample(&mut self) -> f32 {
        let idx = (self.cursor / self.samples_per_note) as usize % self.freqs.len();
        let freq = self.freqs[idx];
        // Linear decay per step keeps the loop from clicking.
        let within = (self.cursor % self.samples_per_note) as f32;
        let envelope = 1.0 - within / self.samples_per_note as f32;

        self.phase += freq * TAU / self.sample_rate;
        if self.phase > TAU {
            self.phase -= TAU;
        }
        self.cursor = (self.cursor + 1) % (self.samples_per_note * self.freqs.len() as u32);
        self.phase.sin() * envelope * 0.2
    }
}

/// Real player: one cpal output stream for the whole session, with `load`
/// swapping the pattern under a mutex.
pub struct TonePlayer {
    pattern: Arc<Mutex<Option<TonePattern>>>,
    sample_rate: u32,
    stream: cpal::Stream,
}

impl TonePlayer {
    pub fn new() -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AudioError::Device("no output device found".into()))?;
        let config = device
            .default_output_config()
            .map_err(|e| AudioError::Device(e.to_string()))?;

        match device.description() {
            Ok(desc) => info!("audio device: {}", desc),
            Err(err) => info!("audio device: <unknown> ({err})"),
        }

        let sample_rate = config.sample_rate();
        let channels = config.channels() as usize;
        let pattern: Arc<Mutex<Option<TonePattern>>> = Arc::new(Mutex::new(None));

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config.into(), pattern.clone(), channels)
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config.into(), pattern.clone(), channels)
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config.into(), pattern.clone(), channels)
            }
            other => Err(AudioError::Stream(format!(
                "unsupported sample format {other:?}"
            ))),
        }?;

        Ok(Self {
            pattern,
            sample_rate,
            stream,
        })
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    pattern: Arc<Mutex<Option<TonePattern>>>,
    channels: usize,
) -> Result<cpal::Stream, AudioError>
where
    T: cpal::SizedSample + cpal::FromSample<f32>,
{
    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                let mut pattern = pattern.lock().unwrap();
                for frame in data.chunks_mut(channels) {
                    let s = pattern.as_mut().map_or(0.0, |p| p.next_sample());
                    for out in frame.iter_mut() {
                        *out = T::from_sample(s);
                    }
                }
            },
            |err| error!("audio stream error: {err}"),
            None,
        )
        .map_err(|e| AudioError::Stream(e.to_string()))
}

impl SongPlayer for TonePlayer {
    fn load(&mut self, path: &Path) -> Result<(), AudioError> {
        if !path.exists() {
            return Err(AudioError::Load {
                path: path.to_path_buf(),
                reason: "file not found".into(),
            });
        }
        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        let fresh = TonePattern::from_seed(hasher.finish(), self.sample_rate);
        *self.pattern.lock().unwrap() = Some(fresh);
        Ok(())
    }

    fn play(&mut self) -> Result<(), AudioError> {
        self.stream
            .play()
            .map_err(|e| AudioError::Stream(e.to_string()))
    }
}
