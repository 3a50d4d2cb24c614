//! Game parameters with documented units and defaults.

use std::path::PathBuf;

/// Top-level configuration for one game session.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Logical playfield width (pixels)
    pub width: f32,

    /// Logical playfield height (pixels)
    pub height: f32,

    /// Simulation rate (ticks per second)
    pub tick_hz: u32,

    /// Edge length of the falling note (pixels)
    pub note_size: f32,

    /// Fall speed at the start of a song (pixels per tick)
    pub base_note_speed: f32,

    /// Fall speed gained per successful hit (pixels per tick)
    pub speed_per_hit: f32,

    /// Button hold time that switches to the next song (milliseconds)
    pub hold_threshold_ms: u64,

    /// Songs cycled by the hold gesture, in order
    pub songs: Vec<PathBuf>,

    pub visual: VisualConfig,
    pub particles: ParticleConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            tick_hz: 60,
            note_size: 44.0,
            base_note_speed: 5.0,
            speed_per_hit: 1.0,
            hold_threshold_ms: 1000,
            songs: vec![
                PathBuf::from("songs/neon-drift.ogg"),
                PathBuf::from("songs/night-circuit.ogg"),
                PathBuf::from("songs/starline.ogg"),
            ],
            visual: VisualConfig::default(),
            particles: ParticleConfig::default(),
        }
    }
}

/// Parameters for the frequency bars and the background oscillator.
#[derive(Debug, Clone)]
pub struct VisualConfig {
    /// Number of frequency bars per frame
    pub bar_count: usize,

    /// Peak magnitude bars are rescaled to (logical pixels)
    pub peak_amplitude: f32,

    /// Raw sample chunk length fed to the FFT (power of two)
    pub chunk_size: usize,

    /// Background oscillator rate (radians per millisecond)
    pub oscillator_rate: f64,

    /// Green channel held constant in the background color (0-255)
    pub base_green: u8,

    /// Simulated song length; the background goes dark past this (milliseconds)
    pub duration_ms: u64,

    /// Sample the bars once per frame and share the slice across all layers.
    /// Off by default: every layer jitters independently.
    pub shared_frame_sample: bool,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            bar_count: 64,
            peak_amplitude: 100.0,
            chunk_size: 256, // 128 usable magnitudes after the half-spectrum cut
            oscillator_rate: 0.005,
            base_green: 100,
            duration_ms: 120_000,
            shared_frame_sample: false,
        }
    }
}

/// Parameters for hit-explosion particles.
#[derive(Debug, Clone)]
pub struct ParticleConfig {
    /// Particles spawned per explosion
    pub burst_size: usize,

    /// Velocity component range, symmetric about zero (pixels per tick)
    pub max_speed: f32,

    /// Initial size range (pixels)
    pub min_size: f32,
    pub max_size: f32,

    /// Size lost every tick (pixels)
    pub shrink_per_tick: f32,

    /// Hard cap on live particles; the oldest are evicted past it
    pub max_active: usize,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            burst_size: 30,
            max_speed: 3.0,
            min_size: 4.0,
            max_size: 8.0,
            shrink_per_tick: 0.1,
            max_active: 600, // ten simultaneous hits (two bursts each) before eviction
        }
    }
}
