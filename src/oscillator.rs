//! Background color driven by a slow sine oscillator.
//!
//! Stands in for amplitude tracking of the current song: red swells as the
//! fake amplitude rises, blue fades in the same measure, green stays put.

/// Oscillator anchored to the moment the current song started.
#[derive(Debug, Clone)]
pub struct BackgroundOscillator {
    start_ms: u64,
    rate: f64,
    duration_ms: u64,
    base_green: u8,
}

impl BackgroundOscillator {
    pub fn new(now_ms: u64, rate: f64, duration_ms: u64, base_green: u8) -> Self {
        Self {
            start_ms: now_ms,
            rate,
            duration_ms,
            base_green,
        }
    }

    /// Re-anchor to a new song start.
    pub fn restart(&mut self, now_ms: u64) {
        self.start_ms = now_ms;
    }

    /// Simulated amplitude in `[0, 255]`. Exactly zero once the song
    /// duration has run out.
    pub fn amplitude(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed > self.duration_ms {
            return 0.0;
        }
        ((elapsed as f64 * self.rate).sin().abs() * 255.0) as f32
    }

    /// Background color for this instant: `(amplitude, green, 255 - amplitude)`.
    pub fn color(&self, now_ms: u64) -> (u8, u8, u8) {
        let amp = self.amplitude(now_ms);
        (amp as u8, self.base_green, (255.0 - amp) as u8)
    }
}
