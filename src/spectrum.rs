//! Synthetic frequency bars.
//!
//! Real spectral analysis is deliberately out of the picture: a chunk of
//! random noise goes through a forward FFT and the half-spectrum magnitudes
//! become the bars. The layers only ever see [`FrequencyProvider`], so a
//! real analyzer can slot in behind the same trait later.

use num_complex::Complex;
use rand::random_range;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// Source of one frame of bar magnitudes.
pub trait FrequencyProvider {
    /// Bars for one draw call. Length is fixed per provider and every value
    /// sits in `[0, peak]`.
    fn frequency_bars(&mut self) -> Vec<f32>;
}

/// Noise-driven provider: every call runs fresh random samples through the
/// FFT, so consecutive frames are uncorrelated on purpose.
pub struct SyntheticSpectrum {
    bar_count: usize,
    peak_amplitude: f32,
    chunk_size: usize,
    fft: Arc<dyn Fft<f32>>,
}

impl SyntheticSpectrum {
    pub fn new(bar_count: usize, peak_amplitude: f32, chunk_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(chunk_size);
        Self {
            bar_count,
            peak_amplitude,
            chunk_size,
            fft,
        }
    }

    /// Half-spectrum magnitudes of one sample chunk. The mirrored upper half
    /// carries no extra information for real input, so it is dropped.
    fn magnitudes(&self, samples: &[f32]) -> Vec<f32> {
        let mut buf: Vec<Complex<f32>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        self.fft.process(&mut buf);
        buf[..self.chunk_size / 2].iter().map(|c| c.norm()).collect()
    }
}

impl FrequencyProvider for SyntheticSpectrum {
    fn frequency_bars(&mut self) -> Vec<f32> {
        let samples: Vec<f32> = (0..self.chunk_size)
            .map(|_| random_range(-1.0f32..1.0))
            .collect();
        let mut bars = self.magnitudes(&samples);
        bars.resize(self.bar_count, 0.0);
        rescale_to_peak(&mut bars, self.peak_amplitude);
        bars
    }
}

/// Rescale in place so the maximum lands exactly on `peak`. An all-zero
/// frame is left untouched rather than dividing by zero.
pub fn rescale_to_peak(bars: &mut [f32], peak: f32) {
    let max = bars.iter().copied().fold(0.0f32, f32::max);
    if max > 0.0 {
        for b in bars.iter_mut() {
            *b = *b / max * peak;
        }
    }
}

/// Hands bar samples to the layers, once per layer or once per frame
/// depending on the sharing policy.
pub struct FrameSampler {
    provider: Box<dyn FrequencyProvider>,
    shared: bool,
    cached: Option<Vec<f32>>,
}

impl FrameSampler {
    pub fn new(provider: Box<dyn FrequencyProvider>, shared: bool) -> Self {
        Self {
            provider,
            shared,
            cached: None,
        }
    }

    /// Drop the previous frame's cached sample. Call once per frame before
    /// any layer draws.
    pub fn begin_frame(&mut self) {
        self.cached = None;
    }

    /// Bars for one layer. In shared mode the first call of the frame
    /// samples the provider and every later call gets the same slice back.
    pub fn sample(&mut self) -> Vec<f32> {
        if !self.shared {
            return self.provider.frequency_bars();
        }
        match &self.cached {
            Some(bars) => bars.clone(),
            None => {
                let bars = self.provider.frequency_bars();
                self.cached = Some(bars.clone());
                bars
            }
        }
    }
}
