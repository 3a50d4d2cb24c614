//! Command-line argument parsing.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::GameConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "notefall")]
#[command(about = "One-button rhythm game with music-reactive visuals", long_about = None)]
pub struct Args {
    /// Number of frequency bars driving the visual layers
    #[arg(long, value_name = "N")]
    pub bars: Option<usize>,

    /// Peak bar magnitude in logical pixels
    #[arg(long, value_name = "PIXELS")]
    pub peak: Option<f32>,

    /// Visual layer to show; repeat the flag to stack several
    #[arg(long = "style", value_name = "STYLE")]
    pub styles: Vec<StyleArg>,

    /// Sample the bars once per frame and share the result across layers
    #[arg(long)]
    pub shared_sample: bool,

    /// Song file cycled by the hold gesture; repeat for a playlist
    #[arg(long = "song", value_name = "PATH")]
    pub songs: Vec<PathBuf>,

    /// Disable audio output entirely
    #[arg(long)]
    pub mute: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Selectable visual layers, in the same order as
/// [`crate::visualizers::all_layers`].
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleArg {
    Waveform,
    Ripples,
    Spiral,
    Radial,
    Grid,
}

impl StyleArg {
    pub fn layer_index(self) -> usize {
        match self {
            StyleArg::Waveform => 0,
            StyleArg::Ripples => 1,
            StyleArg::Spiral => 2,
            StyleArg::Radial => 3,
            StyleArg::Grid => 4,
        }
    }
}

impl Args {
    /// Fold the overrides into the default configuration.
    pub fn to_config(&self) -> GameConfig {
        let mut cfg = GameConfig::default();
        if let Some(bars) = self.bars {
            cfg.visual.bar_count = bars.max(1);
        }
        if let Some(peak) = self.peak {
            cfg.visual.peak_amplitude = peak.max(0.0);
        }
        if self.shared_sample {
            cfg.visual.shared_frame_sample = true;
        }
        if !self.songs.is_empty() {
            cfg.songs = self.songs.clone();
        }
        cfg
    }

    /// Indices of the layers to stack this session; empty means the default
    /// single-layer rotation.
    pub fn layer_stack(&self) -> Vec<usize> {
        self.styles.iter().map(|s| s.layer_index()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_through_untouched() {
        let args = Args::parse_from(["notefall"]);
        let cfg = args.to_config();
        assert_eq!(cfg.visual.bar_count, 64);
        assert_eq!(cfg.visual.peak_amplitude, 100.0);
        assert!(!cfg.visual.shared_frame_sample);
        assert_eq!(cfg.songs.len(), 3);
        assert!(args.layer_stack().is_empty());
    }

    #[test]
    fn overrides_land_in_the_config() {
        let args = Args::parse_from([
            "notefall",
            "--bars",
            "32",
            "--peak",
            "80",
            "--shared-sample",
            "--song",
            "a.ogg",
            "--song",
            "b.ogg",
        ]);
        let cfg = args.to_config();
        assert_eq!(cfg.visual.bar_count, 32);
        assert_eq!(cfg.visual.peak_amplitude, 80.0);
        assert!(cfg.visual.shared_frame_sample);
        assert_eq!(cfg.songs.len(), 2);
    }

    #[test]
    fn repeated_styles_stack_in_order() {
        let args = Args::parse_from(["notefall", "--style", "spiral", "--style", "grid"]);
        assert_eq!(args.layer_stack(), vec![2, 4]);
    }

    #[test]
    fn zero_bars_is_clamped_to_one() {
        let args = Args::parse_from(["notefall", "--bars", "0"]);
        assert_eq!(args.to_config().visual.bar_count, 1);
    }
}
