use super::{VisualFrame, Visualizer};
use ratatui::{
    style::Color,
    widgets::canvas::{Context, Line},
};

/// Column per bar, mirrored around the vertical center of the screen.
pub struct WaveformBars;

/// Column layout: `(x_center, half_height)` per bar in logical coordinates.
pub(crate) fn bar_columns(bars: &[f32], width: f64) -> Vec<(f64, f64)> {
    let slot = width / bars.len().max(1) as f64;
    bars.iter()
        .enumerate()
        .map(|(i, &m)| (slot * (i as f64 + 0.5), m as f64 / 2.0))
        .collect()
}

impl Visualizer for WaveformBars {
    fn name(&self) -> &str {
        "Waveform"
    }

    fn draw(&self, ctx: &mut Context, frame: &VisualFrame) {
        let mid = frame.height / 2.0;
        for (x, half) in bar_columns(frame.bars, frame.width) {
            ctx.draw(&Line {
                x1: x,
                y1: mid - half,
                x2: x,
                y2: mid + half,
                color: Color::Cyan,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_are_evenly_spaced_across_the_width() {
        let bars = vec![10.0; 4];
        let cols = bar_columns(&bars, 800.0);
        let xs: Vec<f64> = cols.iter().map(|c| c.0).collect();
        assert_eq!(xs, vec![100.0, 300.0, 500.0, 700.0]);
    }

    #[test]
    fn column_height_equals_the_magnitude() {
        let cols = bar_columns(&[80.0], 800.0);
        assert_eq!(cols[0].1 * 2.0, 80.0);
    }

    #[test]
    fn empty_bars_produce_no_columns() {
        assert!(bar_columns(&[], 800.0).is_empty());
    }
}
