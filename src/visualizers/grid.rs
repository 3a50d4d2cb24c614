use super::{VisualFrame, Visualizer};
use ratatui::{
    style::Color,
    widgets::canvas::{Context, Points},
};

pub(crate) const ROWS: usize = 10;
pub(crate) const COLS: usize = 10;

/// Fixed lattice of dots, each bobbing on a sine of the frame time plus the
/// magnitude of its bar. Cells map to bars row-major, wrapping when the
/// lattice outnumbers the bars.
pub struct WaveGrid;

pub(crate) fn grid_points(bars: &[f32], tick: u64, width: f64, height: f64) -> Vec<(f64, f64)> {
    if bars.is_empty() {
        return Vec::new();
    }
    let cell_w = width / (COLS + 1) as f64;
    let cell_h = height / (ROWS + 1) as f64;
    let mut points = Vec::with_capacity(ROWS * COLS);
    for row in 0..ROWS {
        for col in 0..COLS {
            let m = bars[(row * COLS + col) % bars.len()] as f64;
            let offset = 50.0 * (tick as f64 / 10.0 + m / 10.0).sin();
            points.push((
                cell_w * (col + 1) as f64,
                cell_h * (row + 1) as f64 + offset,
            ));
        }
    }
    points
}

impl Visualizer for WaveGrid {
    fn name(&self) -> &str {
        "Wave Grid"
    }

    fn draw(&self, ctx: &mut Context, frame: &VisualFrame) {
        let coords = grid_points(frame.bars, frame.tick, frame.width, frame.height);
        ctx.draw(&Points {
            coords: &coords,
            color: Color::Green,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lattice_has_a_hundred_dots() {
        let pts = grid_points(&[10.0; 64], 0, 800.0, 600.0);
        assert_eq!(pts.len(), 100);
    }

    #[test]
    fn offsets_never_exceed_the_wave_height() {
        let bars: Vec<f32> = (0..64).map(|i| i as f32).collect();
        for tick in [0, 17, 391] {
            for (row, chunk) in grid_points(&bars, tick, 800.0, 600.0)
                .chunks(COLS)
                .enumerate()
            {
                let rest = 600.0 / (ROWS + 1) as f64 * (row + 1) as f64;
                for &(_, y) in chunk {
                    assert!((y - rest).abs() <= 50.0 + 1e-9);
                }
            }
        }
    }

    #[test]
    fn cells_wrap_around_a_short_bar_set() {
        // Two bars: cells alternate between them, so columns 0 and 2 of the
        // same row always share a height.
        let pts = grid_points(&[30.0, 90.0], 5, 800.0, 600.0);
        assert_eq!(pts[0].1, pts[2].1);
        assert_eq!(pts[1].1, pts[3].1);
        assert_ne!(pts[0].1, pts[1].1);
    }

    #[test]
    fn no_bars_means_no_lattice() {
        assert!(grid_points(&[], 0, 800.0, 600.0).is_empty());
    }
}
