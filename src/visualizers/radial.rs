use super::{VisualFrame, Visualizer};
use ratatui::{
    style::Color,
    widgets::canvas::{Context, Line},
};

/// Lines from the screen center outward, one angle slot per bar.
pub struct RadialBars;

/// Segment endpoints `(x1, y1, x2, y2)` for every bar.
pub(crate) fn radial_segments(bars: &[f32], cx: f64, cy: f64) -> Vec<(f64, f64, f64, f64)> {
    let step = 360.0 / bars.len().max(1) as f64;
    bars.iter()
        .enumerate()
        .map(|(i, &m)| {
            let angle = (i as f64 * step).to_radians();
            let len = m as f64 * 4.0;
            (cx, cy, cx + angle.cos() * len, cy + angle.sin() * len)
        })
        .collect()
}

impl Visualizer for RadialBars {
    fn name(&self) -> &str {
        "Radial"
    }

    fn draw(&self, ctx: &mut Context, frame: &VisualFrame) {
        for (x1, y1, x2, y2) in radial_segments(frame.bars, frame.width / 2.0, frame.height / 2.0)
        {
            ctx.draw(&Line {
                x1,
                y1,
                x2,
                y2,
                color: Color::LightBlue,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_start_at_the_center() {
        for (x1, y1, _, _) in radial_segments(&[5.0, 25.0, 50.0], 400.0, 300.0) {
            assert_eq!((x1, y1), (400.0, 300.0));
        }
    }

    #[test]
    fn length_is_four_times_the_magnitude() {
        let segs = radial_segments(&[25.0], 0.0, 0.0);
        let (_, _, x2, y2) = segs[0];
        let len = (x2 * x2 + y2 * y2).sqrt();
        assert!((len - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_magnitude_collapses_to_a_point() {
        let segs = radial_segments(&[0.0], 400.0, 300.0);
        assert_eq!(segs[0], (400.0, 300.0, 400.0, 300.0));
    }
}
