use super::{VisualFrame, Visualizer};
use ratatui::{
    style::Color,
    widgets::canvas::{Context, Points},
};

/// Dots wound around the center. Each bar claims an angle slot and the
/// whole figure turns one degree per frame.
pub struct Spiral;

pub(crate) fn spiral_points(bars: &[f32], tick: u64, cx: f64, cy: f64) -> Vec<(f64, f64)> {
    let step = 360.0 / bars.len().max(1) as f64;
    bars.iter()
        .enumerate()
        .map(|(i, &m)| {
            let angle = (i as f64 * step + tick as f64).to_radians();
            let r = m as f64 * 3.0;
            (cx + angle.cos() * r, cy + angle.sin() * r)
        })
        .collect()
}

impl Visualizer for Spiral {
    fn name(&self) -> &str {
        "Spiral"
    }

    fn draw(&self, ctx: &mut Context, frame: &VisualFrame) {
        let coords = spiral_points(
            frame.bars,
            frame.tick,
            frame.width / 2.0,
            frame.height / 2.0,
        );
        ctx.draw(&Points {
            coords: &coords,
            color: Color::Magenta,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_three_times_the_magnitude() {
        let pts = spiral_points(&[10.0], 0, 0.0, 0.0);
        let (x, y) = pts[0];
        let r = (x * x + y * y).sqrt();
        assert!((r - 30.0).abs() < 1e-9);
    }

    #[test]
    fn tick_rotates_the_whole_figure() {
        // One full revolution brings every dot back to where it started.
        let a = spiral_points(&[10.0, 20.0], 0, 0.0, 0.0);
        let b = spiral_points(&[10.0, 20.0], 360, 0.0, 0.0);
        for (p, q) in a.iter().zip(&b) {
            assert!((p.0 - q.0).abs() < 1e-6);
            assert!((p.1 - q.1).abs() < 1e-6);
        }
    }

    #[test]
    fn bars_split_the_circle_evenly() {
        // Four bars, equal magnitude: consecutive dots sit 90 degrees apart.
        let pts = spiral_points(&[10.0; 4], 0, 0.0, 0.0);
        assert!((pts[0].0 - 30.0).abs() < 1e-9); // 0 degrees
        assert!((pts[1].1 - 30.0).abs() < 1e-9); // 90 degrees
        assert!((pts[2].0 + 30.0).abs() < 1e-9); // 180 degrees
    }
}
