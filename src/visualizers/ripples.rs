use super::{VisualFrame, Visualizer};
use ratatui::{
    style::Color,
    widgets::canvas::{Circle, Context},
};

/// Concentric circles from the screen center, one per bar; radius follows
/// the magnitude and the color walks the indexed palette.
pub struct Ripples;

impl Visualizer for Ripples {
    fn name(&self) -> &str {
        "Ripples"
    }

    fn draw(&self, ctx: &mut Context, frame: &VisualFrame) {
        let cx = frame.width / 2.0;
        let cy = frame.height / 2.0;
        for (i, &m) in frame.bars.iter().enumerate() {
            if m <= 0.0 {
                continue;
            }
            ctx.draw(&Circle {
                x: cx,
                y: cy,
                radius: m as f64,
                color: Color::Indexed((i % 255) as u8),
            });
        }
    }
}
