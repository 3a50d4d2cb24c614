use ratatui::widgets::canvas::Context;

pub mod grid;
pub mod radial;
pub mod ripples;
pub mod spiral;
pub mod waveform;

/// Per-frame inputs shared by every layer.
pub struct VisualFrame<'a> {
    /// Bar magnitudes for this draw call, already rescaled to the peak.
    pub bars: &'a [f32],
    /// Frame counter; drives rotation and wave phase.
    pub tick: u64,
    /// Logical playfield size.
    pub width: f64,
    pub height: f64,
}

/// One visual layer. Layers draw into a shared canvas context so any subset
/// can stack over the background in any order.
pub trait Visualizer: Send + Sync {
    fn name(&self) -> &str;
    fn draw(&self, ctx: &mut Context, frame: &VisualFrame);
}

/// Every layer in default presentation order.
pub fn all_layers() -> Vec<Box<dyn Visualizer>> {
    vec![
        Box::new(waveform::WaveformBars),
        Box::new(ripples::Ripples),
        Box::new(spiral::Spiral),
        Box::new(radial::RadialBars),
        Box::new(grid::WaveGrid),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_names_are_unique() {
        let layers = all_layers();
        let mut names: Vec<&str> = layers.iter().map(|l| l.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), layers.len());
    }
}
