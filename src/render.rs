//! Frame composition: background fill, visual layers, playfield, HUD.
//!
//! Everything is painted into one full-screen canvas in logical 800x600
//! coordinates. Game space points y down, canvas space points y up, so all
//! playfield shapes go through the flip helpers here and nowhere else.

use crate::game::GameState;
use crate::geom::Rect;
use crate::oscillator::BackgroundOscillator;
use crate::spectrum::FrameSampler;
use crate::visualizers::{VisualFrame, Visualizer};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Line as TextLine,
    widgets::{
        canvas::{Canvas, Circle, Context, Line, Rectangle},
        Block, Borders,
    },
    Frame,
};

/// Everything one frame needs, borrowed from the run loop.
pub struct Scene<'a> {
    pub game: &'a GameState,
    pub oscillator: &'a BackgroundOscillator,
    pub layers: &'a [&'a dyn Visualizer],
    pub song_name: &'a str,
    pub style_label: &'a str,
    pub tick: u64,
    pub now_ms: u64,
    pub width: f64,
    pub height: f64,
}

pub fn draw(f: &mut Frame, scene: &Scene, sampler: &mut FrameSampler) {
    // Sampling happens out here: paint takes an immutable closure, and the
    // sampler is the one mutable piece of the frame.
    let layer_bars: Vec<Vec<f32>> = scene.layers.iter().map(|_| sampler.sample()).collect();

    let (r, g, b) = scene.oscillator.color(scene.now_ms);
    let bg = Color::Rgb(r, g, b);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .title(" ONE BUTTON CHALLENGE ")
                .borders(Borders::ALL)
                // The frame pulses with the background oscillator.
                .border_style(Style::default().fg(bg)),
        )
        .background_color(bg)
        .x_bounds([0.0, scene.width])
        .y_bounds([0.0, scene.height])
        .paint(|ctx| {
            for (layer, bars) in scene.layers.iter().zip(layer_bars.iter()) {
                let vframe = VisualFrame {
                    bars: bars.as_slice(),
                    tick: scene.tick,
                    width: scene.width,
                    height: scene.height,
                };
                layer.draw(ctx, &vframe);
                ctx.layer();
            }
            draw_playfield(ctx, scene);
            ctx.layer();
            draw_hud(ctx, scene);
        });

    f.render_widget(canvas, f.area());
}

fn draw_playfield(ctx: &mut Context, scene: &Scene) {
    let h = scene.height;
    let game = scene.game;

    // Timing window.
    outline(ctx, h, game.layout.hitbox, Color::DarkGray);

    // Button lights up while held.
    let button_color = if game.is_holding() {
        Color::Yellow
    } else {
        Color::LightRed
    };
    outline(ctx, h, game.layout.button, button_color);
    let (bx, by) = game.layout.button.center();
    ctx.print(
        bx as f64 - 12.0,
        h - by as f64,
        TextLine::styled("TAP", Style::default().fg(button_color)),
    );

    // Hold gauge fills left to right just above the button.
    if let Some(progress) = game.hold_progress(scene.now_ms) {
        let gauge_y = h - game.layout.button.y as f64 + 6.0;
        let x0 = game.layout.button.x as f64;
        ctx.draw(&Line {
            x1: x0,
            y1: gauge_y,
            x2: x0 + progress as f64 * game.layout.button.w as f64,
            y2: gauge_y,
            color: Color::Yellow,
        });
    }

    // The falling note.
    outline(ctx, h, game.note.rect(), Color::White);

    // Explosion particles, one shrinking dot each.
    for p in game.particles.iter() {
        ctx.draw(&Circle {
            x: p.x as f64,
            y: h - p.y as f64,
            radius: (p.size / 2.0) as f64,
            color: Color::Indexed(p.hue),
        });
    }
}

fn draw_hud(ctx: &mut Context, scene: &Scene) {
    let game = scene.game;
    let top = scene.height - 14.0;
    let white = Style::default().fg(Color::White);

    ctx.print(
        8.0,
        top,
        TextLine::styled(
            format!("SCORE {}", game.score),
            white.add_modifier(Modifier::BOLD),
        ),
    );
    ctx.print(
        8.0,
        top - 18.0,
        TextLine::styled(format!("SPEED {:.0}", game.note.speed), white),
    );
    ctx.print(
        scene.width - 280.0,
        top,
        TextLine::styled(
            format!("SONG {} - {}", game.song_index + 1, scene.song_name),
            white,
        ),
    );
    ctx.print(
        scene.width - 280.0,
        top - 18.0,
        TextLine::styled(format!("STYLE {}", scene.style_label), white),
    );
    if let Some(progress) = game.hold_progress(scene.now_ms) {
        ctx.print(
            scene.width / 2.0 - 36.0,
            top,
            TextLine::styled(
                format!("HOLD {:.0}%", progress * 100.0),
                Style::default().fg(Color::Yellow),
            ),
        );
    }
    ctx.print(
        8.0,
        12.0,
        TextLine::styled(
            "click the button on the beat / hold 1s for the next song / q quits",
            Style::default().fg(Color::DarkGray),
        ),
    );
}

/// Game-space rectangle as a canvas outline (flips y).
fn outline(ctx: &mut Context, screen_h: f64, r: Rect, color: Color) {
    ctx.draw(&Rectangle {
        x: r.x as f64,
        y: screen_h - r.bottom() as f64,
        width: r.w as f64,
        height: r.h as f64,
        color,
    });
}
