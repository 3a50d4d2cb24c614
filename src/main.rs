use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Size, Terminal};
use std::{
    fs::File,
    io,
    path::Path,
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use notefall::audio::{SilentPlayer, SongPlayer, TonePlayer};
use notefall::cli::Args;
use notefall::config::GameConfig;
use notefall::game::{GameEvent, GameState, InputEvent};
use notefall::oscillator::BackgroundOscillator;
use notefall::render::{self, Scene};
use notefall::spectrum::{FrameSampler, SyntheticSpectrum};
use notefall::visualizers::{self, Visualizer};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;
    let cfg = args.to_config();

    // 1. Audio Setup (never fatal: failures downgrade to silence)
    let mut player: Box<dyn SongPlayer> = if args.mute {
        Box::new(SilentPlayer)
    } else {
        match TonePlayer::new() {
            Ok(p) => Box::new(p),
            Err(err) => {
                warn!("audio disabled: {err}");
                Box::new(SilentPlayer)
            }
        }
    };

    // 2. Terminal Setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &cfg, &args, player.as_mut());

    // Cleanup
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: &GameConfig,
    args: &Args,
    player: &mut dyn SongPlayer,
) -> Result<()> {
    let start = Instant::now();
    let mut game = GameState::new(cfg);
    let mut oscillator = BackgroundOscillator::new(
        0,
        cfg.visual.oscillator_rate,
        cfg.visual.duration_ms,
        cfg.visual.base_green,
    );
    let mut sampler = FrameSampler::new(
        Box::new(SyntheticSpectrum::new(
            cfg.visual.bar_count,
            cfg.visual.peak_amplitude,
            cfg.visual.chunk_size,
        )),
        cfg.visual.shared_frame_sample,
    );

    let layers = visualizers::all_layers();
    // An explicit --style list is a fixed stack; otherwise Tab walks the
    // single-layer rotation.
    let mut stack = args.layer_stack();
    let mut cursor = 0usize;

    switch_song(player, &cfg.songs[0]);

    let tick_len = Duration::from_millis(1000 / cfg.tick_hz.max(1) as u64);
    let mut tick: u64 = 0;

    // 3. Main Loop
    loop {
        let tick_start = Instant::now();
        let now_ms = start.elapsed().as_millis() as u64;
        let size = terminal.size()?;

        // Drain every pending event before simulating.
        let mut pending: Vec<InputEvent> = Vec::new();
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => pending.push(InputEvent::Quit),
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        pending.push(InputEvent::Quit)
                    }
                    KeyCode::Tab | KeyCode::Char('n') => {
                        if stack.is_empty() {
                            cursor = (cursor + 1) % layers.len();
                        } else {
                            // Reordering a stacked session is still useful:
                            // layers draw over each other back to front.
                            stack.rotate_left(1);
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => {
                    if let Some(input) = translate_mouse(mouse, size, cfg) {
                        pending.push(input);
                    }
                }
                _ => {}
            }
        }

        let mut quit = false;
        for input in pending {
            if input == InputEvent::Quit {
                quit = true;
                continue;
            }
            if let Some(ev) = game.handle_event(input, now_ms) {
                apply_event(ev, cfg, player, &mut oscillator, now_ms);
            }
        }
        if quit {
            break;
        }

        // Advance the simulation one tick.
        for ev in game.tick(now_ms) {
            apply_event(ev, cfg, player, &mut oscillator, now_ms);
        }

        // Render.
        let active: Vec<&dyn Visualizer> = if stack.is_empty() {
            vec![layers[cursor].as_ref()]
        } else {
            stack.iter().map(|&i| layers[i].as_ref()).collect()
        };
        let style_label = active
            .iter()
            .map(|l| l.name())
            .collect::<Vec<_>>()
            .join("+");
        let song = song_name(&cfg.songs[game.song_index % cfg.songs.len()]);

        sampler.begin_frame();
        let scene = Scene {
            game: &game,
            oscillator: &oscillator,
            layers: &active,
            song_name: &song,
            style_label: &style_label,
            tick,
            now_ms,
            width: cfg.width as f64,
            height: cfg.height as f64,
        };
        terminal.draw(|f| render::draw(f, &scene, &mut sampler))?;
        tick = tick.wrapping_add(1);

        // Pace to the tick rate.
        let spent = tick_start.elapsed();
        if spent < tick_len {
            std::thread::sleep(tick_len - spent);
        }
    }

    info!(
        "session over: score {}, song {}",
        game.score,
        game.song_index + 1
    );
    Ok(())
}

fn apply_event(
    ev: GameEvent,
    cfg: &GameConfig,
    player: &mut dyn SongPlayer,
    oscillator: &mut BackgroundOscillator,
    now_ms: u64,
) {
    match ev {
        GameEvent::NoteHit { score } => debug!("hit, score {score}"),
        GameEvent::NoteMissed => debug!("note slipped past"),
        GameEvent::SongChanged { index } => {
            info!("hold gesture: switching to song {}", index + 1);
            oscillator.restart(now_ms);
            switch_song(player, &cfg.songs[index % cfg.songs.len()]);
        }
    }
}

/// Load-and-play with failures logged, never surfaced. The game index moves
/// on regardless; only the audible track stays behind.
fn switch_song(player: &mut dyn SongPlayer, path: &Path) {
    match player.load(path).and_then(|_| player.play()) {
        Ok(()) => info!("now playing {}", path.display()),
        Err(err) => warn!("song unavailable, keeping the previous track: {err}"),
    }
}

fn song_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Terminal cell -> logical playfield coordinates. The canvas sits inside a
/// one-cell border, hence the inset.
fn translate_mouse(mouse: MouseEvent, size: Size, cfg: &GameConfig) -> Option<InputEvent> {
    let cols = size.width.saturating_sub(2).max(1) as f32;
    let rows = size.height.saturating_sub(2).max(1) as f32;
    let col = mouse.column.saturating_sub(1) as f32;
    let row = mouse.row.saturating_sub(1) as f32;
    let x = (col + 0.5) / cols * cfg.width;
    let y = (row + 0.5) / rows * cfg.height;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::Press { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::Release { x, y }),
        _ => None,
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            // Raw mode swallows these mid-session; they surface on exit or
            // via a redirect.
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}
