//! The note-timing loop: one falling note, one button, one hold gesture.
//!
//! Time never comes from inside this module. Every entry point takes the
//! current clock in milliseconds, so ticks and gestures replay exactly the
//! same way in tests as they do in the live loop.

use crate::config::GameConfig;
use crate::geom::Rect;
use crate::particles::ParticleField;

/// Pointer input after translation to logical playfield coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    Press { x: f32, y: f32 },
    Release { x: f32, y: f32 },
}

/// Outcomes the run loop turns into side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    NoteHit { score: u32 },
    NoteMissed,
    SongChanged { index: usize },
}

/// The falling note. `y` is the top edge; `x` stays pinned to the button's
/// center column.
#[derive(Debug, Clone, Copy)]
pub struct Note {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
}

impl Note {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x - self.size / 2.0, self.y, self.size, self.size)
    }
}

/// Button and hitbox regions, fixed for the whole session.
#[derive(Debug, Clone, Copy)]
pub struct PlayfieldLayout {
    pub button: Rect,
    pub hitbox: Rect,
}

impl PlayfieldLayout {
    const BUTTON_W: f32 = 120.0;
    const BUTTON_H: f32 = 90.0;
    const BUTTON_BOTTOM_MARGIN: f32 = 30.0;
    const HITBOX_H: f32 = 70.0;

    /// Button centered near the bottom edge, hitbox flush on its top edge.
    pub fn from_screen(width: f32, height: f32) -> Self {
        let button = Rect::new(
            (width - Self::BUTTON_W) / 2.0,
            height - Self::BUTTON_BOTTOM_MARGIN - Self::BUTTON_H,
            Self::BUTTON_W,
            Self::BUTTON_H,
        );
        let hitbox = Rect::new(button.x, button.y - Self::HITBOX_H, button.w, Self::HITBOX_H);
        Self { button, hitbox }
    }
}

/// Full game state, advanced one tick at a time.
pub struct GameState {
    pub note: Note,
    pub layout: PlayfieldLayout,
    pub score: u32,
    pub song_index: usize,
    pub particles: ParticleField,
    press_started_ms: Option<u64>,
    width: f32,
    height: f32,
    base_speed: f32,
    speed_per_hit: f32,
    hold_threshold_ms: u64,
    song_count: usize,
}

impl GameState {
    pub fn new(cfg: &GameConfig) -> Self {
        let layout = PlayfieldLayout::from_screen(cfg.width, cfg.height);
        let note = Note {
            x: cfg.width / 2.0,
            y: 0.0,
            size: cfg.note_size,
            speed: cfg.base_note_speed,
        };
        Self {
            note,
            layout,
            score: 0,
            song_index: 0,
            particles: ParticleField::new(cfg.particles.clone()),
            press_started_ms: None,
            width: cfg.width,
            height: cfg.height,
            base_speed: cfg.base_note_speed,
            speed_per_hit: cfg.speed_per_hit,
            hold_threshold_ms: cfg.hold_threshold_ms,
            song_count: cfg.songs.len().max(1),
        }
    }

    /// Milliseconds the button has been held, if a press is live.
    pub fn hold_elapsed(&self, now_ms: u64) -> Option<u64> {
        self.press_started_ms.map(|t| now_ms.saturating_sub(t))
    }

    pub fn is_holding(&self) -> bool {
        self.press_started_ms.is_some()
    }

    /// Fraction of the hold threshold reached, for the HUD gauge.
    pub fn hold_progress(&self, now_ms: u64) -> Option<f32> {
        self.hold_elapsed(now_ms)
            .map(|e| (e as f32 / self.hold_threshold_ms as f32).min(1.0))
    }

    /// Route one input event. `Quit` is the run loop's business and passes
    /// through untouched.
    pub fn handle_event(&mut self, event: InputEvent, now_ms: u64) -> Option<GameEvent> {
        match event {
            InputEvent::Press { x, y } => self.handle_press(x, y, now_ms),
            InputEvent::Release { .. } => {
                self.press_started_ms = None;
                None
            }
            InputEvent::Quit => None,
        }
    }

    fn handle_press(&mut self, x: f32, y: f32, now_ms: u64) -> Option<GameEvent> {
        if !self.layout.button.contains(x, y) {
            return None;
        }
        // Every press on the button arms the hold timer, hit or not.
        self.press_started_ms = Some(now_ms);

        if self.note.rect().intersects(&self.layout.hitbox) {
            self.score += 1;
            self.note.y = 0.0;
            self.note.speed += self.speed_per_hit;
            // Twin celebration bursts at fixed points left and right of center.
            self.particles.spawn_explosion(self.width / 4.0, self.height / 2.0);
            self.particles
                .spawn_explosion(3.0 * self.width / 4.0, self.height / 2.0);
            return Some(GameEvent::NoteHit { score: self.score });
        }
        None
    }

    /// One simulation step: move the note, advance particles, then run the
    /// level-triggered hold check.
    pub fn tick(&mut self, now_ms: u64) -> Vec<GameEvent> {
        let mut events = Vec::new();

        self.note.y += self.note.speed;
        if self.note.y > self.height {
            // A miss costs nothing but the wait.
            self.note.y = 0.0;
            events.push(GameEvent::NoteMissed);
        }

        self.particles.advance();

        if let Some(started) = self.press_started_ms {
            if now_ms.saturating_sub(started) >= self.hold_threshold_ms {
                self.song_index = (self.song_index + 1) % self.song_count;
                self.score = 0;
                self.note.y = 0.0;
                self.note.speed = self.base_speed;
                self.press_started_ms = None;
                events.push(GameEvent::SongChanged {
                    index: self.song_index,
                });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn state() -> GameState {
        GameState::new(&GameConfig::default())
    }

    fn button_center(s: &GameState) -> (f32, f32) {
        s.layout.button.center()
    }

    /// Drop the note into the hitbox band without simulating the fall.
    fn park_note_in_hitbox(s: &mut GameState) {
        s.note.y = s.layout.hitbox.y + 10.0;
    }

    #[test]
    fn layout_matches_the_800x600_playfield() {
        let s = state();
        assert_eq!(s.layout.button.x, 340.0);
        assert_eq!(s.layout.button.y, 480.0);
        assert_eq!(s.layout.hitbox.y, 410.0);
        assert_eq!(s.layout.hitbox.bottom(), s.layout.button.y);
    }

    #[test]
    fn press_in_button_with_note_overlap_scores() {
        let mut s = state();
        park_note_in_hitbox(&mut s);
        let (bx, by) = button_center(&s);

        let ev = s.handle_event(InputEvent::Press { x: bx, y: by }, 100);
        assert_eq!(ev, Some(GameEvent::NoteHit { score: 1 }));
        assert_eq!(s.score, 1);
        assert_eq!(s.note.y, 0.0);
        assert_eq!(s.note.speed, 6.0);
        assert_eq!(s.particles.len(), 60); // two bursts of thirty
    }

    #[test]
    fn press_in_button_without_overlap_only_arms_the_hold() {
        let mut s = state();
        s.note.y = 0.0; // far from the hitbox
        let (bx, by) = button_center(&s);

        let ev = s.handle_event(InputEvent::Press { x: bx, y: by }, 100);
        assert_eq!(ev, None);
        assert_eq!(s.score, 0);
        assert!(s.is_holding());
        assert!(s.particles.is_empty());
    }

    #[test]
    fn press_outside_button_is_ignored_even_on_a_note_overlap() {
        let mut s = state();
        park_note_in_hitbox(&mut s);

        let ev = s.handle_event(InputEvent::Press { x: 10.0, y: 10.0 }, 100);
        assert_eq!(ev, None);
        assert_eq!(s.score, 0);
        assert!(!s.is_holding());
    }

    #[test]
    fn note_wraps_to_top_on_a_miss_without_penalty() {
        let mut s = state();
        s.score = 3;
        s.note.y = 599.0;
        let events = s.tick(0);
        assert_eq!(events, vec![GameEvent::NoteMissed]);
        assert_eq!(s.note.y, 0.0);
        assert_eq!(s.score, 3);
        assert_eq!(s.note.speed, 5.0);
    }

    #[test]
    fn note_lands_exactly_on_the_edge_without_wrapping() {
        let mut s = state();
        s.note.y = 595.0; // 595 + 5 == 600, not past it
        let events = s.tick(0);
        assert!(events.is_empty());
        assert_eq!(s.note.y, 600.0);

        let events = s.tick(0);
        assert_eq!(events, vec![GameEvent::NoteMissed]);
        assert_eq!(s.note.y, 0.0);
    }

    #[test]
    fn hold_for_a_second_switches_songs_and_resets_the_run() {
        let mut s = state();
        s.score = 4;
        s.note.speed = 9.0;
        let (bx, by) = button_center(&s);

        s.handle_event(InputEvent::Press { x: bx, y: by }, 0);
        assert!(s.tick(999).is_empty());

        let events = s.tick(1000);
        assert_eq!(events, vec![GameEvent::SongChanged { index: 1 }]);
        assert_eq!(s.score, 0);
        assert_eq!(s.note.speed, 5.0);
        assert_eq!(s.note.y, 0.0);
        assert!(!s.is_holding());

        // The gesture fired once; holding is over until the next press.
        assert!(s.tick(2000).is_empty());
    }

    #[test]
    fn release_before_the_threshold_cancels_the_hold() {
        let mut s = state();
        let (bx, by) = button_center(&s);

        s.handle_event(InputEvent::Press { x: bx, y: by }, 0);
        s.handle_event(InputEvent::Release { x: bx, y: by }, 500);
        assert!(!s.is_holding());
        assert!(s.tick(2000).is_empty());
        assert_eq!(s.song_index, 0);
    }

    #[test]
    fn song_cycle_wraps_around() {
        let mut s = state(); // three songs configured by default
        let (bx, by) = button_center(&s);

        for expected in [1, 2, 0] {
            s.handle_event(InputEvent::Press { x: bx, y: by }, 0);
            let events = s.tick(1000);
            assert_eq!(events, vec![GameEvent::SongChanged { index: expected }]);
        }
    }

    #[test]
    fn hold_progress_saturates_at_one() {
        let mut s = state();
        let (bx, by) = button_center(&s);
        assert_eq!(s.hold_progress(0), None);

        s.handle_event(InputEvent::Press { x: bx, y: by }, 0);
        assert_eq!(s.hold_progress(500), Some(0.5));
        assert_eq!(s.hold_progress(5000), Some(1.0));
    }

    #[test]
    fn quit_leaves_the_state_untouched() {
        let mut s = state();
        let ev = s.handle_event(InputEvent::Quit, 0);
        assert_eq!(ev, None);
        assert_eq!(s.score, 0);
        assert!(!s.is_holding());
    }
}
