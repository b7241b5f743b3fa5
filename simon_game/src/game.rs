//! The Simon Says state machine.
//!
//! [`SimonGame`] owns every piece of mutable game state and exposes a
//! single mutation path, [`SimonGame::tick`]. The host calls it once per
//! processed frame with the classified gesture, its own clock reading and
//! any pending command, and renders the returned [`GameView`]. All timing
//! is sampled against the supplied `now`; deadlines are stored, never
//! slept on.

use std::time::{Duration, Instant};

use hand_gesture::GestureLabel;

use crate::sequence::GesturePicker;

// ════════════════════════════════════════════════════════════════════════════
// Phases and commands
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Show,
    Input,
    GameOver,
}

impl GamePhase {
    /// Display string for the status bar.
    pub fn name(self) -> &'static str {
        match self {
            GamePhase::Menu     => "MENU",
            GamePhase::Show     => "SHOW",
            GamePhase::Input    => "INPUT",
            GamePhase::GameOver => "GAME OVER",
        }
    }
}

/// The two timed stages of a single replayed element: the target on
/// screen, then a blank beat so repeated gestures read as separate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShowStage {
    Display,
    Gap,
}

/// Host commands, applied at the start of the tick they arrive on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Reset,
}

// ════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════

/// Score awarded for reproducing one full sequence.
pub const POINTS_PER_ROUND: u32 = 10;

/// Game pacing knobs. The defaults are the tuned values; tests shrink them
/// freely since nothing here is ever slept on.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// How long each sequence element stays on screen during the replay.
    pub show_gesture:    Duration,
    /// Blank interval between replayed elements.
    pub show_gap:        Duration,
    /// Time budget per target during input.
    pub gesture_timeout: Duration,
    /// Consecutive matching ticks required to confirm a gesture.
    pub stable_frames:   u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            show_gesture:    Duration::from_millis(1500),
            show_gap:        Duration::from_millis(800),
            gesture_timeout: Duration::from_secs(6),
            stable_frames:   7,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GameView — per-tick render snapshot
// ════════════════════════════════════════════════════════════════════════════

/// Read-only snapshot returned by every tick. The renderer consumes this
/// and nothing else.
#[derive(Clone, Debug)]
pub struct GameView {
    pub phase: GamePhase,
    /// Current round; always equals the sequence length.
    pub round: usize,
    pub score: u32,
    /// Target being replayed; `Some` only during the display stage of SHOW.
    pub display_target: Option<GestureLabel>,
    /// 1-based position within the sequence and its length, during INPUT.
    pub input_progress: Option<(usize, usize)>,
    /// Time left for the current target, during INPUT.
    pub seconds_remaining: Option<f32>,
    /// True while the held gesture matches the current target during INPUT;
    /// drives the success indicator.
    pub target_held: bool,
    /// User-facing status line.
    pub message: String,
}

// ════════════════════════════════════════════════════════════════════════════
// SimonGame
// ════════════════════════════════════════════════════════════════════════════

pub struct SimonGame {
    config: GameConfig,
    picker: Box<dyn GesturePicker>,

    // ── phase ────────────────────────────────────────────────────────────
    phase:   GamePhase,
    message: String,

    // ── sequence and score ───────────────────────────────────────────────
    sequence: Vec<GestureLabel>,
    score:    u32,

    // ── show replay ──────────────────────────────────────────────────────
    show_index:    usize,
    show_stage:    ShowStage,
    stage_started: Instant,

    // ── input tracking ───────────────────────────────────────────────────
    input_index:    usize,
    stable_count:   u32,
    current_target: GestureLabel,
    deadline:       Instant,
    target_held:    bool,
}

impl SimonGame {
    /// A fresh game in the menu, holding a one-element sequence ready for
    /// the first start command.
    pub fn new(config: GameConfig, mut picker: Box<dyn GesturePicker>) -> Self {
        let first = picker.pick();
        SimonGame {
            config,
            picker,
            phase:          GamePhase::Menu,
            message:        "Press I to start".to_string(),
            sequence:       vec![first],
            score:          0,
            show_index:     0,
            show_stage:     ShowStage::Display,
            stage_started:  Instant::now(),
            input_index:    0,
            stable_count:   0,
            current_target: first,
            deadline:       Instant::now(),
            target_held:    false,
        }
    }

    // ── the single entry point ───────────────────────────────────────────

    /// Advance the game by one tick. Never fails; always returns a
    /// well-formed view.
    ///
    /// Commands are applied first and supersede any in-progress timing:
    ///
    /// | phase      | `Start`          | `Reset`          |
    /// |------------|------------------|------------------|
    /// | `Menu`     | full init → Show | no-op            |
    /// | `Show`     | no-op            | full init → Show |
    /// | `Input`    | no-op            | full init → Show |
    /// | `GameOver` | full init → Show | full init → Show |
    pub fn tick(
        &mut self,
        gesture: GestureLabel,
        now: Instant,
        command: Option<Command>,
    ) -> GameView {
        if let Some(cmd) = command {
            self.apply_command(cmd, now);
        }

        match self.phase {
            // Gestures mean nothing outside an active round.
            GamePhase::Menu | GamePhase::GameOver => self.target_held = false,
            GamePhase::Show  => self.tick_show(now),
            GamePhase::Input => self.tick_input(gesture, now),
        }

        self.view(now)
    }

    fn apply_command(&mut self, cmd: Command, now: Instant) {
        match (self.phase, cmd) {
            (GamePhase::Menu, Command::Start)     => self.begin(now),
            (GamePhase::Menu, Command::Reset)     => {}
            (GamePhase::Show, Command::Start)     => {}
            (GamePhase::Input, Command::Start)    => {}
            (GamePhase::Show, Command::Reset)     => self.begin(now),
            (GamePhase::Input, Command::Reset)    => self.begin(now),
            (GamePhase::GameOver, _)              => self.begin(now),
        }
    }

    // ── phase logic ──────────────────────────────────────────────────────

    fn tick_show(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.stage_started);
        match self.show_stage {
            ShowStage::Display if elapsed >= self.config.show_gesture => {
                self.show_stage = ShowStage::Gap;
                self.stage_started = now;
            }
            ShowStage::Gap if elapsed >= self.config.show_gap => {
                self.show_index += 1;
                if self.show_index == self.sequence.len() {
                    self.enter_input(now);
                } else {
                    self.show_stage = ShowStage::Display;
                    self.stage_started = now;
                }
            }
            _ => {}
        }
    }

    fn tick_input(&mut self, gesture: GestureLabel, now: Instant) {
        // Deadline first: a tick arriving at or past it ends the game even
        // if it would also have completed the stability window.
        if now >= self.deadline {
            self.game_over();
            return;
        }

        if gesture == self.current_target {
            self.stable_count += 1;
        } else {
            self.stable_count = 0;
        }
        if self.stable_count >= self.config.stable_frames {
            self.advance_target(now);
        }

        // The indicator tracks whatever target is current after an advance,
        // so a confirm never flashes a stale checkmark.
        self.target_held =
            self.phase == GamePhase::Input && gesture == self.current_target;
    }

    // ── transitions ──────────────────────────────────────────────────────

    /// Full reinitialization: fresh one-element sequence, zero score,
    /// replay from the top.
    fn begin(&mut self, now: Instant) {
        let first = self.picker.pick();
        self.sequence = vec![first];
        self.score = 0;
        self.current_target = first;
        self.input_index = 0;
        self.stable_count = 0;
        self.target_held = false;
        self.enter_show(now);
    }

    fn enter_show(&mut self, now: Instant) {
        self.phase = GamePhase::Show;
        self.show_index = 0;
        self.show_stage = ShowStage::Display;
        self.stage_started = now;
        self.message = "Watch the sequence".to_string();
    }

    fn enter_input(&mut self, now: Instant) {
        self.phase = GamePhase::Input;
        self.input_index = 0;
        self.current_target = self.sequence[0];
        self.stable_count = 0;
        self.deadline = now + self.config.gesture_timeout;
        self.message = "Repeat the sequence".to_string();
    }

    fn advance_target(&mut self, now: Instant) {
        self.input_index += 1;
        self.stable_count = 0;
        if self.input_index == self.sequence.len() {
            // Round complete: score it, grow the sequence, replay.
            self.score += POINTS_PER_ROUND;
            let next = self.picker.pick();
            self.sequence.push(next);
            self.enter_show(now);
        } else {
            self.current_target = self.sequence[self.input_index];
            // The timeout is per-target, not per-round.
            self.deadline = now + self.config.gesture_timeout;
        }
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.target_held = false;
        self.message = "Game over! Press R or I".to_string();
    }

    // ── view ─────────────────────────────────────────────────────────────

    fn view(&self, now: Instant) -> GameView {
        let display_target = match (self.phase, self.show_stage) {
            (GamePhase::Show, ShowStage::Display) => Some(self.sequence[self.show_index]),
            _ => None,
        };
        let input_progress = (self.phase == GamePhase::Input)
            .then(|| (self.input_index + 1, self.sequence.len()));
        let seconds_remaining = (self.phase == GamePhase::Input)
            .then(|| self.deadline.saturating_duration_since(now).as_secs_f32());

        GameView {
            phase: self.phase,
            round: self.round(),
            score: self.score,
            display_target,
            input_progress,
            seconds_remaining,
            target_held: self.phase == GamePhase::Input && self.target_held,
            message: self.message.clone(),
        }
    }

    // ── Accessors for the host and tests ─────────────────────────────────

    pub fn phase(&self) -> GamePhase { self.phase }

    /// Round number, derived from the sequence rather than stored.
    pub fn round(&self) -> usize { self.sequence.len() }

    pub fn score(&self) -> u32 { self.score }
    pub fn sequence(&self) -> &[GestureLabel] { &self.sequence }
    pub fn show_index(&self) -> usize { self.show_index }
    pub fn show_stage(&self) -> ShowStage { self.show_stage }
    pub fn input_index(&self) -> usize { self.input_index }
    pub fn stable_count(&self) -> u32 { self.stable_count }
    pub fn current_target(&self) -> GestureLabel { self.current_target }
    pub fn message(&self) -> &str { &self.message }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
