//! Software-rendered game window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ ROUND: 3   SCORE: 20   PHASE: INPUT          [tinted bar]    │
//! ├──────────────────────────────────────────────────────────────┤
//! │                      GESTURE 2 OF 4                          │
//! │                        TIME: 4.3                             │
//! │            [hand skeleton overlay]      [✓ when held]        │
//! │                                                              │
//! │                   Repeat the sequence                        │
//! │ 1-4=hold pose  H=swap hand  I=start  R=reset  Q=quit         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The window doubles as the input device: `I`/`R`/`Q` drive the game and,
//! in simulation mode, holding `1`-`4` feeds canonical poses to the tracker
//! channel so the real classifier path stays exercised.

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use hand_gesture::{Handedness, HAND_SKELETON, LANDMARK_COUNT};
use simon_game::{Command, GamePhase, GameView};

use crate::tracker::{PoseKey, SimPose, TrackedHand};

use std::sync::mpsc::Sender;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W: usize = 960;
pub const WIN_H: usize = 540;
const STATUS_H:  usize = 56;
const BG_COLOR:  u32   = 0xFF14141E;

const COLOR_MENU:     u32 = 0xFF646464;
const COLOR_SHOW:     u32 = 0xFF64DCFF;
const COLOR_INPUT:    u32 = 0xFF96FF96;
const COLOR_GAMEOVER: u32 = 0xFFFF5050;

const TEXT_COLOR:  u32 = 0xFFEEEEEE;
const DIM_TEXT:    u32 = 0xFFB4B4B4;
const LEGEND_TEXT: u32 = 0xFF888888;
const CHECK_COLOR: u32 = 0xFF50DC50;
const BONE_COLOR:  u32 = 0xFF32C832;
const JOINT_COLOR: u32 = 0xFFFF4646;

fn phase_color(phase: GamePhase) -> u32 {
    match phase {
        GamePhase::Menu     => COLOR_MENU,
        GamePhase::Show     => COLOR_SHOW,
        GamePhase::Input    => COLOR_INPUT,
        GamePhase::GameOver => COLOR_GAMEOVER,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Host input
// ════════════════════════════════════════════════════════════════════════════

/// What the window contributed this frame: a game command, or a quit request.
pub struct HostInput {
    pub command: Option<Command>,
    pub quit:    bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,

    /// Pose channel into the simulated tracker. `None` when real hardware
    /// provides the frames, in which case the pose keys do nothing.
    sim_tx:         Option<Sender<SimPose>>,
    sim_handedness: Handedness,
}

impl Visualizer {
    pub fn new(sim_tx: Option<Sender<SimPose>>) -> Result<Self, String> {
        let mut window = Window::new(
            "Simon Says — Gesture Memory",
            WIN_W,
            WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            sim_handedness: Handedness::Right,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Poll the keyboard, forward any held pose to the simulator, and report
    /// game commands back to the host loop.
    pub fn poll_input(&mut self) -> HostInput {
        if !self.window.is_open() {
            return HostInput {
                command: None,
                quit:    true,
            };
        }

        // Keys that trigger on first press only
        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if one_shot(Key::Q) {
            return HostInput {
                command: None,
                quit:    true,
            };
        }

        let command = if one_shot(Key::I) {
            Some(Command::Start)
        } else if one_shot(Key::R) {
            Some(Command::Reset)
        } else {
            None
        };

        if one_shot(Key::H) {
            self.sim_handedness = self.sim_handedness.other();
        }

        // Pose keys report their held state every frame, so releasing the key
        // reads as "no hand" on the next poll.
        if let Some(tx) = &self.sim_tx {
            let pose = if self.window.is_key_down(Key::Key1) {
                Some(PoseKey::Palm)
            } else if self.window.is_key_down(Key::Key2) {
                Some(PoseKey::Fist)
            } else if self.window.is_key_down(Key::Key3) {
                Some(PoseKey::Point)
            } else if self.window.is_key_down(Key::Key4) {
                Some(PoseKey::ThumbsUp)
            } else {
                None
            };
            let _ = tx.send(SimPose {
                pose,
                handedness: self.sim_handedness,
            });
        }

        HostInput {
            command,
            quit: false,
        }
    }

    /// Render one frame from the game view and the latest tracked hand.
    pub fn render(&mut self, view: &GameView, hand: Option<&TrackedHand>) {
        // Clear
        self.buf.fill(BG_COLOR);

        // ── Hand skeleton underlay ────────────────────────────────────────
        if let Some(h) = hand {
            self.draw_hand(h);
        }

        // ── Phase screen ──────────────────────────────────────────────────
        match view.phase {
            GamePhase::Menu     => self.draw_menu(),
            GamePhase::Show     => self.draw_show(view),
            GamePhase::Input    => self.draw_input(view),
            GamePhase::GameOver => self.draw_game_over(view),
        }

        // ── Status bar ────────────────────────────────────────────────────
        self.blend_rect(0, 0, WIN_W, STATUS_H, phase_color(view.phase), 0.30);
        let status = format!(
            "ROUND: {}   SCORE: {}   PHASE: {}",
            view.round,
            view.score,
            view.phase.name()
        );
        self.draw_text(&status, 14, 14, 3, TEXT_COLOR);

        // ── Prompt line ───────────────────────────────────────────────────
        self.draw_text_centered(&view.message, WIN_H - 58, 2, TEXT_COLOR);

        // ── Key legend ────────────────────────────────────────────────────
        let legend = if self.sim_tx.is_some() {
            "1-4=hold pose  H=swap hand  I=start  R=reset  Q=quit"
        } else {
            "I=start  R=reset  Q=quit"
        };
        self.draw_text(legend, 10, WIN_H - 20, 1, LEGEND_TEXT);

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
    }

    // ── Phase screens ─────────────────────────────────────────────────────

    fn draw_menu(&mut self) {
        self.blend_rect(0, 0, WIN_W, WIN_H, 0xFF000000, 0.45);
        self.draw_text_centered("SIMON SAYS", 140, 8, TEXT_COLOR);
        self.draw_text_centered("WATCH THE GESTURE SEQUENCE, THEN REPEAT IT", 230, 2, DIM_TEXT);
        self.draw_text_centered("PALM   FIST   POINT   THUMBS UP", 262, 2, DIM_TEXT);
        self.draw_text_centered("PRESS I TO START", 330, 4, COLOR_INPUT);
    }

    fn draw_show(&mut self, view: &GameView) {
        // During the gap between gestures nothing is drawn, so each repeat
        // of the same gesture reads as a fresh flash.
        if let Some(target) = view.display_target {
            self.draw_text_centered(target.name(), 210, 8, COLOR_SHOW);
        }
    }

    fn draw_input(&mut self, view: &GameView) {
        if let Some((current, total)) = view.input_progress {
            let progress = format!("GESTURE {} OF {}", current, total);
            self.draw_text_centered(&progress, 170, 4, COLOR_INPUT);
        }
        if let Some(secs) = view.seconds_remaining {
            let color = if secs < 2.0 { COLOR_GAMEOVER } else { TEXT_COLOR };
            self.draw_text_centered(&format!("TIME: {:.1}", secs), 225, 3, color);
        }
        if view.target_held {
            self.draw_checkmark(WIN_W / 2, 330, 36);
        }
    }

    fn draw_game_over(&mut self, view: &GameView) {
        self.blend_rect(0, 0, WIN_W, WIN_H, 0xFF000000, 0.45);
        self.draw_text_centered("GAME OVER", 160, 8, COLOR_GAMEOVER);
        self.draw_text_centered(&format!("FINAL SCORE: {}", view.score), 260, 4, TEXT_COLOR);
        self.draw_text_centered("PRESS R OR I TO PLAY AGAIN", 330, 2, DIM_TEXT);
    }

    // ── Hand overlay ──────────────────────────────────────────────────────

    /// Project the normalized landmarks onto the window and draw bones, then
    /// joints on top.
    fn draw_hand(&mut self, hand: &TrackedHand) {
        if hand.landmarks.len() != LANDMARK_COUNT {
            return;
        }

        let pts: Vec<(isize, isize)> = hand
            .landmarks
            .iter()
            .map(|p| {
                (
                    (p.x * WIN_W as f32) as isize,
                    (p.y * WIN_H as f32) as isize,
                )
            })
            .collect();

        for &(a, b) in HAND_SKELETON.iter() {
            let (x0, y0) = pts[a];
            let (x1, y1) = pts[b];
            self.draw_line(x0, y0, x1, y1, BONE_COLOR);
        }
        for &(x, y) in &pts {
            self.fill_circle(x, y, 3, JOINT_COLOR);
        }
    }

    // ── Confirmation checkmark ────────────────────────────────────────────

    fn draw_checkmark(&mut self, cx: usize, cy: usize, r: usize) {
        let (cx, cy, r) = (cx as isize, cy as isize, r as isize);
        self.draw_circle(cx, cy, r, CHECK_COLOR);
        self.draw_circle(cx, cy, r - 1, CHECK_COLOR);
        for dy in 0..2 {
            self.draw_line(
                cx - r / 2,
                cy + dy,
                cx - r / 6,
                cy + r / 2 + dy,
                CHECK_COLOR,
            );
            self.draw_line(
                cx - r / 6,
                cy + r / 2 + dy,
                cx + r / 2,
                cy - r / 3 + dy,
                CHECK_COLOR,
            );
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                self.buf[row * WIN_W + col] = color;
            }
        }
    }

    /// Like `fill_rect` but mixes `color` over what is already there.
    fn blend_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32, t: f32) {
        for row in y..(y + h).min(WIN_H) {
            for col in x..(x + w).min(WIN_W) {
                let i = row * WIN_W + col;
                self.buf[i] = blend(self.buf[i], color, t);
            }
        }
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    fn draw_line(&mut self, mut x0: isize, mut y0: isize, x1: isize, y1: isize, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn draw_circle(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        let mut x = r;
        let mut y = 0isize;
        let mut err = 1 - r;
        while x >= y {
            for &(px, py) in &[
                (x, y),
                (y, x),
                (-y, x),
                (-x, y),
                (-x, -y),
                (-y, -x),
                (y, -x),
                (x, -y),
            ] {
                self.set_pixel(cx + px, cy + py, color);
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }

    fn fill_circle(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Scaled bitmap text — each font bit becomes a `scale`×`scale` block.
    fn draw_text(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > WIN_W {
                break;
            }
        }
    }

    fn draw_text_centered(&mut self, text: &str, y: usize, scale: usize, color: u32) {
        let x = (WIN_W.saturating_sub(text_width(text, scale))) / 2;
        self.draw_text(text, x, y, scale, color);
    }
}

fn text_width(text: &str, scale: usize) -> usize {
    (text.chars().count() * 4 * scale).saturating_sub(scale)
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _ => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 keeps `a`, `t` = 1.0 gives `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF;
    let br = (b >> 16) & 0xFF;
    let ag = (a >> 8) & 0xFF;
    let bg = (b >> 8) & 0xFF;
    let ab = a & 0xFF;
    let bb = b & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}
