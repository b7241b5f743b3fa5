//! Application glue.
//!
//! Owns the pieces the pure game logic must not know about: the hand source
//! thread, the window, wall-clock time and the classification boundary where
//! tracking frames become [`GestureLabel`]s.

use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use hand_gesture::{classify, GestureLabel};
use simon_game::{GameConfig, SimonGame, UniformPicker};

#[cfg(feature = "leap")]
use crate::tracker::LeapHandSource;
#[cfg(not(feature = "leap"))]
use crate::tracker::SimHandSource;
use crate::tracker::{spawn_hand_source, HandFrame, TrackedHand};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
pub struct AppConfig {
    pub game: GameConfig,
    /// Fix the sequence RNG so the same gestures come up every run.
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            game: GameConfig::default(),
            seed: None,
        }
    }
}

/// Parse command line flags into an [`AppConfig`].
///
/// Recognized flags: `--seed N`, `--timeout SECONDS`, `--stable FRAMES`.
pub fn parse_args(args: &[String]) -> Result<AppConfig, String> {
    let mut cfg = AppConfig::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                cfg.seed = Some(flag_value(args, i, "--seed")?);
            }
            "--timeout" => {
                i += 1;
                let secs: f32 = flag_value(args, i, "--timeout")?;
                if !secs.is_finite() || secs <= 0.0 {
                    return Err("--timeout must be a positive number of seconds".to_string());
                }
                cfg.game.gesture_timeout = Duration::from_secs_f32(secs);
            }
            "--stable" => {
                i += 1;
                let frames: u32 = flag_value(args, i, "--stable")?;
                if frames == 0 {
                    return Err("--stable must be at least 1".to_string());
                }
                cfg.game.stable_frames = frames;
            }
            other => return Err(format!("unknown flag: {}", other)),
        }
        i += 1;
    }

    Ok(cfg)
}

fn flag_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = args.get(i).ok_or_else(|| format!("{} expects a value", flag))?;
    raw.parse()
        .map_err(|_| format!("{} cannot parse {:?}", flag, raw))
}

// ════════════════════════════════════════════════════════════════════════════
// Classification boundary
// ════════════════════════════════════════════════════════════════════════════

/// Turn a tracking frame into the label the game consumes.
///
/// An empty frame reads as [`GestureLabel::Unknown`], and a malformed
/// landmark set degrades to `Unknown` with a warning rather than taking the
/// game down. The game treats `Unknown` as "nothing held", so both cases
/// simply pause any in-progress stability count.
pub fn detect(frame: &HandFrame) -> GestureLabel {
    match &frame.hand {
        None => GestureLabel::Unknown,
        Some(hand) => match classify(&hand.landmarks, hand.handedness) {
            Ok(label) => label,
            Err(e) => {
                log::warn!("dropping malformed tracking frame: {}", e);
                GestureLabel::Unknown
            }
        },
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application.
///
/// This is the entry point called from `main.rs`. It spawns the hand source
/// (simulation by default, hardware with `--features leap`), creates the
/// window, and drives the classify/tick/render loop at ~60 fps.
pub fn run(cfg: AppConfig) -> Result<(), String> {
    // ── Hand source ───────────────────────────────────────────────────────
    #[cfg(feature = "leap")]
    let (hand_rx, sim_tx) = (spawn_hand_source(LeapHandSource), None);

    #[cfg(not(feature = "leap"))]
    let (hand_rx, sim_tx) = {
        let (pose_tx, pose_rx) = std::sync::mpsc::channel();
        (spawn_hand_source(SimHandSource { rx: pose_rx }), Some(pose_tx))
    };

    // ── Visualizer (owns the window and the sim pose sender) ─────────────
    let mut vis = Visualizer::new(sim_tx)?;

    // ── Game ──────────────────────────────────────────────────────────────
    let picker = match cfg.seed {
        Some(seed) => UniformPicker::seeded(seed),
        None => UniformPicker::new(),
    };
    let mut game = SimonGame::new(cfg.game, Box::new(picker));

    // ── Main loop ─────────────────────────────────────────────────────────
    let mut last_hand: Option<TrackedHand> = None;
    let mut gesture = GestureLabel::Unknown;

    while vis.is_open() {
        // 1. Poll window input → command, quit, sim pose
        let input = vis.poll_input();
        if input.quit {
            break;
        }

        // 2. Drain tracking frames, classifying the newest
        loop {
            match hand_rx.try_recv() {
                Ok(frame) => {
                    gesture = detect(&frame);
                    last_hand = frame.hand;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("hand source stopped; shutting down");
                    return Ok(());
                }
            }
        }

        // 3. Advance the game
        let view = game.tick(gesture, Instant::now(), input.command);

        // 4. Render
        vis.render(&view, last_hand.as_ref());
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{sim_hand, PoseKey};
    use hand_gesture::{HandLandmarks, Handedness, Landmark};
    use simon_game::{Command, GamePhase, ScriptedPicker, POINTS_PER_ROUND};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // ── flag parsing ───────────────────────────────────────────────────────

    #[test]
    fn no_flags_yield_the_default_config() {
        let cfg = parse_args(&[]).unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.game.gesture_timeout, GameConfig::default().gesture_timeout);
        assert_eq!(cfg.game.stable_frames, GameConfig::default().stable_frames);
    }

    #[test]
    fn seed_flag_is_parsed() {
        let cfg = parse_args(&args(&["--seed", "42"])).unwrap();
        assert_eq!(cfg.seed, Some(42));
    }

    #[test]
    fn timeout_flag_rescales_the_deadline() {
        let cfg = parse_args(&args(&["--timeout", "2.5"])).unwrap();
        assert_eq!(cfg.game.gesture_timeout, Duration::from_millis(2500));
    }

    #[test]
    fn stable_flag_overrides_the_frame_count() {
        let cfg = parse_args(&args(&["--stable", "3"])).unwrap();
        assert_eq!(cfg.game.stable_frames, 3);
    }

    #[test]
    fn flags_combine() {
        let cfg = parse_args(&args(&["--seed", "7", "--timeout", "10", "--stable", "12"])).unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.game.gesture_timeout, Duration::from_secs(10));
        assert_eq!(cfg.game.stable_frames, 12);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }

    #[test]
    fn missing_values_are_rejected() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--timeout"])).is_err());
    }

    #[test]
    fn garbage_values_are_rejected() {
        assert!(parse_args(&args(&["--seed", "banana"])).is_err());
        assert!(parse_args(&args(&["--stable", "-1"])).is_err());
    }

    #[test]
    fn nonpositive_timeouts_are_rejected() {
        assert!(parse_args(&args(&["--timeout", "0"])).is_err());
        assert!(parse_args(&args(&["--timeout", "-3"])).is_err());
        assert!(parse_args(&args(&["--timeout", "NaN"])).is_err());
    }

    #[test]
    fn zero_stable_frames_are_rejected() {
        assert!(parse_args(&args(&["--stable", "0"])).is_err());
    }

    // ── classification boundary ────────────────────────────────────────────

    #[test]
    fn an_empty_frame_reads_as_unknown() {
        let frame = HandFrame { hand: None };
        assert_eq!(detect(&frame), GestureLabel::Unknown);
    }

    #[test]
    fn sim_poses_classify_through_the_frame_boundary() {
        let frame = HandFrame {
            hand: Some(sim_hand(PoseKey::Palm, Handedness::Right)),
        };
        assert_eq!(detect(&frame), GestureLabel::Palm);
    }

    #[test]
    fn malformed_landmarks_degrade_to_unknown() {
        let frame = HandFrame {
            hand: Some(TrackedHand {
                landmarks:  HandLandmarks::from_points(vec![Landmark::new(0.5, 0.5); 20]),
                handedness: Handedness::Right,
            }),
        };
        assert_eq!(detect(&frame), GestureLabel::Unknown);
    }

    // ── frames through the whole stack ─────────────────────────────────────

    #[test]
    fn classified_sim_frames_drive_a_full_round() {
        let picker = ScriptedPicker::new(vec![GestureLabel::Palm]);
        let mut game = SimonGame::new(GameConfig::default(), Box::new(picker));

        let t0 = Instant::now();
        game.tick(GestureLabel::Unknown, t0, Some(Command::Start));

        // One displayed gesture plus its gap, then input opens.
        let empty = HandFrame { hand: None };
        game.tick(detect(&empty), t0 + Duration::from_millis(1500), None);
        game.tick(detect(&empty), t0 + Duration::from_millis(2300), None);
        assert_eq!(game.phase(), GamePhase::Input);

        let palm = HandFrame {
            hand: Some(sim_hand(PoseKey::Palm, Handedness::Right)),
        };
        let mut t = t0 + Duration::from_millis(2300);
        for _ in 0..GameConfig::default().stable_frames {
            t += Duration::from_millis(33);
            game.tick(detect(&palm), t, None);
        }

        assert_eq!(game.score(), POINTS_PER_ROUND);
        assert_eq!(game.phase(), GamePhase::Show);
    }
}
