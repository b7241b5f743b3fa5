use std::time::{Duration, Instant};

use hand_gesture::GestureLabel;
use simon_game::{Command, GameConfig, GamePhase, ScriptedPicker, ShowStage, SimonGame};

/// One simulated camera frame.
pub const TICK: Duration = Duration::from_millis(33);

/// Creates a default-config game with a scripted picker.
///
/// Draw order: one label at construction, one on every start/reset, one per
/// completed round.
pub fn scripted_game(labels: &[GestureLabel]) -> SimonGame {
    SimonGame::new(
        GameConfig::default(),
        Box::new(ScriptedPicker::new(labels.to_vec())),
    )
}

/// Starts the game at `t0` and replays the whole SHOW phase, returning the
/// time of the tick that entered INPUT. Assumes the default config.
pub fn start_game(game: &mut SimonGame, t0: Instant) -> Instant {
    game.tick(GestureLabel::Unknown, t0, Some(Command::Start));
    skip_show(game, t0)
}

/// Steps through SHOW with boundary-sized time jumps.
pub fn skip_show(game: &mut SimonGame, mut t: Instant) -> Instant {
    let cfg = GameConfig::default();
    assert_eq!(game.phase(), GamePhase::Show);
    while game.phase() == GamePhase::Show {
        t += match game.show_stage() {
            ShowStage::Display => cfg.show_gesture,
            ShowStage::Gap     => cfg.show_gap,
        };
        game.tick(GestureLabel::Unknown, t, None);
    }
    assert_eq!(game.phase(), GamePhase::Input);
    t
}

/// Holds `gesture` for `n` frame-spaced ticks after `t`; returns the time
/// of the last tick.
pub fn hold(game: &mut SimonGame, gesture: GestureLabel, mut t: Instant, n: u32) -> Instant {
    for _ in 0..n {
        t += TICK;
        game.tick(gesture, t, None);
    }
    t
}

/// Completes every remaining target of the current INPUT phase.
pub fn complete_round(game: &mut SimonGame, mut t: Instant) -> Instant {
    assert_eq!(game.phase(), GamePhase::Input);
    while game.phase() == GamePhase::Input {
        let target = game.current_target();
        t = hold(game, target, t, 7);
    }
    assert_eq!(game.phase(), GamePhase::Show);
    t
}

/// Drives a fresh-started game into GAME_OVER by letting the first target
/// time out.
pub fn drive_to_game_over(game: &mut SimonGame, t0: Instant) -> Instant {
    let t1 = start_game(game, t0);
    let t2 = t1 + GameConfig::default().gesture_timeout;
    game.tick(GestureLabel::Unknown, t2, None);
    assert_eq!(game.phase(), GamePhase::GameOver);
    t2
}
