mod common;

use std::time::{Duration, Instant};

use common::*;
use hand_gesture::GestureLabel::{Fist, Palm, Point, ThumbsUp, Unknown};
use simon_game::{Command, GameConfig, GamePhase, SimonGame, UniformPicker, POINTS_PER_ROUND};

#[test]
fn single_palm_round_end_to_end() {
    // Construction draws Fist; start draws Palm, so the player faces [Palm].
    let mut game = scripted_game(&[Fist, Palm, Point]);
    let t1 = start_game(&mut game, Instant::now());
    assert_eq!(game.sequence(), &[Palm]);

    let t = hold(&mut game, Palm, t1, 6);
    assert_eq!(game.phase(), GamePhase::Input);

    game.tick(Palm, t + TICK, None);
    assert_eq!(game.phase(), GamePhase::Show);
    assert_eq!(game.score(), POINTS_PER_ROUND);
    assert_eq!(game.sequence(), &[Palm, Point]);
    assert_eq!(game.round(), 2);
}

#[test]
fn wrong_gesture_times_out_with_zero_score() {
    let mut game = scripted_game(&[Palm, Fist]);
    let t1 = start_game(&mut game, Instant::now());
    assert_eq!(game.sequence(), &[Fist]);

    // Holding the wrong gesture builds no stability at all.
    let mut t = t1;
    for _ in 0..7 {
        t += TICK;
        game.tick(Point, t, None);
        assert_eq!(game.stable_count(), 0);
    }
    assert_eq!(game.phase(), GamePhase::Input);

    game.tick(Point, t1 + GameConfig::default().gesture_timeout, None);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.score(), 0);
}

#[test]
fn failing_round_two_keeps_round_one_score() {
    // Active sequence after the first round: [Fist, Point].
    let mut game = scripted_game(&[Palm, Fist, Point]);
    let t1 = start_game(&mut game, Instant::now());
    let t2 = complete_round(&mut game, t1);
    assert_eq!(game.sequence(), &[Fist, Point]);
    assert_eq!(game.score(), POINTS_PER_ROUND);

    // Round two: answer Point while Fist is expected, then stall out.
    let t3 = skip_show(&mut game, t2);
    let t = hold(&mut game, Point, t3, 7);
    assert_eq!(game.stable_count(), 0);
    assert_eq!(game.input_index(), 0);

    game.tick(Point, t.max(t3 + GameConfig::default().gesture_timeout), None);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.score(), POINTS_PER_ROUND);
}

#[test]
fn three_round_marathon_follows_the_script() {
    // Construction and start both draw Palm; rounds append the rest.
    let mut game = scripted_game(&[Palm, Palm, Fist, Point, ThumbsUp]);
    let mut t = start_game(&mut game, Instant::now());
    assert_eq!(game.sequence(), &[Palm]);

    for _ in 0..3 {
        t = complete_round(&mut game, t);
        if game.round() < 4 {
            t = skip_show(&mut game, t);
        }
    }

    assert_eq!(game.sequence(), &[Palm, Fist, Point, ThumbsUp]);
    assert_eq!(game.round(), 4);
    assert_eq!(game.score(), 3 * POINTS_PER_ROUND);
}

#[test]
fn every_phase_command_pair_has_its_outcome() {
    let t0 = Instant::now();

    // Menu: Start begins, Reset does nothing.
    let mut game = scripted_game(&[Palm]);
    game.tick(Unknown, t0, Some(Command::Reset));
    assert_eq!(game.phase(), GamePhase::Menu);
    game.tick(Unknown, t0, Some(Command::Start));
    assert_eq!(game.phase(), GamePhase::Show);

    // Show: Start is a no-op, Reset restarts the round.
    let mut game = scripted_game(&[Palm]);
    game.tick(Unknown, t0, Some(Command::Start));
    let view = game.tick(Unknown, t0 + TICK, Some(Command::Start));
    assert_eq!(view.phase, GamePhase::Show);
    let view = game.tick(Unknown, t0 + TICK * 2, Some(Command::Reset));
    assert_eq!(view.phase, GamePhase::Show);
    assert_eq!(view.round, 1);

    // Input: Start is a no-op, Reset restarts.
    let mut game = scripted_game(&[Palm]);
    let t1 = start_game(&mut game, t0);
    let view = game.tick(Palm, t1 + TICK, Some(Command::Start));
    assert_eq!(view.phase, GamePhase::Input);
    let view = game.tick(Palm, t1 + TICK * 2, Some(Command::Reset));
    assert_eq!(view.phase, GamePhase::Show);
    assert_eq!(view.score, 0);

    // GameOver: both commands begin a fresh game.
    for cmd in [Command::Start, Command::Reset] {
        let mut game = scripted_game(&[Palm]);
        let t2 = drive_to_game_over(&mut game, t0);
        let view = game.tick(Unknown, t2 + TICK, Some(cmd));
        assert_eq!(view.phase, GamePhase::Show);
        assert_eq!(view.round, 1);
        assert_eq!(view.score, 0);
    }
}

#[test]
fn reset_supersedes_show_timing() {
    let mut game = scripted_game(&[Palm, Fist, Point]);
    let t1 = start_game(&mut game, Instant::now());
    let t2 = complete_round(&mut game, t1);
    assert_eq!(game.round(), 2);

    // Mid-display of the grown sequence, reset: the replay starts over
    // with a brand-new one-element sequence.
    game.tick(Unknown, t2 + Duration::from_millis(400), None);
    let view = game.tick(Unknown, t2 + Duration::from_millis(500), Some(Command::Reset));
    assert_eq!(view.phase, GamePhase::Show);
    assert_eq!(view.round, 1);
    assert_eq!(view.display_target, Some(game.sequence()[0]));
}

#[test]
fn seeded_games_play_identically() {
    let play = |seed: u64| -> Vec<_> {
        let mut game = SimonGame::new(
            GameConfig::default(),
            Box::new(UniformPicker::seeded(seed)),
        );
        let mut t = start_game(&mut game, Instant::now());
        for _ in 0..5 {
            t = complete_round(&mut game, t);
            t = skip_show(&mut game, t);
        }
        game.sequence().to_vec()
    };

    assert_eq!(play(1234), play(1234));
}

#[test]
fn sequences_never_contain_unknown() {
    let mut game = SimonGame::new(
        GameConfig::default(),
        Box::new(UniformPicker::seeded(99)),
    );
    let mut t = start_game(&mut game, Instant::now());
    for _ in 0..10 {
        t = complete_round(&mut game, t);
        t = skip_show(&mut game, t);
    }
    assert_eq!(game.round(), 11);
    assert!(game.sequence().iter().all(|g| *g != Unknown));
}
