//! # simon_game
//!
//! The Simon Says game engine: a growing gesture sequence is replayed to
//! the player, who must reproduce it one gesture at a time before a
//! per-target deadline runs out.
//!
//! | phase      | what happens                                              |
//! |------------|-----------------------------------------------------------|
//! | `Menu`     | idle; waits for a start command                           |
//! | `Show`     | replays the sequence, one timed element at a time         |
//! | `Input`    | debounced matching of the player's held gesture           |
//! | `GameOver` | terminal until an explicit start/reset                    |
//!
//! Everything advances through [`SimonGame::tick`], which consumes the
//! frame's classified gesture, the caller's clock reading and an optional
//! command, and returns a [`GameView`] snapshot for rendering. The engine
//! does not read the wall clock or sleep; feed it synthetic timestamps and
//! it plays just as happily in a test as on camera frames.
//!
//! Sequence growth is injected through [`GesturePicker`], with a seedable
//! uniform picker for play and a scripted one for tests.

pub mod game;
pub mod sequence;

pub use game::{
    Command, GameConfig, GamePhase, GameView, ShowStage, SimonGame, POINTS_PER_ROUND,
};
pub use sequence::{GesturePicker, ScriptedPicker, UniformPicker};
