//! # simon_says
//!
//! A memory game played with your hand. The game shows a growing sequence of
//! gestures; you repeat it by holding each gesture steady in front of the
//! tracker before the clock runs out.
//!
//! ```text
//!   ┌─────────────┐   HandFrame    ┌──────────┐   GestureLabel   ┌───────────┐
//!   │ hand source  │ ─────────────▶ │ classify │ ───────────────▶ │ SimonGame │
//!   │ (leap / sim) │  mpsc channel  │  (pure)  │    tick(..)      │  (pure)   │
//!   └─────────────┘                └──────────┘                  └─────┬─────┘
//!                                                                      │ GameView
//!                                                                ┌─────▼─────┐
//!                                                                │ Visualizer │
//!                                                                └───────────┘
//! ```
//!
//! ## Gesture vocabulary
//!
//! | Gesture   | Shape                                    | Sim key |
//! |-----------|------------------------------------------|---------|
//! | PALM      | all four fingers extended                | `1`     |
//! | FIST      | nothing extended                         | `2`     |
//! | POINT     | index finger only                        | `3`     |
//! | THUMBS UP | thumb extended and raised, fingers curled | `4`     |
//!
//! ## Window keys
//!
//! | Key   | Effect                                      |
//! |-------|---------------------------------------------|
//! | `I`   | start a game (from the menu or game over)   |
//! | `R`   | reset to a fresh game                       |
//! | `H`   | swap simulated handedness (sim mode only)   |
//! | `1-4` | hold a simulated gesture (sim mode only)    |
//! | `Q`   | quit                                        |
//!
//! ## Feature flags
//!
//! | Feature | Default | Effect                                             |
//! |---------|---------|----------------------------------------------------|
//! | `leap`  | off     | track a real hand through the LeapMotion C SDK     |
//!
//! Without `leap` the game runs entirely from the keyboard: number keys feed
//! canonical landmark poses through the same classifier the hardware path
//! uses, so the whole pipeline is exercised either way.

pub mod app;
pub mod tracker;
pub mod visualizer;
