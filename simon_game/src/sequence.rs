//! Sequence growth — where the next target gesture comes from.
//!
//! The game machine owns a boxed [`GesturePicker`] and calls it exactly
//! once per appended element: once at construction, once per full reset,
//! once per completed round. Swapping in a [`ScriptedPicker`] makes every
//! game deterministic.

use hand_gesture::GestureLabel;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

// ════════════════════════════════════════════════════════════════════════════
// GesturePicker trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can produce the next target gesture.
///
/// Implementations must only return labels from [`GestureLabel::PLAYABLE`];
/// `Unknown` in a sequence would be unwinnable.
pub trait GesturePicker {
    fn pick(&mut self) -> GestureLabel;
}

// ════════════════════════════════════════════════════════════════════════════
// UniformPicker — seedable uniform draw
// ════════════════════════════════════════════════════════════════════════════

/// Uniform random draw over the playable vocabulary.
pub struct UniformPicker {
    rng: SmallRng,
}

impl UniformPicker {
    /// Picker seeded from OS entropy.
    pub fn new() -> Self {
        Self::seeded(rand::random())
    }

    /// Picker with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        UniformPicker { rng: SmallRng::seed_from_u64(seed) }
    }
}

impl Default for UniformPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl GesturePicker for UniformPicker {
    fn pick(&mut self) -> GestureLabel {
        let i = self.rng.random_range(0..GestureLabel::PLAYABLE.len());
        GestureLabel::PLAYABLE[i]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScriptedPicker — deterministic stand-in
// ════════════════════════════════════════════════════════════════════════════

/// Cycles through a fixed script of labels. Intended for tests and demos.
pub struct ScriptedPicker {
    labels: Vec<GestureLabel>,
    at:     usize,
}

impl ScriptedPicker {
    /// The script must contain at least one label.
    pub fn new(labels: Vec<GestureLabel>) -> Self {
        assert!(!labels.is_empty(), "gesture script must not be empty");
        ScriptedPicker { labels, at: 0 }
    }
}

impl GesturePicker for ScriptedPicker {
    fn pick(&mut self) -> GestureLabel {
        let label = self.labels[self.at % self.labels.len()];
        self.at += 1;
        label
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
