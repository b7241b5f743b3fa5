//! # hand_gesture
//!
//! Classify a single hand pose from 21 normalized 2D landmarks into one of
//! a small fixed gesture vocabulary:
//!
//! | label       | shape                                            |
//! |-------------|--------------------------------------------------|
//! | `Palm`      | open hand, at least three fingers extended       |
//! | `Fist`      | all fingers curled, thumb not raised             |
//! | `Point`     | index finger extended, all others curled         |
//! | `ThumbsUp`  | fist with the thumb splayed upward               |
//! | `Unknown`   | anything else (also "no hand" upstream)          |
//!
//! The classifier is a pure function over the landmark set, with no hidden
//! state and no dependence on where the points came from. Extension is decided
//! by a radial-distance test (tip farther from the wrist than the PIP joint
//! by a tuned margin) rather than joint angles, which keeps the decision
//! stable under in-plane hand rotation and camera distance.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_gesture::{classify, poses, GestureLabel, Handedness};
//!
//! let hand = poses::thumbs_up(Handedness::Right);
//! assert_eq!(classify(&hand, Handedness::Right).unwrap(), GestureLabel::ThumbsUp);
//!
//! // 21 points are required; anything else is an input error.
//! let bad = hand_gesture::HandLandmarks::from_points(vec![]);
//! assert!(classify(&bad, Handedness::Right).is_err());
//! ```

use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices (standard 21-point hand topology)
// ════════════════════════════════════════════════════════════════════════════

pub const WRIST:      usize = 0;

pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;

pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;

pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;

pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;

pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// Number of landmarks in a complete hand.
pub const LANDMARK_COUNT: usize = 21;

/// Bone segments connecting the landmarks, for overlay rendering.
pub const HAND_SKELETON: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP), (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP),
    (PINKY_DIP, PINKY_TIP),
];

// ════════════════════════════════════════════════════════════════════════════
// Geometry types
// ════════════════════════════════════════════════════════════════════════════

/// One hand keypoint in normalized image coordinates.
///
/// `x` and `y` are roughly in `[0, 1]`, origin at the top-left corner of the
/// frame, `y` growing downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Landmark { x, y }
    }
}

/// An ordered landmark set as delivered by an external hand detector.
///
/// Construction performs no validation; [`classify`] is the one place that
/// checks the point count, so a detector that produced a short frame fails
/// there rather than at the channel boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: Vec<Landmark>,
}

impl HandLandmarks {
    pub fn from_points(points: Vec<Landmark>) -> Self {
        HandLandmarks { points }
    }

    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn as_slice(&self) -> &[Landmark] { &self.points }

    pub fn iter(&self) -> std::slice::Iter<'_, Landmark> {
        self.points.iter()
    }
}

impl From<Vec<Landmark>> for HandLandmarks {
    fn from(points: Vec<Landmark>) -> Self {
        HandLandmarks { points }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handedness
// ════════════════════════════════════════════════════════════════════════════

/// Which of the subject's hands the landmarks belong to, as reported by the
/// detector. Only the thumb-direction test cares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn name(self) -> &'static str {
        match self {
            Handedness::Left  => "Left",
            Handedness::Right => "Right",
        }
    }

    pub fn other(self) -> Handedness {
        match self {
            Handedness::Left  => Handedness::Right,
            Handedness::Right => Handedness::Left,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// GestureLabel
// ════════════════════════════════════════════════════════════════════════════

/// The classifier's categorical output for one hand pose in one frame.
///
/// `Unknown` is a normal outcome (no rule matched, or no hand was visible
/// upstream), never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureLabel {
    Palm,
    Fist,
    Point,
    ThumbsUp,
    Unknown,
}

impl GestureLabel {
    /// The drawable gesture vocabulary: everything a game sequence may
    /// contain. `Unknown` is deliberately absent.
    pub const PLAYABLE: [GestureLabel; 4] = [
        GestureLabel::Palm,
        GestureLabel::Fist,
        GestureLabel::Point,
        GestureLabel::ThumbsUp,
    ];

    /// Display string for HUD rendering.
    pub fn name(self) -> &'static str {
        match self {
            GestureLabel::Palm     => "PALM",
            GestureLabel::Fist     => "FIST",
            GestureLabel::Point    => "POINT",
            GestureLabel::ThumbsUp => "THUMBS UP",
            GestureLabel::Unknown  => "UNKNOWN",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GestureError {
    #[error("expected 21 hand landmarks, got {got}")]
    InvalidLandmarkCount { got: usize },
}

// ════════════════════════════════════════════════════════════════════════════
// Classifier
// ════════════════════════════════════════════════════════════════════════════

/// Margin by which a fingertip must outreach its PIP joint (distances taken
/// from the wrist) to count as extended.
pub const FINGER_EXT_THRESHOLD: f32 = 0.04;
/// Same margin for the thumb, measured tip vs. MCP. Thumbs are shorter.
pub const THUMB_EXT_THRESHOLD:  f32 = 0.02;
/// Vertical component of wrist→thumb-tip must exceed this fraction of the
/// horizontal component for the thumb to count as pointing up (roughly a
/// ±70° cone around straight up).
pub const THUMB_UP_MIN_SLOPE:   f32 = 0.35;
/// Allowed inward lean of the thumb (CMC→tip, x component) before it is
/// treated as curling across the palm instead of splayed.
pub const THUMB_LATERAL_TOLERANCE: f32 = 0.03;

/// Tip/PIP landmark pairs for the four non-thumb fingers.
const FINGER_PAIRS: [(usize, usize); 4] = [
    (INDEX_TIP,  INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP,   RING_PIP),
    (PINKY_TIP,  PINKY_PIP),
];

fn dist(a: Landmark, b: Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Radial extension test: the tip must sit farther from the wrist than the
/// reference joint by more than `threshold`.
fn finger_extended(p: &[Landmark], tip: usize, joint: usize, threshold: f32) -> bool {
    dist(p[tip], p[WRIST]) - dist(p[joint], p[WRIST]) > threshold
}

/// Thumbs-up predicate. All three must hold:
///
/// 1. the thumb passes its own extension test (tip vs. MCP, 0.02 margin);
/// 2. wrist→tip points predominantly upward (`y` grows downward, so the
///    negated vertical component must beat [`THUMB_UP_MIN_SLOPE`] times the
///    horizontal magnitude);
/// 3. the CMC→tip direction is laterally consistent with the reported hand:
///    a right thumb may not lean left of `-0.03`, a left thumb not right of
///    `+0.03`. Rejects an extended thumb curling across the palm.
fn thumb_is_up(p: &[Landmark], handedness: Handedness) -> bool {
    if !finger_extended(p, THUMB_TIP, THUMB_MCP, THUMB_EXT_THRESHOLD) {
        return false;
    }

    let vx = p[THUMB_TIP].x - p[WRIST].x;
    let vy = p[THUMB_TIP].y - p[WRIST].y;
    if -vy <= THUMB_UP_MIN_SLOPE * vx.abs() {
        return false;
    }

    let lateral = p[THUMB_TIP].x - p[THUMB_CMC].x;
    match handedness {
        Handedness::Right => lateral >= -THUMB_LATERAL_TOLERANCE,
        Handedness::Left  => lateral <=  THUMB_LATERAL_TOLERANCE,
    }
}

/// Classify one hand pose.
///
/// Pure and deterministic. Fails only when the landmark count is not
/// exactly 21; a frame with no hand at all is the caller's business (treat
/// it as [`GestureLabel::Unknown`] without calling in).
///
/// The rules are ordered and the first match wins, because the categories
/// overlap under detector noise:
///
/// 1. three or more of {index, middle, ring, pinky} extended → `Palm`
/// 2. none extended and thumb not up → `Fist`
/// 3. exactly the index extended → `Point` (thumb ignored)
/// 4. thumb up with at most one stray extended finger → `ThumbsUp`
/// 5. otherwise → `Unknown`
pub fn classify(
    landmarks: &HandLandmarks,
    handedness: Handedness,
) -> Result<GestureLabel, GestureError> {
    if landmarks.len() != LANDMARK_COUNT {
        return Err(GestureError::InvalidLandmarkCount { got: landmarks.len() });
    }
    let p = landmarks.as_slice();

    let ext: Vec<bool> = FINGER_PAIRS
        .iter()
        .map(|&(tip, pip)| finger_extended(p, tip, pip, FINGER_EXT_THRESHOLD))
        .collect();
    let others_ext = ext.iter().filter(|&&e| e).count();
    let index_only = ext[0] && !ext[1] && !ext[2] && !ext[3];

    let thumb_up = thumb_is_up(p, handedness);

    let label = if others_ext >= 3 {
        GestureLabel::Palm
    } else if others_ext == 0 && !thumb_up {
        GestureLabel::Fist
    } else if index_only {
        GestureLabel::Point
    } else if thumb_up && others_ext <= 1 {
        GestureLabel::ThumbsUp
    } else {
        GestureLabel::Unknown
    };
    Ok(label)
}

// ════════════════════════════════════════════════════════════════════════════
// poses — canonical synthetic hands
// ════════════════════════════════════════════════════════════════════════════

/// Ready-made landmark sets for each gesture, with comfortable margins over
/// every classifier threshold.
///
/// These power the keyboard simulator (which has no camera to produce real
/// landmarks) and double as classifier fixtures. All are right hands around
/// a wrist at (0.50, 0.80); [`mirror_x`] produces the left-hand twin.
pub mod poses {
    use super::*;

    fn hand(points: [(f32, f32); LANDMARK_COUNT]) -> HandLandmarks {
        HandLandmarks::from_points(
            points.iter().map(|&(x, y)| Landmark::new(x, y)).collect(),
        )
    }

    /// Open hand, fingers spread upward, thumb splayed to the side.
    pub fn palm() -> HandLandmarks {
        hand([
            (0.50, 0.80),                                             // wrist
            (0.42, 0.74), (0.36, 0.70), (0.31, 0.67), (0.27, 0.65),   // thumb
            (0.44, 0.62), (0.44, 0.52), (0.44, 0.44), (0.44, 0.36),   // index
            (0.50, 0.61), (0.50, 0.51), (0.50, 0.43), (0.50, 0.35),   // middle
            (0.56, 0.62), (0.56, 0.52), (0.56, 0.44), (0.56, 0.36),   // ring
            (0.62, 0.63), (0.62, 0.54), (0.62, 0.47), (0.62, 0.40),   // pinky
        ])
    }

    /// Closed fist, thumb wrapped over the curled fingers.
    pub fn fist() -> HandLandmarks {
        hand([
            (0.50, 0.80),
            (0.43, 0.745), (0.40, 0.70), (0.43, 0.665), (0.47, 0.655),
            (0.44, 0.62), (0.44, 0.555), (0.45, 0.60), (0.455, 0.65),
            (0.50, 0.61), (0.50, 0.55), (0.50, 0.595), (0.50, 0.645),
            (0.56, 0.62), (0.56, 0.56), (0.555, 0.60), (0.55, 0.65),
            (0.62, 0.63), (0.615, 0.575), (0.61, 0.61), (0.605, 0.65),
        ])
    }

    /// Index finger extended from an otherwise closed fist.
    pub fn point() -> HandLandmarks {
        hand([
            (0.50, 0.80),
            (0.43, 0.745), (0.40, 0.70), (0.43, 0.665), (0.47, 0.655),
            (0.44, 0.62), (0.44, 0.52), (0.44, 0.44), (0.44, 0.36),
            (0.50, 0.61), (0.50, 0.55), (0.50, 0.595), (0.50, 0.645),
            (0.56, 0.62), (0.56, 0.56), (0.555, 0.60), (0.55, 0.65),
            (0.62, 0.63), (0.615, 0.575), (0.61, 0.61), (0.605, 0.65),
        ])
    }

    /// Fist with the thumb raised vertically. Mirrored for a left hand so
    /// the lateral-coherence clause holds either way.
    pub fn thumbs_up(handedness: Handedness) -> HandLandmarks {
        let right = hand([
            (0.50, 0.80),
            (0.42, 0.72), (0.41, 0.64), (0.41, 0.57), (0.41, 0.50),
            (0.44, 0.62), (0.44, 0.555), (0.45, 0.60), (0.455, 0.65),
            (0.50, 0.61), (0.50, 0.55), (0.50, 0.595), (0.50, 0.645),
            (0.56, 0.62), (0.56, 0.56), (0.555, 0.60), (0.55, 0.65),
            (0.62, 0.63), (0.615, 0.575), (0.61, 0.61), (0.605, 0.65),
        ]);
        match handedness {
            Handedness::Right => right,
            Handedness::Left  => mirror_x(&right),
        }
    }

    /// Reflect a hand across the vertical axis of the frame (`x → 1 − x`).
    pub fn mirror_x(hand: &HandLandmarks) -> HandLandmarks {
        HandLandmarks::from_points(
            hand.iter().map(|p| Landmark::new(1.0 - p.x, p.y)).collect(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
