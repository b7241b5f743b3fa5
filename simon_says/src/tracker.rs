//! Hand tracking sources.
//!
//! The rest of the program only sees [`HandFrame`] values arriving on an
//! `mpsc` channel, so the game and renderer never know whether a frame came
//! from a real LeapMotion device or from the keyboard simulator.
//!
//! ```text
//!   LeapHandSource ──┐
//!                    ├──▶ Sender<HandFrame> ──▶ host loop
//!   SimHandSource ───┘
//! ```
//!
//! Each source runs on its own thread (see [`spawn_hand_source`]) and exits
//! when the receiving side hangs up.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use hand_gesture::{poses, HandLandmarks, Handedness};

// ═══════════════════════════════════════════════════════════════════════════
// Frame types
// ═══════════════════════════════════════════════════════════════════════════

/// One tracked hand: 21 normalized landmarks plus which hand it is.
#[derive(Clone, Debug)]
pub struct TrackedHand {
    pub landmarks:  HandLandmarks,
    pub handedness: Handedness,
}

/// One tracking frame. `hand` is `None` when nothing is in view.
#[derive(Clone, Debug)]
pub struct HandFrame {
    pub hand: Option<TrackedHand>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Source trait
// ═══════════════════════════════════════════════════════════════════════════

/// A producer of hand frames, driven on a dedicated thread.
pub trait HandSource: Send + 'static {
    /// Run until the frame channel closes, pushing frames as they arrive.
    fn run(self: Box<Self>, tx: Sender<HandFrame>);
}

/// Spawn `source` on its own thread and hand back the frame channel.
pub fn spawn_hand_source(source: impl HandSource) -> Receiver<HandFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ═══════════════════════════════════════════════════════════════════════════
// LeapMotion source (feature = "leap")
// ═══════════════════════════════════════════════════════════════════════════

/// Reads tracking frames from a LeapMotion controller through LeapC and maps
/// each hand onto the 21-landmark layout the classifier expects.
#[cfg(feature = "leap")]
pub struct LeapHandSource;

#[cfg(feature = "leap")]
impl HandSource for LeapHandSource {
    fn run(self: Box<Self>, tx: Sender<HandFrame>) {
        use leaprs::*;

        let mut connection = Connection::create(ConnectionConfig::default())
            .expect("Failed to create LeapC connection");
        connection.open().expect("Failed to open LeapC connection");

        log::info!("LeapMotion connected; waiting for tracking frames");

        loop {
            let message = match connection.poll(100) {
                Ok(msg) => msg,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = message.event() {
                let hands: Vec<_> = frame.hands().collect();
                let hand = hands.first().map(leap_tracked_hand);
                if tx.send(HandFrame { hand }).is_err() {
                    return;
                }
            }
        }
    }
}

/// Flatten a LeapC hand into the wrist-first landmark layout.
///
/// LeapC reports joints in millimetres with the device at the origin and y
/// growing away from it. The interaction volume below is mapped onto the
/// normalized frame, with y flipped so that "up" means smaller y, the same
/// orientation a camera image would have.
#[cfg(feature = "leap")]
fn leap_tracked_hand(hand: &leaprs::Hand) -> TrackedHand {
    use hand_gesture::{Landmark, LANDMARK_COUNT};
    use leaprs::HandType;

    const H_SPAN_MM: f32 = 400.0; // full width of the mapped volume
    const V_MIN_MM: f32 = 80.0; // height at which y maps to the bottom edge
    const V_SPAN_MM: f32 = 350.0; // vertical extent of the mapped volume

    let norm = |x_mm: f32, y_mm: f32| {
        Landmark::new(
            (0.5 + x_mm / H_SPAN_MM).clamp(0.0, 1.0),
            (1.0 - (y_mm - V_MIN_MM) / V_SPAN_MM).clamp(0.0, 1.0),
        )
    };

    let mut points = Vec::with_capacity(LANDMARK_COUNT);

    // Landmark 0: LeapC has no wrist joint on the hand itself, so the palm
    // center stands in. The classifier only measures distances relative to
    // this point, which the substitution preserves well enough.
    let palm = hand.palm().position();
    points.push(norm(palm.x, palm.y));

    // Landmarks 1..=20: four joints per digit, base to tip. For fingers the
    // four are MCP, PIP, DIP, TIP; for the thumb the same bone walk yields
    // CMC, MCP, IP, TIP, which is exactly the layout slot it fills.
    for digit in hand.digits() {
        let joints = [
            digit.proximal().prev_joint(),
            digit.proximal().next_joint(),
            digit.distal().prev_joint(),
            digit.distal().next_joint(),
        ];
        for joint in joints {
            points.push(norm(joint.x, joint.y));
        }
    }

    let handedness = match hand.hand_type() {
        HandType::Left => Handedness::Left,
        HandType::Right => Handedness::Right,
    };

    TrackedHand {
        landmarks: HandLandmarks::from_points(points),
        handedness,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard simulator source
// ═══════════════════════════════════════════════════════════════════════════

/// The four canonical poses the simulator can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoseKey {
    Palm,
    Fist,
    Point,
    ThumbsUp,
}

/// One simulator update: which pose is held (if any) and as which hand.
#[derive(Clone, Copy, Debug)]
pub struct SimPose {
    pub pose:       Option<PoseKey>,
    pub handedness: Handedness,
}

/// Build the canonical landmark set for a simulated pose.
///
/// Left-hand poses are mirror images of the right-hand ones, so the skeleton
/// overlay flips when the simulated handedness is swapped.
pub fn sim_hand(pose: PoseKey, handedness: Handedness) -> TrackedHand {
    let landmarks = match pose {
        PoseKey::Palm => poses::palm(),
        PoseKey::Fist => poses::fist(),
        PoseKey::Point => poses::point(),
        PoseKey::ThumbsUp => poses::thumbs_up(handedness),
    };
    let landmarks = match (pose, handedness) {
        (PoseKey::ThumbsUp, _) => landmarks, // already handedness-aware
        (_, Handedness::Right) => landmarks,
        (_, Handedness::Left) => poses::mirror_x(&landmarks),
    };
    TrackedHand {
        landmarks,
        handedness,
    }
}

/// Turns keyboard pose updates into tracking frames.
///
/// The visualizer owns the sending half of `rx` and pushes one [`SimPose`]
/// per polled frame, so frame pacing follows the render loop.
pub struct SimHandSource {
    pub rx: Receiver<SimPose>,
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<HandFrame>) {
        for update in self.rx {
            let frame = HandFrame {
                hand: update.pose.map(|pose| sim_hand(pose, update.handedness)),
            };
            if tx.send(frame).is_err() {
                return;
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
