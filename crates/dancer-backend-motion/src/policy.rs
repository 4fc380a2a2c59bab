//! Out-of-range policies.
//!
//! Each half-beat the sequencer proposes a candidate position that may lie
//! outside [0, 100]. A policy turns the candidate into one or more legal
//! actions, given where the previous half-beat ended. Every emitted position is
//! clamped into range, so all three policies share the same post-condition.
//!
//! The set of policies is closed: dispatch is a `match` on
//! [`OverflowPolicy`].

use dancer_spec::{Action, OverflowPolicy, POSITION_MAX, POSITION_MIN};

/// One half-beat transition handed to a policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Candidate position, possibly out of range.
    pub pos: f64,
    /// Time of the candidate.
    pub at: f64,
    /// Previous candidate position (unclamped).
    pub last_pos: f64,
    /// Time of the previous candidate.
    pub last_at: f64,
}

impl Stroke {
    /// Creates a stroke from the current and previous candidates.
    pub fn new(pos: f64, at: f64, last_pos: f64, last_at: f64) -> Self {
        Self {
            pos,
            at,
            last_pos,
            last_at,
        }
    }
}

/// Applies `policy` to a stroke, appending the resulting actions to `out`.
pub fn apply_into(policy: OverflowPolicy, stroke: Stroke, out: &mut Vec<Action>) {
    match policy {
        OverflowPolicy::Clamp => clamp_peak(stroke, out),
        OverflowPolicy::Bounce => bounce_peak(stroke, out),
        OverflowPolicy::Fold => fold_peak(stroke, out),
    }
}

/// Applies `policy` to a stroke and returns the resulting actions.
///
/// # Example
/// ```
/// use dancer_backend_motion::policy::{apply, Stroke};
/// use dancer_spec::{Action, OverflowPolicy};
///
/// let actions = apply(OverflowPolicy::Clamp, Stroke::new(130.0, 1.0, 50.0, 0.0));
/// assert_eq!(actions, vec![Action::new(1.0, 100.0)]);
/// ```
pub fn apply(policy: OverflowPolicy, stroke: Stroke) -> Vec<Action> {
    let mut out = Vec::with_capacity(3);
    apply_into(policy, stroke, &mut out);
    out
}

/// Clamp a position into [0, 100].
#[inline]
pub fn clamp_position(pos: f64) -> f64 {
    pos.max(POSITION_MIN).min(POSITION_MAX)
}

#[inline]
fn emit(out: &mut Vec<Action>, pos: f64, at: f64) {
    out.push(Action::new(at, clamp_position(pos)));
}

/// Time at which the path from `(last_at, last_pos)` to `(at, pos)` reaches
/// `limit`, weighting each endpoint time by the other endpoint's distance to
/// the limit:
///
/// ```text
/// t = (|last_pos - limit| * at + |pos - limit| * last_at)
///     / (|pos - limit| + |last_pos - limit|)
/// ```
///
/// The result always lies between `last_at` and `at`. Callers must not pass
/// two endpoints that both sit exactly on `limit`.
pub fn crossing_time(pos: f64, at: f64, last_pos: f64, last_at: f64, limit: f64) -> f64 {
    let before = (last_pos - limit).abs();
    let after = (pos - limit).abs();
    (before * at + after * last_at) / (after + before)
}

/// Single action at `at`, position clamped.
pub fn clamp_peak(stroke: Stroke, out: &mut Vec<Action>) {
    emit(out, stroke.pos, stroke.at);
}

/// Reflect off the walls at 0 and 100.
///
/// If the previous candidate was out of range, the path first re-enters at the
/// wall it left through. If the current candidate is out of range, the path
/// touches the wall at the crossing time and then lands on the reflected
/// position at `at`.
pub fn bounce_peak(stroke: Stroke, out: &mut Vec<Action>) {
    let Stroke {
        pos,
        at,
        last_pos,
        last_at,
    } = stroke;

    if last_pos < POSITION_MIN {
        let t = crossing_time(pos, at, last_pos, last_at, POSITION_MIN);
        emit(out, POSITION_MIN, t);
    } else if last_pos > POSITION_MAX {
        let t = crossing_time(pos, at, last_pos, last_at, POSITION_MAX);
        emit(out, POSITION_MAX, t);
    }

    if pos > POSITION_MAX {
        let t = crossing_time(pos, at, last_pos, last_at, POSITION_MAX);
        emit(out, POSITION_MAX, t);
        emit(out, 2.0 * POSITION_MAX - pos, at);
    } else if pos < POSITION_MIN {
        let t = crossing_time(pos, at, last_pos, last_at, POSITION_MIN);
        emit(out, POSITION_MIN, t);
        emit(out, -pos, at);
    } else {
        emit(out, pos, at);
    }
}

/// Fold the travel in half around the previous candidate.
///
/// An out-of-range stroke turns around at the midpoint time after covering
/// half its distance, and returns to the previous position at `at`.
pub fn fold_peak(stroke: Stroke, out: &mut Vec<Action>) {
    let Stroke {
        pos,
        at,
        last_pos,
        last_at,
    } = stroke;

    let mid_at = (last_at + at) / 2.0;
    let travel = (last_pos - pos).abs() / 2.0;

    if last_pos < POSITION_MIN {
        emit(out, last_pos + travel, mid_at);
    } else if last_pos > POSITION_MAX {
        emit(out, last_pos - travel, mid_at);
    }

    if pos < POSITION_MIN {
        emit(out, last_pos - travel, mid_at);
        emit(out, last_pos, at);
    } else if pos > POSITION_MAX {
        emit(out, last_pos + travel, mid_at);
        emit(out, last_pos, at);
    } else {
        emit(out, pos, at);
    }
}
