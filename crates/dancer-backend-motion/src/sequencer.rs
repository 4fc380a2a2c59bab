//! Beat-by-beat action sequencing.
//!
//! Every beat produces two half-beat strokes: an up-stroke to
//! `offset + amplitude` at the midpoint between the previous stroke and the
//! beat, then a down-stroke to `offset - amplitude` on the beat itself. The
//! motion therefore peaks between beats and lands in a trough on each beat.

use dancer_spec::{Action, ActionSequence, OverflowPolicy, POSITION_CENTER};

use crate::offsets::MotionProfile;
use crate::policy::{apply_into, Stroke};

/// Carried state between strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cursor {
    last_pos: f64,
    last_at: f64,
}

/// Walks the beats and assembles the action sequence.
///
/// `beats` and `profile` must have the same length. `last_pos` starts at the
/// vertical center and `last_at` at `start_time`. `last_pos` tracks the raw
/// candidate, not the clamped output, so the out-of-range policies can see
/// where the previous stroke really wanted to go.
///
/// # Example
/// ```
/// use dancer_backend_motion::offsets::MotionProfile;
/// use dancer_backend_motion::sequencer::sequence_actions;
/// use dancer_spec::{Action, OverflowPolicy};
///
/// let profile = MotionProfile { offsets: vec![50.0], amplitudes: vec![25.0] };
/// let seq = sequence_actions(&[1.0], &profile, OverflowPolicy::Clamp, 0.0);
/// assert_eq!(seq.actions(), &[Action::new(0.5, 75.0), Action::new(1.0, 25.0)]);
/// ```
pub fn sequence_actions(
    beats: &[f64],
    profile: &MotionProfile,
    policy: OverflowPolicy,
    start_time: f64,
) -> ActionSequence {
    debug_assert_eq!(beats.len(), profile.len());

    let mut actions: Vec<Action> = Vec::with_capacity(beats.len() * 2);
    let mut cursor = Cursor {
        last_pos: POSITION_CENTER,
        last_at: start_time,
    };

    for ((&at, &offset), &amplitude) in beats
        .iter()
        .zip(&profile.offsets)
        .zip(&profile.amplitudes)
    {
        // up
        let intermediate_at = (at + cursor.last_at) / 2.0;
        let pos = amplitude + offset;
        apply_into(
            policy,
            Stroke::new(pos, intermediate_at, cursor.last_pos, cursor.last_at),
            &mut actions,
        );
        cursor = Cursor {
            last_pos: pos,
            last_at: intermediate_at,
        };

        // down
        let pos = -amplitude + offset;
        apply_into(
            policy,
            Stroke::new(pos, at, cursor.last_pos, cursor.last_at),
            &mut actions,
        );
        cursor = Cursor {
            last_pos: pos,
            last_at: at,
        };
    }

    ActionSequence::new(actions)
}
