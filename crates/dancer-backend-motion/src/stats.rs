//! Transition statistics over an action sequence.
//!
//! A transition is a pair of consecutive actions. Its speed is
//! `|Δposition| / Δtime` in position units per second. Policies can emit two
//! actions at the same instant (a wall touch followed by a fold, for example);
//! such zero-duration transitions have no finite speed and are left out of the
//! speed statistics. They still count as travel.

use dancer_spec::{ActionSequence, POSITION_MAX};
use serde::{Deserialize, Serialize};

/// Speed used to normalize transition speeds into [0, 1].
pub const MAX_SPEED: f64 = 400.0;

/// Speeds of all transitions with a positive duration, in units per second.
pub fn transition_speeds(actions: &ActionSequence) -> Vec<f64> {
    actions
        .actions()
        .windows(2)
        .filter_map(|w| {
            let dt = w[1].time - w[0].time;
            (dt > 0.0).then(|| (w[1].position - w[0].position).abs() / dt)
        })
        .collect()
}

/// Per-transition intensity: speed over [`MAX_SPEED`], clamped to [0, 1].
///
/// This is the strip a heatmap view colours, one cell per transition.
pub fn intensity_profile(actions: &ActionSequence) -> Vec<f64> {
    transition_speeds(actions)
        .into_iter()
        .map(|v| (v / MAX_SPEED).clamp(0.0, 1.0))
        .collect()
}

/// Mean of speed / [`MAX_SPEED`] (not clamped). Zero when there are no timed
/// transitions.
pub fn mean_normalized_speed(actions: &ActionSequence) -> f64 {
    mean(transition_speeds(actions).iter().map(|v| v / MAX_SPEED))
}

/// Fraction of timed transitions strictly faster than `threshold`.
pub fn fraction_above(actions: &ActionSequence, threshold: f64) -> f64 {
    let speeds = transition_speeds(actions);
    if speeds.is_empty() {
        return 0.0;
    }
    speeds.iter().filter(|&&v| v > threshold).count() as f64 / speeds.len() as f64
}

/// Mean of `|Δposition| / 100` over all transitions.
pub fn mean_travel(actions: &ActionSequence) -> f64 {
    mean(
        actions
            .actions()
            .windows(2)
            .map(|w| (w[1].position - w[0].position).abs() / POSITION_MAX),
    )
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Descriptive summary of a generated sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSummary {
    /// Number of actions.
    pub action_count: usize,
    /// Time of the last action in seconds.
    pub duration: f64,
    /// Lowest position.
    pub min_position: f64,
    /// Highest position.
    pub max_position: f64,
    /// Mean position.
    pub mean_position: f64,
    /// Mean speed in units per second.
    pub mean_speed: f64,
    /// Fastest transition in units per second.
    pub max_speed: f64,
    /// Speed threshold used for `fraction_above`.
    pub speed_threshold: f64,
    /// Fraction of transitions faster than `speed_threshold`.
    pub fraction_above: f64,
    /// Mean normalized travel per transition.
    pub mean_travel: f64,
}

impl MotionSummary {
    /// Summarizes `actions`, counting transitions faster than `speed_threshold`.
    pub fn compute(actions: &ActionSequence, speed_threshold: f64) -> Self {
        let speeds = transition_speeds(actions);
        let (min_position, max_position) = actions
            .positions()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            });

        Self {
            action_count: actions.len(),
            duration: actions.last_time().unwrap_or(0.0),
            min_position: if actions.is_empty() { 0.0 } else { min_position },
            max_position: if actions.is_empty() { 0.0 } else { max_position },
            mean_position: actions.mean_position().unwrap_or(0.0),
            mean_speed: mean(speeds.iter().copied()),
            max_speed: speeds.iter().copied().fold(0.0, f64::max),
            speed_threshold,
            fraction_above: fraction_above(actions, speed_threshold),
            mean_travel: mean_travel(actions),
        }
    }
}
