//! Motion events produced by the generator.

use serde::{Deserialize, Serialize};

/// Lowest legal position.
pub const POSITION_MIN: f64 = 0.0;
/// Highest legal position.
pub const POSITION_MAX: f64 = 100.0;
/// Vertical center of the position range.
pub const POSITION_CENTER: f64 = 50.0;

/// One (time, position) output event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Time in seconds.
    pub time: f64,
    /// Position in [0, 100].
    pub position: f64,
}

impl Action {
    /// Creates an action.
    pub fn new(time: f64, position: f64) -> Self {
        Self { time, position }
    }

    /// Whether the position lies inside [0, 100].
    pub fn in_range(&self) -> bool {
        (POSITION_MIN..=POSITION_MAX).contains(&self.position)
    }
}

impl From<(f64, f64)> for Action {
    fn from((time, position): (f64, f64)) -> Self {
        Self { time, position }
    }
}

/// Ordered, immutable sequence of actions with non-decreasing time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSequence {
    actions: Vec<Action>,
}

impl ActionSequence {
    /// Wraps a vector of actions.
    ///
    /// Callers are expected to supply time-ordered actions; see
    /// [`ActionSequence::is_time_ordered`].
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Borrow the actions.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the sequence has no actions.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate over the actions.
    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    /// Iterate over positions only.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.actions.iter().map(|a| a.position)
    }

    /// Time of the last action, if any.
    pub fn last_time(&self) -> Option<f64> {
        self.actions.last().map(|a| a.time)
    }

    /// Average position, or `None` for an empty sequence.
    pub fn mean_position(&self) -> Option<f64> {
        if self.actions.is_empty() {
            return None;
        }
        Some(self.positions().sum::<f64>() / self.actions.len() as f64)
    }

    /// Whether every position lies inside [0, 100].
    pub fn all_in_range(&self) -> bool {
        self.actions.iter().all(Action::in_range)
    }

    /// Whether times are non-decreasing.
    pub fn is_time_ordered(&self) -> bool {
        self.actions.windows(2).all(|w| w[0].time <= w[1].time)
    }

    /// Consumes the sequence, returning the actions.
    pub fn into_inner(self) -> Vec<Action> {
        self.actions
    }
}

impl<'a> IntoIterator for &'a ActionSequence {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_position() {
        let seq = ActionSequence::new(vec![
            Action::new(0.5, 75.0),
            Action::new(1.0, 25.0),
        ]);
        assert_eq!(seq.mean_position(), Some(50.0));
        assert_eq!(ActionSequence::default().mean_position(), None);
    }

    #[test]
    fn test_ordering_and_range() {
        let seq = ActionSequence::new(vec![
            Action::new(0.0, 0.0),
            Action::new(0.0, 100.0),
            Action::new(1.0, 50.0),
        ]);
        assert!(seq.is_time_ordered());
        assert!(seq.all_in_range());

        let bad = ActionSequence::new(vec![Action::new(1.0, 101.0), Action::new(0.5, 50.0)]);
        assert!(!bad.is_time_ordered());
        assert!(!bad.all_in_range());
    }

    #[test]
    fn test_serializes_as_array() {
        let seq = ActionSequence::new(vec![Action::from((1.5, 20.0))]);
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, r#"[{"time":1.5,"position":20.0}]"#);
    }
}
