//! Script export.
//!
//! Times are written in whole milliseconds (truncated) and positions as
//! integers rounded half-to-even.

use std::io::Write;

use dancer_spec::{Action, ActionSequence, ExportFormat};
use serde::{Deserialize, Serialize};

use crate::error::MotionResult;

/// Script format version written to every JSON script.
pub const SCRIPT_VERSION: &str = "1.0";
/// Position range declared in every JSON script.
pub const SCRIPT_RANGE: u32 = 100;

fn to_millis(time: f64) -> i64 {
    (time * 1000.0).trunc() as i64
}

fn to_position(position: f64) -> i64 {
    position.round_ties_even() as i64
}

/// Writes one `time_ms,position` line per action.
pub fn write_csv<W: Write>(actions: &ActionSequence, mut writer: W) -> MotionResult<()> {
    for action in actions {
        writeln!(writer, "{},{}", to_millis(action.time), to_position(action.position))?;
    }
    Ok(())
}

/// CSV rendering as a string.
///
/// # Example
/// ```
/// use dancer_backend_motion::export::to_csv_string;
/// use dancer_spec::{Action, ActionSequence};
///
/// let actions = ActionSequence::new(vec![Action::new(0.5, 75.0), Action::new(1.0, 24.5)]);
/// assert_eq!(to_csv_string(&actions), "500,75\n1000,24\n");
/// ```
pub fn to_csv_string(actions: &ActionSequence) -> String {
    actions
        .iter()
        .map(|a| format!("{},{}\n", to_millis(a.time), to_position(a.position)))
        .collect()
}

/// One action in a JSON script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptAction {
    /// Time in milliseconds.
    pub at: i64,
    /// Position in [0, 100].
    pub pos: i64,
}

/// Descriptive metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptMetadata {
    pub creator: String,
    pub description: String,
    /// Whole seconds up to the last action.
    pub duration: i64,
    pub license: String,
    pub notes: String,
    pub performers: Vec<String>,
    pub script_url: String,
    pub tags: Vec<String>,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub video_url: String,
}

impl Default for ScriptMetadata {
    fn default() -> Self {
        Self {
            creator: String::new(),
            description: String::new(),
            duration: 0,
            license: "None".to_string(),
            notes: String::new(),
            performers: Vec::new(),
            script_url: String::new(),
            tags: Vec::new(),
            title: String::new(),
            kind: "basic".to_string(),
            video_url: String::new(),
        }
    }
}

/// JSON script document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funscript {
    pub actions: Vec<ScriptAction>,
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub metadata: ScriptMetadata,
    #[serde(default = "default_range")]
    pub range: u32,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_range() -> u32 {
    SCRIPT_RANGE
}

fn default_version() -> String {
    SCRIPT_VERSION.to_string()
}

impl Funscript {
    /// Builds a script from generated actions.
    pub fn from_actions(actions: &ActionSequence) -> Self {
        let duration = actions.last_time().map(|t| t.trunc() as i64).unwrap_or(0);
        Self {
            actions: actions
                .iter()
                .map(|a| ScriptAction {
                    at: to_millis(a.time),
                    pos: to_position(a.position),
                })
                .collect(),
            inverted: false,
            metadata: ScriptMetadata {
                duration,
                ..ScriptMetadata::default()
            },
            range: SCRIPT_RANGE,
            version: SCRIPT_VERSION.to_string(),
        }
    }

    /// Sets the script title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = title.into();
        self
    }

    /// Parses a script from JSON.
    pub fn from_json(json: &str) -> MotionResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the script to compact JSON.
    pub fn to_json(&self) -> MotionResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Converts back to actions at millisecond resolution.
    pub fn to_actions(&self) -> ActionSequence {
        ActionSequence::new(
            self.actions
                .iter()
                .map(|a| Action::new(a.at as f64 / 1000.0, a.pos as f64))
                .collect(),
        )
    }
}

/// Rendered export bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// File contents.
    pub data: Vec<u8>,
    /// BLAKE3 hex hash of `data`.
    pub hash: String,
    /// File extension for the format, without the dot.
    pub extension: &'static str,
}

/// Renders `actions` in `format`.
pub fn render(actions: &ActionSequence, format: ExportFormat) -> MotionResult<ExportResult> {
    let data = match format {
        ExportFormat::Csv => {
            let mut buf = Vec::new();
            write_csv(actions, &mut buf)?;
            buf
        }
        ExportFormat::Funscript => Funscript::from_actions(actions).to_json()?.into_bytes(),
    };
    let hash = blake3::hash(&data).to_hex().to_string();

    Ok(ExportResult {
        data,
        hash,
        extension: format.extension(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture() -> ActionSequence {
        ActionSequence::new(vec![
            Action::new(0.5, 75.0),
            Action::new(1.0, 25.0),
            Action::new(1.5, 75.0),
            Action::new(2.0, 25.0),
        ])
    }

    #[test]
    fn test_csv_lines() {
        assert_eq!(to_csv_string(&fixture()), "500,75\n1000,25\n1500,75\n2000,25\n");
    }

    #[test]
    fn test_write_csv_matches_string() {
        let mut buf = Vec::new();
        write_csv(&fixture(), &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), to_csv_string(&fixture()));
    }

    #[test]
    fn test_rounding_and_truncation() {
        let actions = ActionSequence::new(vec![
            Action::new(0.0019, 0.5),
            Action::new(1.2349, 1.5),
            Action::new(2.5, 2.5),
            Action::new(3.0, 99.6),
        ]);
        assert_eq!(to_csv_string(&actions), "1,0\n1234,2\n2500,2\n3000,100\n");
    }

    #[test]
    fn test_funscript_document() {
        let script = Funscript::from_actions(&fixture());
        let value: serde_json::Value = serde_json::from_str(&script.to_json().unwrap()).unwrap();
        assert_eq!(value["actions"][0], serde_json::json!({"at": 500, "pos": 75}));
        assert_eq!(value["inverted"], false);
        assert_eq!(value["range"], 100);
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["metadata"]["duration"], 2);
        assert_eq!(value["metadata"]["type"], "basic");
        assert_eq!(value["metadata"]["license"], "None");
        assert_eq!(value["metadata"]["performers"], serde_json::json!([]));
    }

    #[test]
    fn test_funscript_parse_minimal() {
        let script = Funscript::from_json(r#"{"actions":[{"at":250,"pos":10}]}"#).unwrap();
        assert_eq!(script.range, 100);
        assert_eq!(script.metadata.kind, "basic");
        assert_eq!(script.to_actions().actions(), &[Action::new(0.25, 10.0)]);
    }

    #[test]
    fn test_render_hash_is_stable() {
        let a = render(&fixture(), ExportFormat::Funscript).unwrap();
        let b = render(&fixture(), ExportFormat::Funscript).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.extension, "funscript");
        assert_eq!(a.hash.len(), 64);

        let csv = render(&fixture(), ExportFormat::Csv).unwrap();
        assert_eq!(csv.extension, "csv");
        assert_ne!(csv.hash, a.hash);
    }

    #[test]
    fn test_empty_sequence() {
        let script = Funscript::from_actions(&ActionSequence::default());
        assert!(script.actions.is_empty());
        assert_eq!(script.metadata.duration, 0);
        assert_eq!(to_csv_string(&ActionSequence::default()), "");
    }
}
