//! Canonical hashing of generation inputs.
//!
//! A generation run is fully determined by its features and parameters, so
//! the BLAKE3 hash of their canonical JSON identifies the run in reports:
//!
//! ```text
//! input_hash = hex(BLAKE3(JCS({"features": ..., "parameters": ...})))
//! ```

use crate::error::SpecError;
use crate::features::AudioFeatures;
use crate::params::CalibrationParameters;

/// Computes the canonical BLAKE3 hash of a features/parameters pair.
///
/// # Example
/// ```
/// use dancer_spec::{AudioFeatures, CalibrationParameters};
/// use dancer_spec::hash::canonical_input_hash;
///
/// let features = AudioFeatures::new(3.0, vec![1.0, 2.0], vec![1.0, 2.0], vec![0.5, 0.6]);
/// let hash = canonical_input_hash(&features, &CalibrationParameters::default()).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_input_hash(
    features: &AudioFeatures,
    params: &CalibrationParameters,
) -> Result<String, SpecError> {
    let value = serde_json::json!({
        "features": features.to_value()?,
        "parameters": serde_json::to_value(params)?,
    });
    Ok(canonical_value_hash(&value))
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> String {
    let canonical = canonicalize_json(value);
    blake3::hash(canonical.as_bytes()).to_hex().to_string()
}

/// Hex BLAKE3 hash of raw bytes.
pub fn bytes_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}

/// Canonicalizes a JSON value following RFC 8785 (JCS): sorted keys, no
/// whitespace, minimal string escaping.
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => format_jcs_number(n),
        serde_json::Value::String(s) => format_jcs_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_jcs_string(k), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_jcs_number(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            if f == 0.0 {
                return "0".to_string();
            }
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return format!("{}", f as i64);
            }
            let s = format!("{}", f);
            if s.contains('.') && !s.contains('e') {
                return s.trim_end_matches('0').trim_end_matches('.').to_string();
            }
            s
        }
        _ => "null".to_string(),
    }
}

fn format_jcs_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => result.push_str(&format!("\\u{:04x}", c as u32)),
            c => result.push(c),
        }
    }
    result.push('"');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::OverflowPolicy;

    fn features() -> AudioFeatures {
        AudioFeatures::new(4.0, vec![1.0, 2.0, 3.0], vec![1.0, 1.5, 1.2], vec![0.1, 0.4, 0.2])
    }

    #[test]
    fn test_canonical_key_order() {
        let value = serde_json::json!({"b": 1, "a": [true, null], "c": "x"});
        assert_eq!(canonicalize_json(&value), r#"{"a":[true,null],"b":1,"c":"x"}"#);
    }

    #[test]
    fn test_float_formatting() {
        let value = serde_json::json!({"x": 2.0, "y": 0.25, "z": 0.0});
        assert_eq!(canonicalize_json(&value), r#"{"x":2,"y":0.25,"z":0}"#);
    }

    #[test]
    fn test_input_hash_stable() {
        let params = CalibrationParameters::default();
        let a = canonical_input_hash(&features(), &params).unwrap();
        let b = canonical_input_hash(&features(), &params).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_input_hash_depends_on_parameters() {
        let a = canonical_input_hash(&features(), &CalibrationParameters::default()).unwrap();
        let b = canonical_input_hash(
            &features(),
            &CalibrationParameters::default().with_policy(OverflowPolicy::Bounce),
        )
        .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_bytes_hash() {
        assert_eq!(bytes_hash(b"abc"), blake3::hash(b"abc").to_hex().to_string());
    }
}
