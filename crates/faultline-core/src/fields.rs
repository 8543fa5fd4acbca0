//! Per-field validation detail
//!
//! A [`FieldMap`] keeps insertion order, which is also the line order of the
//! summary produced by [`summarize`].

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Heading of every validation summary
pub const SUMMARY_HEADING: &str = "Validation error";

/// Field name to complaint, in insertion order
pub type FieldMap = IndexMap<String, FieldDetail>;

/// What is wrong with a field
///
/// Upstream producers may report their own kinds (e.g. `"enum"` or
/// `"string"`), which are carried verbatim as [`FieldIssue::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldIssue {
    Required,
    Unknown,
    Invalid,
    Other(String),
}

impl FieldIssue {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Unknown => "unknown",
            Self::Invalid => "invalid",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for FieldIssue {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "required" => Self::Required,
            "unknown" => Self::Unknown,
            "invalid" => Self::Invalid,
            _ => Self::Other(kind),
        }
    }
}

impl From<&str> for FieldIssue {
    fn from(kind: &str) -> Self {
        Self::from(kind.to_owned())
    }
}

impl From<FieldIssue> for String {
    fn from(issue: FieldIssue) -> Self {
        match issue {
            FieldIssue::Other(kind) => kind,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation complaint about a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDetail {
    #[serde(rename = "type")]
    pub kind: FieldIssue,
    pub message: String,
}

impl FieldDetail {
    pub fn new(kind: impl Into<FieldIssue>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Summarize a field map into a single message
///
/// Produces the heading followed by one `  - <field>: <message> (<type>)`
/// line per field, in map order. Absent fields yield the bare heading.
pub fn summarize(fields: Option<&FieldMap>) -> String {
    let mut message = SUMMARY_HEADING.to_owned();

    for (field, detail) in fields.into_iter().flatten() {
        push_line(&mut message, field, &detail.message, detail.kind.as_str());
    }

    message
}

/// Summarize an arbitrary `{"fields": {...}}` payload
///
/// Payloads that are not an object, lack `fields`, or whose `fields` is not
/// an object yield the bare heading. Entries without a string `type` and
/// `message` are left out.
pub fn summarize_data(data: &Value) -> String {
    let mut message = SUMMARY_HEADING.to_owned();

    let Some(fields) = data.get("fields").and_then(Value::as_object) else {
        return message;
    };

    for (field, entry) in fields {
        let kind = entry.get("type").and_then(Value::as_str);
        let detail = entry.get("message").and_then(Value::as_str);

        if let (Some(kind), Some(detail)) = (kind, detail) {
            push_line(&mut message, field, detail, kind);
        }
    }

    message
}

fn push_line(message: &mut String, field: &str, detail: &str, kind: &str) {
    use std::fmt::Write;

    // Writing into a String cannot fail
    let _ = write!(message, "\n  - {field}: {detail} ({kind})");
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_and_absent_fields_yield_heading() {
        assert_eq!(summarize(None), "Validation error");
        assert_eq!(summarize(Some(&FieldMap::new())), "Validation error");
    }

    #[test]
    fn single_field_line() {
        let mut fields = FieldMap::new();
        fields.insert("a".to_owned(), FieldDetail::new(FieldIssue::Required, "a is required"));

        assert_eq!(summarize(Some(&fields)), "Validation error\n  - a: a is required (required)");
    }

    #[test]
    fn lines_follow_insertion_order() {
        let mut fields = FieldMap::new();
        fields.insert("zeta".to_owned(), FieldDetail::new("unknown", "zeta is not a known field"));
        fields.insert("alpha".to_owned(), FieldDetail::new("enum", "bad choice"));

        insta::assert_snapshot!(summarize(Some(&fields)), @r"
Validation error
  - zeta: zeta is not a known field (unknown)
  - alpha: bad choice (enum)
");
    }

    #[test]
    fn malformed_payloads_yield_heading() {
        assert_eq!(summarize_data(&Value::Null), "Validation error");
        assert_eq!(summarize_data(&json!("fields")), "Validation error");
        assert_eq!(summarize_data(&json!({})), "Validation error");
        assert_eq!(summarize_data(&json!({ "fields": [1, 2] })), "Validation error");
    }

    #[test]
    fn payload_entries_without_strings_are_skipped() {
        let data = json!({
            "fields": {
                "email": { "type": "required", "message": "email is required" },
                "age": { "type": 3 },
                "name": "oops",
            }
        });

        assert_eq!(summarize_data(&data), "Validation error\n  - email: email is required (required)");
    }

    #[test]
    fn issue_serializes_as_plain_string() {
        let detail = FieldDetail::new("string", "bad");
        assert_eq!(serde_json::to_value(&detail).unwrap(), json!({ "type": "string", "message": "bad" }));

        let parsed: FieldDetail = serde_json::from_value(json!({ "type": "invalid", "message": "x" })).unwrap();
        assert_eq!(parsed.kind, FieldIssue::Invalid);
    }
}
