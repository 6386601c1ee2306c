//! Typed view of the backend's response envelope
//!
//! The backend speaks loosely-typed JSON. Everything is parsed here, once,
//! into a closed set of variants; anything unrecognized lands in
//! [`Payload::Unknown`] instead of failing.

use serde_json::{Map, Value};

use crate::error::BackendError;

/// The kind-tagged body of a bot reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text { data: Option<Value> },
    Table { data: Option<Value> },
    Chart { data: Option<Value>, chart: Option<ChartSpec> },
    /// A tag this client does not know how to draw.
    Unknown { tag: Option<String> },
}

impl Payload {
    /// Plain text reply, used for locally generated messages.
    pub fn text(text: impl Into<String>) -> Self {
        Payload::Text {
            data: Some(Value::String(text.into())),
        }
    }

    /// Parse the payload part of an envelope object.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let tag = object.get("type").and_then(Value::as_str);
        let data = object.get("data").filter(|v| !v.is_null()).cloned();

        match tag.map(str::to_ascii_uppercase).as_deref() {
            Some("TEXT") => Payload::Text { data },
            Some("TABLE") => Payload::Table { data },
            Some("CHART") => Payload::Chart {
                data,
                chart: object.get("chart").and_then(ChartSpec::from_value),
            },
            _ => Payload::Unknown {
                tag: tag.map(str::to_string),
            },
        }
    }

    pub fn kind_name(&self) -> &str {
        match self {
            Payload::Text { .. } => "TEXT",
            Payload::Table { .. } => "TABLE",
            Payload::Chart { .. } => "CHART",
            Payload::Unknown { tag } => tag.as_deref().unwrap_or("UNKNOWN"),
        }
    }
}

/// Which field feeds the category axis, which feeds the values, and how to draw them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    /// Raw chart type as sent (`bar`, `pie`, `line`, or anything else).
    pub kind: String,
    pub x: Option<String>,
    pub y: Option<String>,
}

impl ChartSpec {
    pub fn new(kind: &str, x: &str, y: &str) -> Self {
        Self {
            kind: kind.to_string(),
            x: Some(x.to_string()),
            y: Some(y.to_string()),
        }
    }

    /// Lenient parse: non-objects yield `None`, non-string fields are treated as absent.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let field = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            kind: field("type").unwrap_or_default(),
            x: field("x"),
            y: field("y"),
        })
    }

    pub fn chart_kind(&self) -> Option<ChartKind> {
        ChartKind::parse(&self.kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

impl ChartKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Some(ChartKind::Bar),
            "pie" => Some(ChartKind::Pie),
            "line" => Some(ChartKind::Line),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Line => "line",
        }
    }

    /// Pie charts are drawn with a legend only.
    pub fn has_axes(&self) -> bool {
        !matches!(self, ChartKind::Pie)
    }
}

/// A successful backend reply: the payload plus its optional explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub payload: Payload,
    pub explanation: Option<String>,
}

impl Envelope {
    pub fn new(payload: Payload) -> Self {
        Self {
            payload,
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Parse a decoded response body. Only a non-object body is an error.
    pub fn from_value(value: Value) -> Result<Self, BackendError> {
        let Value::Object(object) = value else {
            return Err(BackendError::decode(format!(
                "expected a JSON object, got {}",
                json_type_name(&value)
            )));
        };

        let explanation = object
            .get("explanation")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            payload: Payload::from_object(&object),
            explanation,
        })
    }

    /// Parse a raw response body.
    pub fn from_json(body: &str) -> Result<Self, BackendError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| BackendError::decode(e.to_string()))?;
        Self::from_value(value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_table_envelope() {
        let env = Envelope::from_value(json!({
            "type": "TABLE",
            "data": [{"a": 1}],
            "explanation": "Top rows"
        }))
        .unwrap();

        assert_eq!(env.explanation.as_deref(), Some("Top rows"));
        assert_eq!(
            env.payload,
            Payload::Table {
                data: Some(json!([{"a": 1}]))
            }
        );
    }

    #[test]
    fn test_tag_matching_ignores_case() {
        let env = Envelope::from_value(json!({"type": "chart", "data": [], "chart": {"type": "Bar", "x": "k", "y": "v"}})).unwrap();
        match env.payload {
            Payload::Chart { chart: Some(spec), .. } => {
                assert_eq!(spec.chart_kind(), Some(ChartKind::Bar));
                assert_eq!(spec.kind, "Bar");
            }
            other => panic!("unexpected payload: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_tag_is_not_an_error() {
        let env = Envelope::from_value(json!({"type": "MAP", "data": [1, 2]})).unwrap();
        assert_eq!(
            env.payload,
            Payload::Unknown {
                tag: Some("MAP".to_string())
            }
        );

        let env = Envelope::from_value(json!({"data": "hello"})).unwrap();
        assert_eq!(env.payload, Payload::Unknown { tag: None });
    }

    #[test]
    fn test_null_data_is_absent() {
        let env = Envelope::from_value(json!({"type": "TEXT", "data": null})).unwrap();
        assert_eq!(env.payload, Payload::Text { data: None });
    }

    #[test]
    fn test_non_string_explanation_is_ignored() {
        let env = Envelope::from_value(json!({"type": "TEXT", "data": "x", "explanation": 42})).unwrap();
        assert_eq!(env.explanation, None);
    }

    #[test]
    fn test_chart_spec_lenient_fields() {
        let spec = ChartSpec::from_value(&json!({"type": "pie", "x": 3, "y": "total"})).unwrap();
        assert_eq!(spec.x, None);
        assert_eq!(spec.y.as_deref(), Some("total"));

        assert_eq!(ChartSpec::from_value(&json!("bar")), None);
    }

    #[test]
    fn test_non_object_body_is_decode_error() {
        assert!(matches!(
            Envelope::from_value(json!([1, 2, 3])),
            Err(BackendError::Decode(_))
        ));
        assert!(matches!(
            Envelope::from_json("<html>oops</html>"),
            Err(BackendError::Decode(_))
        ));
    }
}
