//! Response rendering
//!
//! Turns a [`Message`] into a [`RenderTree`]: a description of what to show,
//! independent of any UI toolkit. Rendering is pure and total. Malformed or
//! partial payloads degrade to an empty-state indicator, a placeholder, or
//! nothing at all, never to an error.

pub mod chart;
pub mod table;
pub mod theme;

use serde_json::Value;

use crate::message::{Message, Role};
use crate::payload::{ChartSpec, Payload};

pub use chart::{ChartView, Point, Series};
pub use table::TableGrid;
pub use theme::{AxisStyle, Palette, Rgba, Theme};

/// Designated "nothing to show" indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoTableData,
    NoChartData,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::NoTableData => "No data found",
            EmptyState::NoChartData => "No data for chart",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text: user content or a TEXT payload.
    Text(String),
    /// Explanation shown above a bot payload.
    Explanation(String),
    Empty(EmptyState),
    /// Fallback message, e.g. for an unsupported chart type.
    Notice(String),
    Table(TableGrid),
    Chart(ChartView),
}

/// Renderable description of one message, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTree {
    pub role: Role,
    pub nodes: Vec<Node>,
}

impl RenderTree {
    /// True when the message has no renderable content.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The table or chart node, if the message carries one.
    pub fn visual(&self) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| matches!(n, Node::Table(_) | Node::Chart(_)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn render(&self, message: &Message) -> RenderTree {
        let nodes = match message {
            Message::User { content } => vec![Node::Text(content.clone())],
            Message::Bot {
                explanation,
                payload,
            } => {
                let mut nodes = Vec::with_capacity(2);
                if let Some(text) = explanation.as_deref().filter(|t| !t.is_empty()) {
                    nodes.push(Node::Explanation(text.to_string()));
                }
                nodes.extend(self.render_payload(payload));
                nodes
            }
        };

        RenderTree {
            role: message.role(),
            nodes,
        }
    }

    pub fn render_payload(&self, payload: &Payload) -> Option<Node> {
        match payload {
            Payload::Text { data } => render_text(data.as_ref()),
            Payload::Table { data } => Some(match non_empty_rows(data.as_ref()) {
                Some(rows) => Node::Table(TableGrid::from_rows(rows)),
                None => Node::Empty(EmptyState::NoTableData),
            }),
            Payload::Chart { data, chart } => self.render_chart(data.as_ref(), chart.as_ref()),
            Payload::Unknown { .. } => None,
        }
    }

    fn render_chart(&self, data: Option<&Value>, spec: Option<&ChartSpec>) -> Option<Node> {
        let Some(rows) = non_empty_rows(data) else {
            return Some(Node::Empty(EmptyState::NoChartData));
        };
        // Without a chart description there is nothing to plot.
        let spec = spec?;

        match spec.chart_kind() {
            Some(kind) => Some(Node::Chart(ChartView::build(
                kind,
                spec.x.as_deref(),
                spec.y.as_deref(),
                rows,
                &self.theme,
            ))),
            None => Some(Node::Notice(format!("Unsupported chart type: {}", spec.kind))),
        }
    }
}

/// Render with the default theme.
pub fn render(message: &Message) -> RenderTree {
    Renderer::default().render(message)
}

fn render_text(data: Option<&Value>) -> Option<Node> {
    match data? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(Node::Text(s.clone())),
        other => Some(Node::Text(other.to_string())),
    }
}

fn non_empty_rows(data: Option<&Value>) -> Option<&[Value]> {
    data?
        .as_array()
        .map(Vec::as_slice)
        .filter(|rows| !rows.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::Envelope;
    use serde_json::json;

    fn bot(body: Value) -> Message {
        Message::bot(Envelope::from_value(body).unwrap())
    }

    #[test]
    fn test_user_message_is_literal_text() {
        let tree = render(&Message::user("show **sales**"));
        assert_eq!(tree.role, Role::User);
        assert_eq!(tree.nodes, vec![Node::Text("show **sales**".to_string())]);
    }

    #[test]
    fn test_explanation_comes_first() {
        let tree = render(&bot(json!({"type": "TEXT", "data": "42", "explanation": "Count of orders"})));
        assert_eq!(
            tree.nodes,
            vec![
                Node::Explanation("Count of orders".to_string()),
                Node::Text("42".to_string())
            ]
        );
    }

    #[test]
    fn test_structured_text_is_serialized() {
        let tree = render(&bot(json!({"type": "TEXT", "data": {"total": 5}})));
        assert_eq!(tree.nodes, vec![Node::Text(r#"{"total":5}"#.to_string())]);
    }

    #[test]
    fn test_missing_text_data_renders_nothing() {
        assert!(render(&bot(json!({"type": "TEXT"}))).is_empty());
    }

    #[test]
    fn test_table_empty_states() {
        for body in [
            json!({"type": "TABLE", "data": []}),
            json!({"type": "TABLE"}),
            json!({"type": "TABLE", "data": "oops"}),
        ] {
            let tree = render(&bot(body));
            assert_eq!(tree.nodes, vec![Node::Empty(EmptyState::NoTableData)]);
        }
    }

    #[test]
    fn test_chart_empty_states() {
        for body in [
            json!({"type": "CHART", "data": [], "chart": {"type": "bar", "x": "a", "y": "b"}}),
            json!({"type": "CHART", "chart": {"type": "bar", "x": "a", "y": "b"}}),
        ] {
            let tree = render(&bot(body));
            assert_eq!(tree.nodes, vec![Node::Empty(EmptyState::NoChartData)]);
        }
    }

    #[test]
    fn test_unsupported_chart_type() {
        let tree = render(&bot(json!({
            "type": "CHART",
            "data": [{"a": 1}],
            "chart": {"type": "radar", "x": "a", "y": "a"}
        })));
        assert_eq!(tree.nodes, vec![Node::Notice("Unsupported chart type: radar".to_string())]);
    }

    #[test]
    fn test_chart_without_spec_renders_nothing() {
        let tree = render(&bot(json!({"type": "CHART", "data": [{"a": 1}]})));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_unknown_tag_renders_nothing() {
        let tree = render(&bot(json!({"type": "HEATMAP", "data": [1], "explanation": "hm"})));
        assert_eq!(tree.nodes, vec![Node::Explanation("hm".to_string())]);
    }

    #[test]
    fn test_chart_dispatch() {
        let tree = render(&bot(json!({
            "type": "CHART",
            "data": [{"city": "X"}, {"city": "Y", "sales": "bad"}, {"sales": 42}],
            "chart": {"type": "line", "x": "city", "y": "sales"}
        })));

        match tree.visual() {
            Some(Node::Chart(view)) => {
                assert_eq!(view.labels, vec!["X", "Y", "Unknown"]);
                assert_eq!(view.series.values(), vec![0.0, 0.0, 42.0]);
            }
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let message = bot(json!({
            "type": "TABLE",
            "data": [{"a": 1, "b": [1, 2]}, {"c": null}],
            "explanation": "rows"
        }));
        assert_eq!(render(&message), render(&message));
    }

    #[test]
    fn test_custom_palette_is_used() {
        let theme = Theme::default().with_palette(Palette::from_hex(&["#000000"]));
        let renderer = Renderer::new(theme);
        let tree = renderer.render(&bot(json!({
            "type": "CHART",
            "data": [{"k": "a", "v": 1}, {"k": "b", "v": 2}],
            "chart": {"type": "pie", "x": "k", "y": "v"}
        })));

        let Some(Node::Chart(view)) = tree.visual() else {
            panic!("expected chart");
        };
        assert_eq!(view.series.border, vec![Rgba::opaque(0, 0, 0); 2]);
    }
}
