//! Chart normalization: row objects into labels, one value series, and styling

use serde_json::Value;

use super::theme::{AxisStyle, Rgba, Theme};
use crate::payload::ChartKind;

/// Label used when a row has no usable category value.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// One numeric point of the series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub value: f64,
    /// True when the source field was missing or not numeric and `value` is the 0 default.
    pub defaulted: bool,
}

impl Point {
    fn defaulted() -> Self {
        Self {
            value: 0.0,
            defaulted: true,
        }
    }
}

/// The single labeled series a chart draws, with per-position colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<Point>,
    pub fill: Vec<Rgba>,
    pub border: Vec<Rgba>,
}

impl Series {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Everything a drawing backend needs to show one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartView {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Series,
    /// `None` for pie charts, which show a legend only.
    pub axes: Option<AxisStyle>,
    pub legend: Rgba,
}

impl ChartView {
    /// Normalize `rows` for a chart of `kind`, reading categories from `x`
    /// and values from `y`.
    pub fn build(kind: ChartKind, x: Option<&str>, y: Option<&str>, rows: &[Value], theme: &Theme) -> Self {
        let labels = rows.iter().map(|row| label_text(field(row, x))).collect();
        let points: Vec<Point> = rows.iter().map(|row| coerce_number(field(row, y))).collect();

        let fill = (0..points.len()).map(|i| theme.palette.fill(i)).collect();
        let border = (0..points.len()).map(|i| theme.palette.border(i)).collect();

        Self {
            kind,
            title: format!("Chart: {}", kind.as_str()),
            labels,
            series: Series {
                label: y.unwrap_or_default().to_string(),
                points,
                fill,
                border,
            },
            axes: kind.has_axes().then_some(theme.axis),
            legend: theme.label,
        }
    }

    /// Sum of the positive values. Negative slices hold no pie share.
    pub fn total(&self) -> f64 {
        self.series.points.iter().map(|p| p.value.max(0.0)).sum()
    }

    /// Fraction of the positive total held by point `index`, within `0.0..=1.0`.
    pub fn share(&self, index: usize) -> f64 {
        let total = self.total();
        let value = self.series.points.get(index).map_or(0.0, |p| p.value.max(0.0));
        if total > 0.0 && total.is_finite() {
            (value / total).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Largest value, or 0 for an all-negative or empty series.
    pub fn max_value(&self) -> f64 {
        self.series
            .points
            .iter()
            .map(|p| p.value)
            .fold(0.0, f64::max)
    }
}

fn field<'a>(row: &'a Value, name: Option<&str>) -> Option<&'a Value> {
    row.as_object()?.get(name?)
}

fn label_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => UNKNOWN_LABEL.to_string(),
        Some(Value::String(s)) if s.is_empty() => UNKNOWN_LABEL.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Standard string-to-number coercion. Anything that does not yield a
/// finite number becomes a defaulted 0.
pub fn coerce_number(value: Option<&Value>) -> Point {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                s.parse::<f64>().ok()
            }
        }
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };

    match parsed {
        Some(value) if value.is_finite() => Point {
            value,
            defaulted: false,
        },
        _ => Point::defaulted(),
    }
}

/// Format a chart value without a trailing `.0` for whole numbers.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(kind: ChartKind, rows: &[Value]) -> ChartView {
        ChartView::build(kind, Some("city"), Some("sales"), rows, &Theme::default())
    }

    #[test]
    fn test_labels_and_values_default() {
        let rows = vec![
            json!({"city": "X"}),
            json!({"city": "Y", "sales": "bad"}),
            json!({"sales": 42}),
        ];
        let view = build(ChartKind::Bar, &rows);

        assert_eq!(view.labels, vec!["X", "Y", "Unknown"]);
        assert_eq!(view.series.values(), vec![0.0, 0.0, 42.0]);
        assert_eq!(view.series.label, "sales");
        assert_eq!(view.title, "Chart: bar");
    }

    #[test]
    fn test_pie_share_ignores_negative_slices() {
        let rows = vec![
            json!({"city": "gain", "sales": 1e300}),
            json!({"city": "loss", "sales": -9.999999999999999e299}),
        ];
        let view = build(ChartKind::Pie, &rows);

        assert_eq!(view.total(), 1e300);
        assert_eq!(view.share(0), 1.0);
        assert_eq!(view.share(1), 0.0);
        assert_eq!(view.share(7), 0.0);

        let rows = vec![json!({"city": "a", "sales": 1}), json!({"city": "b", "sales": 3})];
        let view = build(ChartKind::Pie, &rows);
        assert_eq!(view.share(0), 0.25);
        assert_eq!(view.share(1), 0.75);
    }

    #[test]
    fn test_literal_zero_is_not_defaulted() {
        let rows = vec![json!({"city": "A", "sales": 0}), json!({"city": "B"})];
        let view = build(ChartKind::Line, &rows);

        assert_eq!(view.series.points[0], Point { value: 0.0, defaulted: false });
        assert_eq!(view.series.points[1], Point { value: 0.0, defaulted: true });
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(coerce_number(Some(&json!(" 12.5 "))).value, 12.5);
        assert_eq!(coerce_number(Some(&json!("1e3"))).value, 1000.0);
        assert_eq!(coerce_number(Some(&json!(true))).value, 1.0);
        assert!(coerce_number(Some(&json!(""))).defaulted);
        assert!(coerce_number(Some(&json!("NaN"))).defaulted);
        assert!(coerce_number(Some(&json!("inf"))).defaulted);
        assert!(coerce_number(Some(&json!(null))).defaulted);
        assert!(coerce_number(Some(&json!({"n": 1}))).defaulted);
        assert!(coerce_number(None).defaulted);
    }

    #[test]
    fn test_label_text_variants() {
        let rows = vec![
            json!({"city": 2024}),
            json!({"city": ""}),
            json!({"city": null}),
            json!({"city": {"id": 1}}),
            json!("not a row"),
        ];
        let view = build(ChartKind::Pie, &rows);
        assert_eq!(view.labels, vec!["2024", "Unknown", "Unknown", r#"{"id":1}"#, "Unknown"]);
    }

    #[test]
    fn test_pie_has_no_axes() {
        let rows = vec![json!({"city": "A", "sales": 1})];
        assert!(build(ChartKind::Pie, &rows).axes.is_none());
        assert_eq!(build(ChartKind::Bar, &rows).axes, Some(AxisStyle::default()));
        assert_eq!(build(ChartKind::Line, &rows).axes, Some(AxisStyle::default()));
    }

    #[test]
    fn test_colors_follow_position() {
        let rows: Vec<Value> = (0..7).map(|i| json!({"city": i, "sales": i})).collect();
        let theme = Theme::default();
        let view = build(ChartKind::Bar, &rows);

        assert_eq!(view.series.fill.len(), 7);
        assert_eq!(view.series.border[6], theme.palette.border(1));
        assert_eq!(view.series.fill[0].a, 0.6);
    }

    #[test]
    fn test_missing_axis_fields() {
        let rows = vec![json!({"city": "A", "sales": 3})];
        let view = ChartView::build(ChartKind::Bar, None, None, &rows, &Theme::default());
        assert_eq!(view.labels, vec!["Unknown"]);
        assert_eq!(view.series.values(), vec![0.0]);
        assert_eq!(view.series.label, "");
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(-3.0), "-3");
        assert_eq!(format_value(2.5), "2.50");
    }
}
