//! Plain-text layout of render trees, for terminals without a drawing surface.

use crate::payload::ChartKind;
use crate::render::chart::format_value;
use crate::render::{ChartView, Node, RenderTree, TableGrid};

/// Widest proportional bar drawn for bar and pie charts.
const BAR_WIDTH: usize = 30;

/// Lay out every node of `tree` as lines of text.
pub fn format(tree: &RenderTree) -> Vec<String> {
    let mut lines = Vec::new();
    for node in &tree.nodes {
        match node {
            Node::Text(text) | Node::Explanation(text) | Node::Notice(text) => {
                lines.extend(text.lines().map(str::to_string));
            }
            Node::Empty(state) => lines.push(state.message().to_string()),
            Node::Table(grid) => lines.extend(format_table(grid)),
            Node::Chart(view) => lines.extend(format_chart(view)),
        }
    }
    lines
}

/// Aligned grid with a header rule.
pub fn format_table(grid: &TableGrid) -> Vec<String> {
    let widths = grid.column_widths();
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(grid.rows.len() + 2);
    lines.push(line(&grid.headers));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(grid.rows.iter().map(|row| line(row)));
    lines
}

/// Title, series name, then one line per point.
pub fn format_chart(view: &ChartView) -> Vec<String> {
    let label_width = view.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let mut lines = vec![view.title.clone()];
    if !view.series.label.is_empty() {
        lines.push(format!("[{}]", view.series.label));
    }

    let max = view.max_value();
    for (i, (label, point)) in view.labels.iter().zip(&view.series.points).enumerate() {
        let mut text = format!("{}  {}", pad(label, label_width), format_value(point.value));
        let fraction = match view.kind {
            ChartKind::Pie => {
                let share = view.share(i);
                text.push_str(&format!(" ({:.1}%)", share * 100.0));
                share
            }
            ChartKind::Bar | ChartKind::Line => fraction_of(point.value, max),
        };
        if view.kind != ChartKind::Line {
            let len = bar_len(fraction);
            if len > 0 {
                text.push(' ');
                text.push_str(&"#".repeat(len));
            }
        }
        lines.push(text);
    }
    lines
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn fraction_of(value: f64, max: f64) -> f64 {
    if max > 0.0 && max.is_finite() {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Bar length for a fraction of the full width; never wider than `BAR_WIDTH`.
fn bar_len(fraction: f64) -> usize {
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH)
}
