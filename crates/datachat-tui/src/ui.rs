use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Cell, Chart, Dataset, GraphType,
        Paragraph, Row, Table, Wrap,
    },
    Frame,
};

use datachat_core::plain;
use datachat_core::render::chart::format_value;
use datachat_core::render::{ChartView, Rgba, TableGrid};
use datachat_core::{ChartKind, Node, RenderTree, Role};

use crate::app::{App, InputMode};

const PLACEHOLDER: &str = "Ask something about your data...";

/// Bar values are integers; scale so fractional values still get height.
const BAR_SCALE: f64 = 100.0;

/// Table rows shown inline in the chat log; the result pane draws the rest.
const INLINE_TABLE_ROWS: usize = 20;

fn color(c: Rgba) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    // Conversation on the left, selected reply drawn on the right
    let [left_area, result_area] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(body_area);

    let [chat_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(left_area);

    // Store areas for mouse hit-testing
    app.chat_area = Some(chat_area);
    app.result_area = Some(result_area);

    render_chat(app, frame, chat_area);
    render_input(app, frame, input_area);
    render_result(app, frame, result_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let session: String = app.conversation.session_id().chars().take(8).collect();

    let title = Line::from(vec![
        Span::styled(" datachat ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("{} ", app.backend_label), Style::default().fg(Color::White)),
        Span::styled(format!("session {} ", session), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let (mode_text, mode_style) = match app.input_mode {
        InputMode::Normal => (" NORMAL ", Style::default().bg(Color::Blue).fg(Color::White)),
        InputMode::Editing => (" ASK ", Style::default().bg(Color::Yellow).fg(Color::Black)),
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hint = |key: &'static str, label: &'static str| {
        [Span::styled(key, key_style), Span::styled(label, label_style)]
    };

    let hints: Vec<Span> = match app.input_mode {
        InputMode::Editing => [
            hint(" Enter ", " send "),
            hint(" Up/Down ", " scroll "),
            hint(" Esc ", " stop typing "),
        ]
        .concat(),
        InputMode::Normal => [
            hint(" j/k ", " scroll "),
            hint(" g/G ", " top/bottom "),
            hint(" h/l ", " prev/next result "),
            hint(" i ", " ask "),
            hint(" q ", " quit "),
        ]
        .concat(),
    };

    let footer_content = Line::from(
        vec![Span::styled(mode_text, mode_style), Span::styled(" ", label_style)]
            .into_iter()
            .chain(hints)
            .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

/// Styled lines for one message in the chat log.
fn message_lines(tree: &RenderTree, in_result_pane: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut label = match tree.role {
        Role::User => vec![Span::styled(
            "You:",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )],
        Role::Bot => vec![Span::styled(
            "Bot:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )],
    };
    if in_result_pane {
        label.push(Span::styled(" (shown in result pane)", Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(label));

    if tree.is_empty() && tree.role == Role::Bot {
        lines.push(Line::from(Span::styled(
            "(no renderable content)",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    for node in &tree.nodes {
        match node {
            Node::Text(text) => {
                lines.extend(text.lines().map(|l| Line::from(l.to_string())));
            }
            Node::Explanation(text) => {
                let style = Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC);
                lines.extend(text.lines().map(|l| Line::from(Span::styled(l.to_string(), style))));
            }
            Node::Empty(state) => lines.push(Line::from(Span::styled(
                state.message(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))),
            Node::Notice(text) => {
                lines.push(Line::from(Span::styled(text.clone(), Style::default().fg(Color::Yellow))));
            }
            Node::Table(grid) => {
                let shown = TableGrid {
                    headers: grid.headers.clone(),
                    rows: grid.rows.iter().take(INLINE_TABLE_ROWS).cloned().collect(),
                };
                for (i, row) in plain::format_table(&shown).into_iter().enumerate() {
                    let style = match i {
                        0 => Style::default().add_modifier(Modifier::BOLD),
                        1 => Style::default().fg(Color::DarkGray),
                        _ => Style::default(),
                    };
                    lines.push(Line::from(Span::styled(row, style)));
                }
                let hidden = grid.rows.len().saturating_sub(INLINE_TABLE_ROWS);
                if hidden > 0 {
                    lines.push(Line::from(Span::styled(
                        format!("... {} more rows in result pane", hidden),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                    )));
                }
            }
            Node::Chart(view) => {
                let mut summary = format!("[{}", view.title);
                if !view.series.label.is_empty() {
                    summary.push_str(&format!(" of {}", view.series.label));
                }
                summary.push_str(&format!(", {} points]", view.series.points.len()));
                lines.push(Line::from(Span::styled(summary, Style::default().fg(Color::Magenta))));
            }
        }
    }

    lines.push(Line::default());
    lines
}

/// Rows a line occupies once wrapped to `width` columns.
fn wrapped_height(line: &Line, width: usize) -> usize {
    let chars = line.width();
    if chars == 0 || width == 0 {
        1
    } else {
        chars.div_ceil(width)
    }
}

/// Furthest scroll offset that still fills the view, saturated to what `Paragraph::scroll` takes.
fn max_scroll(lines: &[Line], width: usize, height: u16) -> u16 {
    let total: usize = lines.iter().map(|l| wrapped_height(l, width)).sum();
    u16::try_from(total.saturating_sub(height as usize)).unwrap_or(u16::MAX)
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    let normal_focus = app.input_mode == InputMode::Normal;
    let border_color = if normal_focus { Color::Cyan } else { Color::DarkGray };

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Conversation ");

    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let lines: Vec<Line> = if app.trees.is_empty() && !app.is_loading() {
        vec![Line::from(Span::styled(PLACEHOLDER, Style::default().fg(Color::DarkGray)))]
    } else {
        let shown = app.result_index();
        let mut lines: Vec<Line> = app
            .trees
            .iter()
            .enumerate()
            .flat_map(|(i, tree)| message_lines(tree, tree.role == Role::Bot && Some(i) == shown))
            .collect();

        if app.is_loading() {
            lines.push(Line::from(Span::styled(
                "Bot:",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )));
            // Animated ellipsis: cycles through ".", "..", "..."
            let dots = ".".repeat((app.animation_frame as usize) + 1);
            lines.push(Line::from(Span::styled(
                format!("Processing{}", dots),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    };

    // Keep the newest message in view unless the user scrolled away
    let width = app.chat_width as usize;
    let max_scroll = max_scroll(&lines, width, app.chat_height);
    if app.follow_tail {
        app.chat_scroll = max_scroll;
    } else {
        app.chat_scroll = app.chat_scroll.min(max_scroll);
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .wrap(Wrap { trim: false })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if app.is_loading() {
        Color::DarkGray
    } else if editing {
        Color::Yellow
    } else {
        Color::Gray
    };
    let title = if app.is_loading() { " Waiting for reply " } else { " Ask " };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    // Calculate visible portion of input with horizontal scrolling
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;

    // Calculate scroll offset to keep cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let buffer = app.conversation.input();
    let input = if buffer.is_empty() {
        Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        let visible_text: String = buffer.chars().skip(scroll_offset).take(inner_width).collect();
        let fg = if app.is_loading() { Color::DarkGray } else { Color::Cyan };
        Paragraph::new(visible_text).style(Style::default().fg(fg))
    };

    frame.render_widget(input.block(input_block), area);

    // Show cursor when editing
    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_result(app: &App, frame: &mut Frame, area: Rect) {
    let replies = app.trees.iter().filter(|t| t.role == Role::Bot).count();
    let position = app
        .result_index()
        .map(|idx| app.trees.iter().take(idx).filter(|t| t.role == Role::Bot).count() + 1);

    let title = match position {
        Some(pos) => format!(" Result {}/{} ", pos, replies),
        None => " Result ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(title);

    let Some((_, tree)) = app.result_message() else {
        let empty = Paragraph::new(Span::styled(
            "Results appear here",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let explanation = tree.nodes.iter().find_map(|n| match n {
        Node::Explanation(text) => Some(text.as_str()),
        _ => None,
    });

    match tree.visual() {
        Some(visual) => {
            let explanation_height = explanation
                .map(|t| (t.lines().count() as u16 + 1).min(inner.height / 3))
                .unwrap_or(0);
            let [explanation_area, visual_area] = Layout::vertical([
                Constraint::Length(explanation_height),
                Constraint::Min(0),
            ])
            .areas(inner);

            if let Some(text) = explanation {
                let paragraph = Paragraph::new(text.to_string())
                    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, explanation_area);
            }

            match visual {
                Node::Table(grid) => render_table(grid, frame, visual_area),
                Node::Chart(view) => render_chart(view, frame, visual_area),
                _ => {}
            }
        }
        None => {
            let lines: Vec<Line> = if tree.is_empty() {
                vec![Line::from(Span::styled(
                    "(no renderable content)",
                    Style::default().fg(Color::DarkGray),
                ))]
            } else {
                plain::format(tree).into_iter().map(Line::from).collect()
            };
            let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
            frame.render_widget(paragraph, inner);
        }
    }
}

fn render_table(grid: &TableGrid, frame: &mut Frame, area: Rect) {
    let widths: Vec<Constraint> = grid
        .column_widths()
        .into_iter()
        .map(|w| Constraint::Length(w.clamp(1, 40) as u16))
        .collect();

    let header = Row::new(grid.headers.iter().map(|h| Cell::from(h.clone())))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows = grid
        .rows
        .iter()
        .map(|row| Row::new(row.iter().map(|cell| Cell::from(cell.clone()))));

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(2);

    frame.render_widget(table, area);
}

fn chart_block(view: &ChartView) -> Block<'static> {
    let border = view.axes.map(|a| color(a.grid)).unwrap_or(Color::DarkGray);
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(view.title.clone(), Style::default().fg(color(view.legend))))
}

fn render_chart(view: &ChartView, frame: &mut Frame, area: Rect) {
    match view.kind {
        ChartKind::Bar => render_bar_chart(view, frame, area),
        ChartKind::Line => render_line_chart(view, frame, area),
        ChartKind::Pie => render_pie_legend(view, frame, area),
    }
}

fn render_bar_chart(view: &ChartView, frame: &mut Frame, area: Rect) {
    let tick = view.axes.map(|a| color(a.tick)).unwrap_or(Color::Gray);

    let bars: Vec<Bar> = view
        .labels
        .iter()
        .zip(&view.series.points)
        .enumerate()
        .map(|(i, (label, point))| {
            Bar::default()
                .value((point.value.max(0.0) * BAR_SCALE).round() as u64)
                .text_value(format_value(point.value))
                .label(Line::from(label.clone()))
                .style(Style::default().fg(color(view.series.border[i])))
        })
        .collect();

    // Spread bars over the available width
    let count = bars.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(2) / count).saturating_sub(1).clamp(1, 12);

    let chart = BarChart::default()
        .block(chart_block(view))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .label_style(Style::default().fg(tick))
        .value_style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD));

    frame.render_widget(chart, area);
}

fn render_line_chart(view: &ChartView, frame: &mut Frame, area: Rect) {
    let tick = view.axes.map(|a| color(a.tick)).unwrap_or(Color::Gray);
    let axis_style = Style::default().fg(tick);

    let points: Vec<(f64, f64)> = view
        .series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value))
        .collect();

    let y_min = points.iter().map(|p| p.1).fold(0.0, f64::min);
    let y_max = points.iter().map(|p| p.1).fold(y_min + 1.0, f64::max);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    // First, middle and last category labels
    let n = view.labels.len();
    let label_indices: Vec<usize> = match n {
        0 => vec![],
        1 => vec![0],
        2 => vec![0, 1],
        _ => vec![0, n / 2, n - 1],
    };
    let x_labels: Vec<Span> = label_indices
        .into_iter()
        .map(|i| Span::raw(view.labels[i].clone()))
        .collect();

    let y_labels: Vec<Span> = [y_min, (y_min + y_max) / 2.0, y_max]
        .into_iter()
        .map(|v| Span::raw(format_value(v)))
        .collect();

    let line_color = view.series.border.first().copied().map(color).unwrap_or(Color::Cyan);
    let dataset = Dataset::default()
        .name(view.series.label.clone())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(line_color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(chart_block(view))
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([y_min, y_max])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Pie charts become a legend with each slice's share drawn as a bar.
fn render_pie_legend(view: &ChartView, frame: &mut Frame, area: Rect) {
    let block = chart_block(view);
    let inner_width = block.inner(area).width as usize;
    let label_width = view.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0).min(24);

    let mut lines = Vec::with_capacity(view.labels.len() + 1);
    if !view.series.label.is_empty() {
        lines.push(Line::from(Span::styled(
            view.series.label.clone(),
            Style::default().fg(color(view.legend)).add_modifier(Modifier::BOLD),
        )));
    }

    for (i, (label, point)) in view.labels.iter().zip(&view.series.points).enumerate() {
        let share = view.share(i);
        let text = format!(
            "{:<width$} {:>8} {:>5.1}% ",
            label.chars().take(label_width).collect::<String>(),
            format_value(point.value),
            share * 100.0,
            width = label_width
        );
        let bar_room = inner_width.saturating_sub(text.chars().count() + 2);
        let slice_color = color(view.series.border[i]);

        lines.push(Line::from(vec![
            Span::styled("■ ", Style::default().fg(slice_color)),
            Span::styled(text, Style::default().fg(color(view.legend))),
            Span::styled(
                "█".repeat(((share * bar_room as f64).round() as usize).min(bar_room)),
                Style::default().fg(slice_color),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use datachat_core::{render, Envelope, Message};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn bot_tree(body: serde_json::Value) -> RenderTree {
        render(&Message::bot(Envelope::from_value(body).unwrap()))
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_message_lines_for_table() {
        let tree = bot_tree(json!({
            "type": "TABLE",
            "data": [{"a": 1}, {"b": 2}],
            "explanation": "two rows"
        }));
        let lines: Vec<String> = message_lines(&tree, true).iter().map(line_text).collect();

        assert_eq!(lines[0], "Bot: (shown in result pane)");
        assert_eq!(lines[1], "two rows");
        assert_eq!(lines[2], "a | b");
        assert_eq!(lines.last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_message_lines_for_unknown_payload() {
        let tree = bot_tree(json!({"type": "GRAPH"}));
        let lines: Vec<String> = message_lines(&tree, false).iter().map(line_text).collect();
        assert_eq!(lines, vec!["Bot:", "(no renderable content)", ""]);
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height(&Line::from(""), 10), 1);
        assert_eq!(wrapped_height(&Line::from("0123456789"), 10), 1);
        assert_eq!(wrapped_height(&Line::from("0123456789a"), 10), 2);
    }

    #[test]
    fn test_long_table_is_capped_in_chat_log() {
        let rows: Vec<_> = (0..70_000).map(|i| json!({"id": i})).collect();
        let tree = bot_tree(json!({"type": "TABLE", "data": rows}));
        let lines: Vec<String> = message_lines(&tree, false).iter().map(line_text).collect();

        // label, header, rule, inline rows, overflow note, spacer
        assert_eq!(lines.len(), INLINE_TABLE_ROWS + 5);
        assert_eq!(lines[lines.len() - 2], "... 69980 more rows in result pane");
    }

    #[test]
    fn test_max_scroll_saturates() {
        let lines = vec![Line::from("x"); 70_000];
        assert_eq!(max_scroll(&lines, 10, 20), 65_535);
        assert_eq!(max_scroll(&lines[..30], 10, 20), 10);
        assert_eq!(max_scroll(&lines[..5], 10, 20), 0);
    }

    #[test]
    fn test_large_table_reply_draws() {
        struct IdleBackend;

        #[async_trait::async_trait]
        impl datachat_core::QueryBackend for IdleBackend {
            async fn query(
                &self,
                _request: &datachat_core::QueryRequest,
            ) -> Result<Envelope, datachat_core::BackendError> {
                Ok(Envelope::new(datachat_core::Payload::text("")))
            }
        }

        let mut app = App::new(
            std::sync::Arc::new(IdleBackend),
            "idle".to_string(),
            datachat_core::Renderer::default(),
        );
        let rows: Vec<_> = (0..70_000).map(|i| json!({"id": i, "name": "row"})).collect();
        assert!(app.conversation.begin("everything").is_some());
        app.conversation
            .complete(Envelope::from_value(json!({"type": "TABLE", "data": rows})));
        app.sync();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| super::render(&mut app, frame)).unwrap();

        assert!(app.follow_tail);
        assert!(app.chat_scroll < 40);
    }

    #[test]
    fn test_pie_legend_with_negative_slice() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let tree = bot_tree(json!({
            "type": "CHART",
            "data": [{"k": "gain", "v": 1e300}, {"k": "loss", "v": -9.999999999999999e299}],
            "chart": {"type": "pie", "x": "k", "y": "v"}
        }));
        let Some(Node::Chart(view)) = tree.visual() else {
            panic!("expected chart");
        };

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_pie_legend(view, frame, area);
            })
            .unwrap();
    }

    #[test]
    fn test_charts_draw_without_panicking() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();

        for kind in ["bar", "line", "pie"] {
            let tree = bot_tree(json!({
                "type": "CHART",
                "data": [{"c": "X", "v": 3}, {"c": "Y", "v": "bad"}, {"v": 4.5}],
                "chart": {"type": kind, "x": "c", "y": "v"}
            }));
            let Some(Node::Chart(view)) = tree.visual() else {
                panic!("expected chart for {}", kind);
            };
            terminal
                .draw(|frame| {
                    let area = frame.area();
                    render_chart(view, frame, area);
                })
                .unwrap();
        }
    }

    #[test]
    fn test_table_draws_headers() {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let tree = bot_tree(json!({"type": "TABLE", "data": [{"city": "Pune", "n": 3}]}));
        let Some(Node::Table(grid)) = tree.visual() else {
            panic!("expected table");
        };

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_table(grid, frame, area);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let first_row: String = buffer.content()[..width]
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(first_row.starts_with("city  n"));
    }
}
