//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, BorderType, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table,
        Wrap,
    },
    Frame,
};
use runlog_core::analytics::Dashboard;
use runlog_core::format::{display_date, display_person, entries_label, format_miles};

use crate::app::{App, InputMode};

/// Most validation errors shown at once before scrolling
const MAX_VISIBLE_ERRORS: usize = 6;

/// Headline numbers
const ACCENT: Color = Color::Rgb(0, 200, 200);
/// Success banner
const SUCCESS: Color = Color::Rgb(50, 205, 50);
/// Validation and load errors
const ERROR: Color = Color::Rgb(230, 80, 80);
/// Chart line
const CHART_LINE: Color = Color::Rgb(255, 180, 100);
/// Label color for metric names
const LABEL_COLOR: Color = Color::Rgb(100, 180, 180);
/// Dim gray for secondary text
const DIM: Color = Color::Rgb(128, 128, 128);

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::vertical([
        Constraint::Length(2),                   // Header
        Constraint::Length(status_height(app)),  // Status / errors
        Constraint::Length(3),                   // Person selector
        Constraint::Min(7),                      // Overall card + per-person table
        Constraint::Length(app.chart_height),    // Chart
        Constraint::Length(1),                   // Footer
    ])
    .split(area);

    render_header(frame, app, chunks[0]);
    render_status(frame, app, chunks[1]);
    render_selector(frame, app, chunks[2]);

    let stats = Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[3]);
    render_overall_card(frame, app.dashboard.as_ref(), stats[0]);
    render_person_table(frame, app.dashboard.as_ref(), stats[1]);

    render_chart(frame, app.dashboard.as_ref(), chunks[4]);
    render_footer(frame, app, chunks[5]);
}

fn status_height(app: &App) -> u16 {
    if matches!(app.input_mode, InputMode::OpenPath { .. }) {
        return 4;
    }
    match &app.outcome {
        _ if app.load_error.is_some() => 3,
        Some(outcome) if !outcome.errors.is_empty() => {
            outcome.errors.len().min(MAX_VISIBLE_ERRORS) as u16 + 2
        }
        Some(_) => 3,
        None => 6,
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let file = app
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "no file".to_string());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(" runlog", Style::default().fg(Color::Cyan).bold()),
        Span::styled("  Running Log Dashboard  ", Style::default().fg(DIM)),
        Span::raw(file),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

/// Render the open prompt, load result, or validation errors.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    if let InputMode::OpenPath { buffer } = &app.input_mode {
        let lines = vec![
            Line::from(vec![
                Span::styled("Path: ", Style::default().fg(LABEL_COLOR)),
                Span::raw(buffer.as_str()),
                Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            ]),
            Line::styled("Enter load  Esc cancel", Style::default().fg(DIM)),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(block.title(" Open CSV File ")),
            area,
        );
        return;
    }

    if let Some(err) = &app.load_error {
        let paragraph = Paragraph::new(Line::styled(format!("✗ {}", err), Style::default().fg(ERROR)))
            .wrap(Wrap { trim: true })
            .block(block.title(" Load Failed ").border_style(Style::default().fg(ERROR)));
        frame.render_widget(paragraph, area);
        return;
    }

    match &app.outcome {
        Some(outcome) if !outcome.errors.is_empty() => {
            let lines: Vec<Line> = outcome
                .errors
                .iter()
                .skip(app.error_scroll)
                .take(MAX_VISIBLE_ERRORS)
                .map(|e| Line::styled(format!("• {}", e.message), Style::default().fg(ERROR)))
                .collect();
            let title = format!(
                " Validation Errors ({}) {}",
                outcome.errors.len(),
                if outcome.errors.len() > MAX_VISIBLE_ERRORS {
                    "j/k scroll "
                } else {
                    ""
                }
            );
            let paragraph = Paragraph::new(lines)
                .block(block.title(title).border_style(Style::default().fg(ERROR)));
            frame.render_widget(paragraph, area);
        }
        Some(outcome) => {
            let count = outcome.rows.len();
            let message = format!(
                "✓ Successfully parsed {} row{} from the CSV file.",
                count,
                if count == 1 { "" } else { "s" }
            );
            let paragraph = Paragraph::new(Line::styled(message, Style::default().fg(SUCCESS)))
                .block(block.title(" File Parsed Successfully "));
            frame.render_widget(paragraph, area);
        }
        None => {
            let lines = vec![
                Line::raw("No file loaded. Press o to open a CSV file."),
                Line::from(vec![
                    Span::styled("  date", Style::default().fg(LABEL_COLOR)),
                    Span::styled("       DD/MM/YYYY (e.g. 31/12/2024)", Style::default().fg(DIM)),
                ]),
                Line::from(vec![
                    Span::styled("  person", Style::default().fg(LABEL_COLOR)),
                    Span::styled("     runner's name", Style::default().fg(DIM)),
                ]),
                Line::from(vec![
                    Span::styled("  miles run", Style::default().fg(LABEL_COLOR)),
                    Span::styled("  positive number (decimals allowed)", Style::default().fg(DIM)),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines).block(block.title(" CSV File ")), area);
        }
    }
}

fn render_selector(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Runner ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let line = if app.persons.is_empty() {
        Line::styled("No runners", Style::default().fg(DIM))
    } else {
        Line::from(vec![
            Span::styled("◀ ", Style::default().fg(Color::Yellow)),
            Span::styled(app.filter_label(), Style::default().fg(ACCENT).bold()),
            Span::styled(" ▶", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("  {}/{}", app.filter_index, app.persons.len()),
                Style::default().fg(DIM),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_overall_card(frame: &mut Frame, dashboard: Option<&Dashboard>, area: Rect) {
    let block = Block::default()
        .title(" Overall Metrics ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(dashboard) = dashboard else {
        frame.render_widget(
            Paragraph::new("No data available").style(Style::default().fg(DIM)),
            inner,
        );
        return;
    };

    let overall = &dashboard.overall;
    let metric = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<9}", label), Style::default().fg(LABEL_COLOR)),
            Span::styled(value, Style::default().fg(ACCENT).bold()),
        ])
    };
    let lines = vec![
        Line::styled(dashboard.overall_description(), Style::default().fg(DIM)),
        metric("Total", format_miles(overall.total)),
        metric("Average", format_miles(overall.average)),
        metric("Min", format_miles(overall.min)),
        metric("Max", format_miles(overall.max)),
        metric("Entries", overall.total_entries.to_string()),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_person_table(frame: &mut Frame, dashboard: Option<&Dashboard>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Per-Person Metrics ");

    let Some(dashboard) = dashboard else {
        frame.render_widget(
            Paragraph::new("No data available")
                .style(Style::default().fg(DIM))
                .block(block),
            area,
        );
        return;
    };

    let header_cells = ["Runner", "Average", "Min", "Max", "Total", "Entries"]
        .into_iter()
        .map(|h| Cell::from(h).style(Style::default().fg(Color::Yellow).bold()));
    let header = Row::new(header_cells).height(1);

    let rows = dashboard.per_person.iter().map(|(person, m)| {
        Row::new([
            Cell::from(display_person(person).to_string()),
            Cell::from(format_miles(m.average)),
            Cell::from(format_miles(m.min)),
            Cell::from(format_miles(m.max)),
            Cell::from(format_miles(m.total)).style(Style::default().fg(ACCENT)),
            Cell::from(entries_label(m.entries)).style(Style::default().fg(DIM)),
        ])
    });

    let widths = [
        Constraint::Fill(1),    // Runner
        Constraint::Length(10), // Average
        Constraint::Length(10), // Min
        Constraint::Length(10), // Max
        Constraint::Length(11), // Total
        Constraint::Length(11), // Entries
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Render the miles-over-time line chart.
///
/// Dates are plotted by position, so gaps between run days are not scaled.
fn render_chart(frame: &mut Frame, dashboard: Option<&Dashboard>, area: Rect) {
    let (title, description) = match dashboard {
        Some(d) => (d.chart_title(), d.chart_description()),
        None => (
            "Miles Run Over Time".to_string(),
            "No data available to display".to_string(),
        ),
    };
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_bottom(Line::styled(format!(" {} ", description), Style::default().fg(DIM)))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let series = match dashboard {
        Some(d) if !d.is_empty() => &d.series,
        _ => {
            frame.render_widget(block, area);
            return;
        }
    };

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.miles))
        .collect();

    let last = series.len() - 1;
    let x_labels: Vec<Span> = [0, last / 2, last]
        .into_iter()
        .fold(Vec::new(), |mut picked: Vec<usize>, i| {
            if picked.last() != Some(&i) {
                picked.push(i);
            }
            picked
        })
        .into_iter()
        .map(|i| Span::raw(display_date(&series[i].date)))
        .collect();

    let y_max = dashboard.map(Dashboard::max_series_miles).unwrap_or(0.0);
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };
    let y_labels = vec![
        Span::raw("0"),
        Span::raw(format!("{:.1}", y_max / 2.0)),
        Span::raw(format!("{:.1}", y_max)),
    ];

    let graph_type = if points.len() == 1 {
        GraphType::Scatter
    } else {
        GraphType::Line
    };
    let dataset = Dataset::default()
        .name("miles")
        .marker(symbols::Marker::Braille)
        .graph_type(graph_type)
        .style(Style::default().fg(CHART_LINE))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title("Date")
                .style(Style::default().fg(DIM))
                .bounds([0.0, last.max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Miles")
                .style(Style::default().fg(DIM))
                .bounds([0.0, y_max])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let mut footer_spans = vec![
        Span::styled(" o", Style::default().fg(Color::Yellow)),
        Span::raw(" open  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" reload  "),
        Span::styled("c", Style::default().fg(Color::Yellow)),
        Span::raw(" clear  "),
        Span::styled("←/→", Style::default().fg(Color::Yellow)),
        Span::raw(" runner  "),
        Span::styled("j/k", Style::default().fg(Color::Yellow)),
        Span::raw(" errors  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" quit  "),
    ];

    if let Some(outcome) = &app.outcome {
        footer_spans.push(Span::raw("│ "));
        footer_spans.push(Span::styled(
            format!(
                "{} rows, {} errors",
                outcome.rows.len(),
                outcome.errors.len()
            ),
            Style::default().fg(DIM),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(footer_spans)), area);
}
