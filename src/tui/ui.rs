use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, Gauge, GraphType,
    Paragraph, Wrap,
};
use ratatui::Frame;

use super::app::{App, View};
use crate::format::format_file_size;
use crate::models::{AnalysisResult, RiskTier};

const ACCENT: Color = Color::Cyan;
const DIM: Color = Color::DarkGray;
const PENDING_COLOR: Color = Color::Yellow;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(44)])
        .split(chunks[1]);

    render_file_list(frame, app, body[0]);
    render_results(frame, app, body[1]);
    render_footer(frame, app, chunks[2]);

    // Overlays
    if app.view == View::About {
        render_about_overlay(frame);
    }
    if let Some(msg) = app.notice.clone() {
        render_notice_overlay(frame, &msg);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let file_spans = match app.session.file() {
        Some(file) => vec![
            Span::styled("File: ", Style::default().fg(DIM)),
            Span::styled(
                format!("{} ({})", file.name, format_file_size(file.byte_size)),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ],
        None => vec![
            Span::styled("File: ", Style::default().fg(DIM)),
            Span::styled("none selected", Style::default().fg(DIM)),
        ],
    };

    let mut spans = file_spans;
    spans.push(Span::raw("  "));
    spans.push(Span::styled("Path: ", Style::default().fg(DIM)));
    spans.push(Span::styled(
        app.path.display().to_string(),
        Style::default().fg(DIM),
    ));

    let block = Block::default()
        .title(Span::styled(
            " Mood Meter ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}

fn render_file_list(frame: &mut Frame, app: &mut App, area: Rect) {
    // 2 for borders
    let inner_height = area.height.saturating_sub(2) as usize;
    app.visible_rows = inner_height;

    // Build a scroll indicator for the block title
    let total = app.names.len();
    let scroll_info = if total > inner_height {
        let has_above = app.scroll_offset > 0;
        let has_below = app.scroll_offset + inner_height < total;
        match (has_above, has_below) {
            (true, true) => format!(
                " [{}-{}/{}] \u{2191}\u{2193} ",
                app.scroll_offset + 1,
                (app.scroll_offset + inner_height).min(total),
                total
            ),
            (true, false) => format!(" [{}-{}/{}] \u{2191} ", app.scroll_offset + 1, total, total),
            (false, true) => format!(" [1-{}/{}] \u{2193} ", inner_height.min(total), total),
            (false, false) => String::new(),
        }
    } else {
        String::new()
    };

    let chosen = app.session.file().map(|f| f.name.clone());

    // Only render the visible slice of files
    let end = (app.scroll_offset + inner_height).min(total);
    let lines: Vec<Line> = app.names[app.scroll_offset..end]
        .iter()
        .enumerate()
        .map(|(vi, name)| {
            let actual_index = app.scroll_offset + vi;
            let marker = if chosen.as_deref() == Some(name.as_str()) {
                "\u{25b6} "
            } else {
                "  "
            };
            let mut style = Style::default();
            if actual_index == app.selected {
                style = style.bg(Color::DarkGray);
            }
            Line::from(Span::styled(format!("{}{}", marker, name), style))
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Files ", Style::default().fg(ACCENT)))
        .title(Span::styled(scroll_info, Style::default().fg(DIM)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    if app.session.is_pending() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Analyzing emotional tone ...",
                Style::default()
                    .fg(PENDING_COLOR)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let block = Block::default()
            .title(Span::styled(" Results ", Style::default().fg(ACCENT)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT));
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(block),
            area,
        );
        return;
    }

    match app.session.result() {
        Some(result) => render_result_panels(frame, result, area),
        None => {
            let hint = if app.session.file().is_some() {
                "Press [a] to analyze the chosen file."
            } else {
                "Pick an audio file: [j/k] to move, [Enter] to choose."
            };
            let text = vec![Line::from(""), Line::from(Span::styled(hint, Style::default().fg(DIM)))];
            let block = Block::default()
                .title(Span::styled(" Results ", Style::default().fg(ACCENT)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT));
            frame.render_widget(
                Paragraph::new(text).alignment(Alignment::Center).block(block),
                area,
            );
        }
    }
}

fn render_result_panels(frame: &mut Frame, result: &AnalysisResult, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(10), // Emotion chart / risk meter
            Constraint::Min(7),     // Intensity chart
            Constraint::Length(7),  // Report
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(36), Constraint::Length(38)])
        .split(rows[0]);

    render_emotion_chart(frame, result, top[0]);
    render_risk_meter(frame, result, top[1]);
    render_intensity_chart(frame, result, rows[1]);
    render_report(frame, result, rows[2]);
}

fn render_emotion_chart(frame: &mut Frame, result: &AnalysisResult, area: Rect) {
    let bars: Vec<Bar> = result
        .emotions
        .entries()
        .iter()
        .map(|(label, value)| {
            let color = emotion_color(label);
            Bar::default()
                .label(Line::from(display_label(label)))
                .value(u64::from(*value))
                .text_value(format!("{}%", value))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title(Span::styled(" Emotions ", Style::default().fg(ACCENT)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(7)
        .bar_gap(1)
        .max(100);

    frame.render_widget(chart, area);
}

fn render_risk_meter(frame: &mut Frame, result: &AnalysisResult, area: Rect) {
    let tier = RiskTier::from_risk(result.conflict_risk);
    let color = tier_color(tier);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Conflict risk ", Style::default().fg(ACCENT)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(f64::from(result.conflict_risk) / 100.0)
        .label(format!("{}% {}", result.conflict_risk, tier.label()));
    frame.render_widget(gauge, parts[0]);

    let summary = Paragraph::new(Span::styled(tier.summary(), Style::default().fg(color)))
        .wrap(Wrap { trim: true });
    frame.render_widget(summary, parts[1]);
}

fn render_intensity_chart(frame: &mut Frame, result: &AnalysisResult, area: Rect) {
    let points: Vec<(f64, f64)> = result
        .intensity
        .iter()
        .enumerate()
        .map(|(i, value)| ((i + 1) as f64, *value))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(ACCENT))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(Span::styled(" Intensity ", Style::default().fg(ACCENT)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(DIM))
                .bounds([1.0, 20.0])
                .labels(["1", "10", "20"]),
        )
        .y_axis(
            // Clamped to the full percentage scale regardless of the data
            Axis::default()
                .style(Style::default().fg(DIM))
                .bounds([0.0, 100.0])
                .labels(["0", "50", "100"]),
        );

    frame.render_widget(chart, area);
}

fn render_report(frame: &mut Frame, result: &AnalysisResult, area: Rect) {
    let tier = RiskTier::from_risk(result.conflict_risk);

    let percent_spans: Vec<Span> = result
        .emotions
        .entries()
        .iter()
        .flat_map(|(label, value)| {
            vec![
                Span::styled(
                    format!("{} {}%", display_label(label), value),
                    Style::default().fg(emotion_color(label)),
                ),
                Span::raw("   "),
            ]
        })
        .collect();

    let text = vec![
        Line::from(vec![
            Span::styled("Analyzed: ", Style::default().fg(DIM)),
            Span::raw(result.timestamp.clone()),
        ]),
        Line::from(vec![
            Span::styled("Dominant emotion: ", Style::default().fg(DIM)),
            Span::styled(
                result.emotions.dominant(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(percent_spans),
        Line::from(Span::styled(tier.advice(), Style::default().fg(tier_color(tier)))),
    ];

    let block = Block::default()
        .title(Span::styled(" Report ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    frame.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let keys = if app.notice.is_some() {
        "[Esc] dismiss"
    } else {
        match app.view {
            View::Main => "[j/k] move  [Enter] choose  [a]nalyze  [r]eset  [?] about  [q]uit",
            View::About => "[Esc] close",
        }
    };
    let footer = Paragraph::new(keys)
        .style(Style::default().fg(DIM))
        .alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

fn render_about_overlay(frame: &mut Frame) {
    let area = centered_rect(52, 10, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(Span::styled(
            "Mood Meter",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Version {}", env!("CARGO_PKG_VERSION"))),
        Line::from(""),
        Line::from("Emotion analysis meter for audio files."),
        Line::from("Scores derive from file metadata; the audio is never decoded."),
        Line::from(""),
        Line::from(Span::styled("[Esc] close", Style::default().fg(DIM))),
    ];

    let block = Block::default()
        .title(" About ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_notice_overlay(frame: &mut Frame, message: &str) {
    let area = centered_rect(56, 7, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(""),
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(Span::styled("[Esc] dismiss", Style::default().fg(DIM))),
    ];

    let block = Block::default()
        .title(" Cannot use file ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

fn display_label(label: &str) -> &'static str {
    match label {
        "calm" => "Calm",
        "tense" => "Tense",
        "angry" => "Angry",
        _ => "Excited",
    }
}

/// Per-emotion chart colors, mirroring the risk palette.
fn emotion_color(label: &str) -> Color {
    match label {
        "calm" => Color::Green,
        "tense" => Color::Yellow,
        "angry" => Color::Red,
        _ => Color::Magenta,
    }
}

/// Tier colors: Low=green, Medium=yellow, High=red.
fn tier_color(tier: RiskTier) -> Color {
    match tier {
        RiskTier::Low => Color::Green,
        RiskTier::Medium => Color::Yellow,
        RiskTier::High => Color::Red,
    }
}
