use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, Paragraph, Row, Table},
    Frame,
};
use rms_planner_core::ScenarioRepository;

use crate::table::truncate;
use crate::tui::app::{App, InputMode};

struct Theme {
    primary: Color,
    muted: Color,
    ok: Color,
    warn: Color,
    over: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    ok: Color::Green,
    warn: Color::Yellow,
    over: Color::Red,
};

pub fn draw<R: ScenarioRepository>(f: &mut Frame, app: &mut App<R>) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Content
            Constraint::Length(3), // Input / status
        ])
        .split(f.area());

    draw_header(f, app, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    draw_scenario_list(f, app, content_chunks[0]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Impact
            Constraint::Length(3), // Gauge
            Constraint::Min(5),    // Profile chart
        ])
        .split(content_chunks[1]);

    draw_impact(f, app, side_chunks[0]);
    draw_gauge(f, app, side_chunks[1]);
    draw_profile(f, app, side_chunks[2]);
    draw_footer(f, app, main_chunks[2]);
}

fn rounded(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
}

fn draw_header<R: ScenarioRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let pool = &app.pool;
    let line = Line::from(vec![
        Span::styled("RMS PLANNER", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled(pool.item.as_deref().unwrap_or("Pool"), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(
                "  total {}  available {}  committed {}",
                pool.total_capacity,
                pool.available_capacity,
                pool.committed_capacity()
            ),
            Style::default().fg(THEME.muted),
        ),
    ]);
    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, area);
}

fn draw_scenario_list<R: ScenarioRepository>(f: &mut Frame, app: &mut App<R>, area: Rect) {
    let rows: Vec<Row> = app
        .report
        .scenarios
        .iter()
        .map(|s| {
            let marker = if s.active_at_peak { "●" } else { " " };
            let qty_style = if s.quantity <= 0 || s.days == 0 {
                Style::default().fg(THEME.muted)
            } else {
                Style::default()
            };
            Row::new(vec![
                Span::styled(marker, Style::default().fg(THEME.warn)),
                Span::styled(s.quantity.to_string(), qty_style),
                Span::raw(s.start.format("%m-%d").to_string()),
                Span::raw(s.end.format("%m-%d").to_string()),
                Span::styled(
                    truncate(s.label.as_deref().unwrap_or(""), 24),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),  // Peak marker
            Constraint::Length(6),  // Quantity
            Constraint::Length(6),  // Start
            Constraint::Length(6),  // End
            Constraint::Min(10),    // Label
        ],
    )
    .header(Row::new(vec!["", "Qty", "Start", "End", "Label"]).style(Style::default().fg(THEME.warn)))
    .block(rounded(" Scenarios "))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_impact<R: ScenarioRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let report = &app.report;
    let remaining_color = if report.oversubscribed { THEME.over } else { THEME.ok };
    let peak_date = report
        .peak_date
        .map(|d| d.format("%Y-%m-%d (%a)").to_string())
        .unwrap_or_else(|| "-".to_string());

    let text = vec![
        Line::from(vec![
            Span::styled("Peak demand: ", Style::default().fg(THEME.muted)),
            Span::styled(report.peak_demand.to_string(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Peak date:   ", Style::default().fg(THEME.muted)),
            Span::raw(peak_date),
        ]),
        Line::from(vec![
            Span::styled("Remaining:   ", Style::default().fg(THEME.muted)),
            Span::styled(
                report.remaining_capacity.to_string(),
                Style::default().fg(remaining_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Utilization: ", Style::default().fg(THEME.muted)),
            Span::raw(format!("+{:.1}%", report.utilization_display)),
        ]),
        Line::from(vec![
            Span::styled("Scenarios:   ", Style::default().fg(THEME.muted)),
            Span::raw(report.scenarios.len().to_string()),
        ]),
    ];

    f.render_widget(Paragraph::new(text).block(rounded(" Impact ")), area);
}

fn draw_gauge<R: ScenarioRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let report = &app.report;
    let ratio = (report.utilization_delta / 100.0).clamp(0.0, 1.0);
    let color = if report.oversubscribed {
        THEME.over
    } else if ratio > 0.8 {
        THEME.warn
    } else {
        THEME.ok
    };

    let gauge = Gauge::default()
        .block(rounded(" Utilization "))
        .gauge_style(Style::default().fg(color))
        .ratio(ratio)
        .label(format!("{:.1}% of total", report.utilization_display));
    f.render_widget(gauge, area);
}

fn draw_profile<R: ScenarioRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let bars: Vec<Bar> = app
        .report
        .profile
        .iter()
        .map(|p| {
            let color = if app.pool.remaining_after(p.demand) < 0 { THEME.over } else { THEME.primary };
            Bar::default()
                .label(p.date.format("%m-%d").to_string())
                .value(p.demand.max(0) as u64)
                .style(Style::default().fg(color))
                .text_value(p.demand.to_string())
        })
        .collect();

    let chart = BarChart::default()
        .block(rounded(" Demand by critical date "))
        .bar_width(5)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(chart, area);
}

fn draw_footer<R: ScenarioRepository>(f: &mut Frame, app: &App<R>, area: Rect) {
    let title = match app.input_mode {
        InputMode::Normal => {
            let text = app
                .message
                .clone()
                .unwrap_or_else(|| "a: Add | p: Pool | d: Delete | j/k: Navigate | q: Quit".to_string());
            let footer = Paragraph::new(text)
                .style(Style::default().fg(THEME.muted))
                .alignment(Alignment::Center)
                .block(rounded(""));
            f.render_widget(footer, area);
            return;
        }
        InputMode::Adding => " Add: qty start end [label] ",
        InputMode::EditingPool => " Pool: total available [i:item] ",
    };

    let input = Paragraph::new(app.input.as_str()).block(rounded(title));
    f.render_widget(input, area);

    let prefix: String = app.input.chars().take(app.cursor_position).collect();
    let offset = unicode_width::UnicodeWidthStr::width(prefix.as_str()) as u16;
    f.set_cursor_position((area.x + 1 + offset, area.y + 1));
}
