//! Dashboard screen: sidebar, stat cards, trend charts and the
//! patients table.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, BorderType, Borders, Chart, Dataset,
        GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::viewmodel::{self, PieSlice, SeriesPoint, StatCard, PIE_TEAL};

use super::palette::{
    COLOR_DOCTORS, COLOR_ORANGE, COLOR_PATIENTS, COLOR_PRESCRIPTIONS, COLOR_TEAL,
};
use super::{patients_table, sidebar, Palette};

pub fn render(frame: &mut Frame, app: &mut App, palette: &Palette) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(0)])
        .split(frame.area());

    sidebar::render(frame, columns[0], app, palette);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // header
            Constraint::Length(5),  // stat cards
            Constraint::Length(10), // trend lines
            Constraint::Length(10), // bars + specialties
            Constraint::Min(7),     // patients table
            Constraint::Length(1),  // status line
        ])
        .split(columns[1]);

    render_header(frame, rows[0], app, palette);
    render_stat_cards(frame, rows[1], app, palette);
    render_trends(frame, rows[2], app, palette);
    render_breakdowns(frame, rows[3], app, palette);
    patients_table::render(frame, rows[4], app, palette);
    render_status_line(frame, rows[5], app, palette);
}

// ============================================================================
// Header and status line
// ============================================================================

fn render_header(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(24)])
        .split(area);

    let title = Paragraph::new(Span::styled(
        "Dashboard",
        Style::default()
            .fg(palette.text)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(title, parts[0]);

    let mode = Paragraph::new(Line::from(vec![
        Span::styled("theme ", Style::default().fg(palette.dim)),
        Span::styled(app.theme.mode().as_str(), Style::default().fg(palette.accent)),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(mode, parts[1]);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let line = match &app.status_line {
        Some(message) => Line::styled(message.clone(), Style::default().fg(palette.accent)),
        None => Line::from(vec![
            Span::styled("/", Style::default().fg(palette.accent)),
            Span::styled(" search  ", Style::default().fg(palette.dim)),
            Span::styled("s", Style::default().fg(palette.accent)),
            Span::styled(" sort  ", Style::default().fg(palette.dim)),
            Span::styled("e", Style::default().fg(palette.accent)),
            Span::styled(" export  ", Style::default().fg(palette.dim)),
            Span::styled("r", Style::default().fg(palette.accent)),
            Span::styled(" refresh  ", Style::default().fg(palette.dim)),
            Span::styled("t", Style::default().fg(palette.accent)),
            Span::styled(" theme  ", Style::default().fg(palette.dim)),
            Span::styled("l", Style::default().fg(palette.accent)),
            Span::styled(" logout  ", Style::default().fg(palette.dim)),
            Span::styled("q", Style::default().fg(palette.accent)),
            Span::styled(" quit", Style::default().fg(palette.dim)),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ============================================================================
// Stat cards
// ============================================================================

fn render_stat_cards(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let cards = viewmodel::stat_cards(app.stats.as_ref());
    if cards.is_empty() {
        render_placeholder(
            frame,
            area,
            "Statistics",
            app.stats_loading,
            app.stats_error.as_deref(),
            palette,
        );
        return;
    }

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20); 5])
        .split(area);

    for (card, slot) in cards.iter().zip(slots.iter()) {
        render_stat_card(frame, *slot, card, palette);
    }
}

fn render_stat_card(frame: &mut Frame, area: Rect, card: &StatCard, palette: &Palette) {
    let change_pct = card.change * 100.0;
    let change_color = if change_pct < 0.0 {
        palette.error
    } else {
        COLOR_PRESCRIPTIONS
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::styled(card.title, Style::default().fg(palette.dim)),
        Line::styled(
            card.value.to_string(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::styled(format!("{change_pct:+.1}%"), Style::default().fg(change_color)),
            Span::styled(" this week", Style::default().fg(palette.dim)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

// ============================================================================
// Charts
// ============================================================================

fn render_trends(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_line_chart(
        frame,
        halves[0],
        "Consultations Over Time",
        &viewmodel::consultation_series(app.stats.as_ref()),
        COLOR_PATIENTS,
        app,
        palette,
    );
    render_line_chart(
        frame,
        halves[1],
        "Prescription Volume Trend",
        &viewmodel::prescription_series(app.stats.as_ref()),
        COLOR_PRESCRIPTIONS,
        app,
        palette,
    );
}

fn render_line_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[SeriesPoint],
    color: ratatui::style::Color,
    app: &App,
    palette: &Palette,
) {
    if series.is_empty() {
        render_placeholder(
            frame,
            area,
            title,
            app.stats_loading,
            app.stats_error.as_deref(),
            palette,
        );
        return;
    }

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.value as f64))
        .collect();
    let max_y = series.iter().map(|p| p.value).max().unwrap_or(0).max(1) as f64;
    let max_x = (series.len().saturating_sub(1)).max(1) as f64;

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let x_labels: Vec<Span> = vec![
        Span::styled(series[0].period.clone(), Style::default().fg(palette.dim)),
        Span::styled(
            series[series.len() - 1].period.clone(),
            Style::default().fg(palette.dim),
        ),
    ];
    let y_labels: Vec<Span> = vec![
        Span::styled("0", Style::default().fg(palette.dim)),
        Span::styled(format!("{max_y:.0}"), Style::default().fg(palette.dim)),
    ];

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.border)),
        )
        .x_axis(
            Axis::default()
                .bounds([0.0, max_x])
                .labels(x_labels)
                .style(Style::default().fg(palette.dim)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, max_y])
                .labels(y_labels)
                .style(Style::default().fg(palette.dim)),
        );
    frame.render_widget(chart, area);
}

fn render_breakdowns(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_doctors_vs_patients(frame, halves[0], app, palette);
    render_top_specialties(frame, halves[1], app, palette);
}

fn render_doctors_vs_patients(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let rows = viewmodel::doctors_vs_patients(app.stats.as_ref());
    if rows.is_empty() {
        render_placeholder(
            frame,
            area,
            "Active Doctors vs Patients",
            app.stats_loading,
            app.stats_error.as_deref(),
            palette,
        );
        return;
    }

    let title = Line::from(vec![
        Span::raw(" Active "),
        Span::styled("Doctors", Style::default().fg(COLOR_DOCTORS)),
        Span::raw(" vs "),
        Span::styled("Patients", Style::default().fg(COLOR_PATIENTS)),
        Span::raw(" "),
    ]);

    let mut chart = BarChart::default()
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.border)),
        )
        .bar_width(3)
        .bar_gap(1)
        .group_gap(2);

    for row in &rows {
        let bars = [
            Bar::default()
                .value(row.doctors)
                .style(Style::default().fg(COLOR_DOCTORS)),
            Bar::default()
                .value(row.patients)
                .style(Style::default().fg(COLOR_PATIENTS)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::styled(
                    row.period.clone(),
                    Style::default().fg(palette.dim),
                ))
                .bars(&bars),
        );
    }
    frame.render_widget(chart, area);
}

fn render_top_specialties(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let slices = viewmodel::top_specialties(app.stats.as_ref());
    if slices.is_empty() {
        render_placeholder(
            frame,
            area,
            "Top Specialties in Demand",
            app.stats_loading,
            app.stats_error.as_deref(),
            palette,
        );
        return;
    }

    let block = Block::default()
        .title(" Top Specialties in Demand ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total: u64 = slices.iter().map(|s| s.value).sum();
    let lines: Vec<Line> = slices
        .iter()
        .map(|slice| legend_line(slice, total, palette))
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn legend_line<'a>(slice: &'a PieSlice, total: u64, palette: &Palette) -> Line<'a> {
    let bullet_color = if slice.color == PIE_TEAL {
        COLOR_TEAL
    } else {
        COLOR_ORANGE
    };
    let share = if total > 0 {
        format!("{:.0}%", slice.value as f64 / total as f64 * 100.0)
    } else {
        String::new()
    };
    Line::from(vec![
        Span::styled("● ", Style::default().fg(bullet_color)),
        Span::styled(slice.label.as_str(), Style::default().fg(palette.text)),
        Span::styled(
            format!("  {} ({share})", slice.value),
            Style::default().fg(palette.dim),
        ),
    ])
}

// ============================================================================
// Shared placeholders
// ============================================================================

/// Bordered panel shown while data is loading or after a fetch error.
fn render_placeholder(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    loading: bool,
    error: Option<&str>,
    palette: &Palette,
) {
    let (text, color) = match (loading, error) {
        (true, _) => ("Loading...".to_string(), palette.dim),
        (false, Some(e)) => (e.to_string(), palette.error),
        (false, None) => ("No data".to_string(), palette.dim),
    };
    let panel = Paragraph::new(text)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.border)),
        );
    frame.render_widget(panel, area);
}
