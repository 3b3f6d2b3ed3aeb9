//! Searchable patients table.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::{App, Focus};
use crate::viewmodel::VerificationStatus;

use super::palette::{COLOR_PENDING, COLOR_VERIFIED};
use super::Palette;

pub fn render(frame: &mut Frame, area: Rect, app: &mut App, palette: &Palette) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    render_search(frame, parts[0], app, palette);
    render_table(frame, parts[1], app, palette);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let focused = app.focus == Focus::Search;
    let border = if focused { palette.accent } else { palette.border };
    let text = if app.search.is_empty() && !focused {
        Span::styled(
            "Search by name, email or location",
            Style::default().fg(palette.dim),
        )
    } else {
        Span::styled(app.search.as_str(), Style::default().fg(palette.text))
    };
    let input = Paragraph::new(text).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(input, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App, palette: &Palette) {
    let rows_data = app.filtered_rows();
    let title = format!(" Recent Patients ({}) ", rows_data.len());

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));

    if rows_data.is_empty() {
        let (text, color) = if app.patients_loading {
            ("Loading...", palette.dim)
        } else if let Some(e) = app.patients_error.as_deref() {
            (e, palette.error)
        } else if app.patients.is_some() {
            ("No patients match the current search", palette.dim)
        } else {
            ("No data", palette.dim)
        };
        let empty = Paragraph::new(text)
            .style(Style::default().fg(color))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(header_cells(app, palette)).bottom_margin(1);

    let rows: Vec<Row> = rows_data
        .iter()
        .map(|p| {
            let status_color = match p.status {
                VerificationStatus::Verified => COLOR_VERIFIED,
                VerificationStatus::Pending => COLOR_PENDING,
            };
            Row::new(vec![
                Cell::from(p.id.to_string()),
                Cell::from(p.sign_up_date.clone()),
                Cell::from(p.name.clone()),
                Cell::from(p.email.clone()),
                Cell::from(p.phone.clone()),
                Cell::from(p.last_seen.clone()),
                Cell::from(p.location.clone()),
                Cell::from(p.device.as_str()),
                Cell::from(Span::styled(
                    p.status.as_str(),
                    Style::default().fg(status_color),
                )),
            ])
            .style(Style::default().fg(palette.text))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Min(16),
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(20),
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(palette.highlight_bg));

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

/// Header cells, with a direction marker on the active sort column.
fn header_cells(app: &App, palette: &Palette) -> Vec<Cell<'static>> {
    let style = Style::default()
        .fg(palette.dim)
        .add_modifier(Modifier::BOLD);
    [
        "#",
        "Sign Up Date",
        "Patient Name",
        "Email Address",
        "Phone Number",
        "Last Seen",
        "Location",
        "Device",
        "Status",
    ]
    .iter()
    .map(|h| {
        let marker = match app.sort_column {
            Some(column) if column.label() == *h => {
                if app.sort_ascending {
                    " ▲"
                } else {
                    " ▼"
                }
            }
            _ => "",
        };
        Cell::from(Span::styled(format!("{h}{marker}"), style))
    })
    .collect()
}
