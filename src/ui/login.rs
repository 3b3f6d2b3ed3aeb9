//! Login screen: centered credential card with inline validation.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, LoginField};

use super::Palette;

pub fn render(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = frame.area();
    let card = centered_card(area, 54, 16);

    let block = Block::default()
        .title(" iPrescribe Admin ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // heading
            Constraint::Length(1),
            Constraint::Length(3), // email
            Constraint::Length(1), // email error
            Constraint::Length(3), // password
            Constraint::Length(1), // password error
            Constraint::Length(1), // status
            Constraint::Length(1), // hints
        ])
        .split(inner);

    let heading = Paragraph::new("Welcome back! Please sign in to your account.")
        .style(Style::default().fg(palette.dim))
        .alignment(Alignment::Center);
    frame.render_widget(heading, rows[0]);

    render_field(
        frame,
        rows[2],
        palette,
        "Email Address",
        &app.login_form.email,
        app.login_form.field == LoginField::Email,
    );
    render_error(frame, rows[3], palette, app.login_form.email_error.as_deref());

    let password_display = if app.login_form.show_password {
        app.login_form.password.clone()
    } else {
        "*".repeat(app.login_form.password.chars().count())
    };
    render_field(
        frame,
        rows[4],
        palette,
        "Password",
        &password_display,
        app.login_form.field == LoginField::Password,
    );
    render_error(frame, rows[5], palette, app.login_form.password_error.as_deref());

    if app.login_form.submitting {
        let status = Paragraph::new("Signing in...")
            .style(Style::default().fg(palette.accent))
            .alignment(Alignment::Center);
        frame.render_widget(status, rows[6]);
    }

    let hints = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(palette.accent)),
        Span::styled(" switch  ", Style::default().fg(palette.dim)),
        Span::styled("Enter", Style::default().fg(palette.accent)),
        Span::styled(" sign in  ", Style::default().fg(palette.dim)),
        Span::styled("Ctrl+S", Style::default().fg(palette.accent)),
        Span::styled(" show password", Style::default().fg(palette.dim)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(hints, rows[7]);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    label: &str,
    value: &str,
    focused: bool,
) {
    let border = if focused { palette.accent } else { palette.border };
    let mut title = Style::default().fg(border);
    if focused {
        title = title.add_modifier(Modifier::BOLD);
    }
    let field = Paragraph::new(value)
        .style(Style::default().fg(palette.text))
        .block(
            Block::default()
                .title(Span::styled(format!(" {label} "), title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
    frame.render_widget(field, area);
}

fn render_error(frame: &mut Frame, area: Rect, palette: &Palette, error: Option<&str>) {
    if let Some(message) = error {
        let line = Paragraph::new(message).style(Style::default().fg(palette.error));
        frame.render_widget(line, area);
    }
}

/// Center a fixed-size card inside `area`, clamped to the available space.
fn centered_card(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
