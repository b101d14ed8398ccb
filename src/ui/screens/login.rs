use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::{App, LoginField};
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(11),
            Constraint::Min(0),
        ])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(44),
            Constraint::Min(0),
        ])
        .split(rows[1]);
    let form = cols[1];

    let masked = "*".repeat(app.login_password.chars().count());
    let mut lines = vec![
        Line::from(""),
        field_line("Username", &app.login_username, app.login_field == LoginField::Username),
        Line::from(""),
        field_line("Password", &masked, app.login_field == LoginField::Password),
        Line::from(""),
    ];
    if app.login_failed {
        lines.push(Line::from(Span::styled(
            "  Invalid username or password",
            Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Tab switch field | Enter log in | Esc quit",
        theme::dim_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(
            " PocketBudget Login ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(lines).block(block), form);

    // Cursor sits at the end of the active field.
    let (row, len) = match app.login_field {
        LoginField::Username => (2, app.login_username.chars().count()),
        LoginField::Password => (4, masked.chars().count()),
    };
    f.set_cursor_position((form.x + 14 + len as u16, form.y + row));
}

fn field_line<'a>(label: &'a str, value: &'a str, active: bool) -> Line<'a> {
    let label_style = if active {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        theme::dim_style()
    };
    Line::from(vec![
        Span::styled(format!("  {label:<9}: "), label_style),
        Span::styled(value, theme::normal_style()),
    ])
}
