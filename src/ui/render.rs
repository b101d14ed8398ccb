use std::collections::BTreeMap;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::screens;
use super::theme;

/// Key bindings shown in the help overlay, grouped by heading.
const KEY_HELP: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/k, Up/Down", "Move cursor"),
            ("1-3", "Switch tabs"),
            ("Tab/Shift-Tab", "Cycle tabs"),
            ("g/G", "Top/Bottom"),
            ("Ctrl-d/u", "Page down/up"),
            ("H/L", "Prev/Next month"),
            ("Ctrl-q", "Quit"),
        ],
    ),
    (
        "Actions",
        &[
            (":", "Command mode"),
            ("D", "Delete expense (Expenses)"),
            ("t", "Edit total budget"),
            ("B", "Edit category budgets"),
            ("Enter", "Save edit"),
            ("Esc", "Cancel"),
        ],
    ),
];

const HELP_WIDTH: u16 = 84;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [tabs, body, status, command] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_tab_bar(f, tabs, app);
    match app.screen {
        Screen::Login => screens::login::render(f, body, app),
        Screen::Dashboard => screens::dashboard::render(f, body, app),
        Screen::Expenses => screens::expenses::render(f, body, app),
        Screen::Budgets => screens::budgets::render(f, body, app),
    }
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let background = Style::default().bg(theme::HEADER_BG);

    let Some(selected) = Screen::all().iter().position(|s| *s == app.screen) else {
        // Login has no tabs yet.
        let title = Line::styled(" PocketBudget", theme::accent_bold());
        f.render_widget(Paragraph::new(title).style(background), area);
        return;
    };

    let titles = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, screen)| format!("{}:{screen}", i + 1));

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(background.fg(theme::TEXT_DIM))
        .highlight_style(theme::accent_bold())
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)));
    f.render_widget(tabs, area);
}

fn key_hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Login => " Enter log in | Esc quit ",
        Screen::Dashboard => " H/L month | :total | ? help ",
        Screen::Expenses => " :add | D delete | ? help ",
        Screen::Budgets => " :edit-budgets | ? help ",
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let badge = format!(" {} ", app.input_mode);
    let context = match app.screen {
        Screen::Login => " Login".to_string(),
        screen => format!(
            " {screen} | {} | {} expenses",
            app.period.label(),
            app.expense_count
        ),
    };
    let hints = key_hints(app.screen);

    let filler = (area.width as usize).saturating_sub(badge.len() + context.len() + hints.len());
    let line = Line::from(vec![
        Span::styled(badge, theme::mode_style(app.input_mode)),
        Span::raw(context),
        Span::raw(" ".repeat(filler)),
        Span::raw(hints),
    ]);
    f.render_widget(Paragraph::new(line).style(theme::status_bar_style()), area);
}

fn typed_line<'a>(prompt: &'static str, color: Color, input: &'a str) -> (Line<'a>, Option<usize>) {
    let cursor = prompt.chars().count() + input.chars().count();
    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(color)),
        Span::styled(input, theme::command_bar_style()),
    ]);
    (line, Some(cursor))
}

/// The bottom line for the current mode, and where the cursor sits on it.
fn command_line(app: &App) -> (Line<'_>, Option<usize>) {
    let input = app.command_input.as_str();
    match app.input_mode {
        InputMode::Command => typed_line(":", theme::ACCENT, input),
        InputMode::Editing => typed_line(
            app.edit_target.map_or("edit> ", |t| t.prompt()),
            theme::GREEN,
            input,
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(app.confirm_message.as_str(), Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal if app.status_message.is_empty() => (
            Line::styled(" Press : for commands, ? for help", theme::dim_style()),
            None,
        ),
        InputMode::Normal => (
            Line::styled(app.status_message.as_str(), theme::command_bar_style()),
            None,
        ),
    }
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (line, cursor) = command_line(app);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::COMMAND_BG)),
        area,
    );
    if let Some(col) = cursor {
        f.set_cursor_position((area.x + col as u16, area.y));
    }
}

/// One entry per distinct command, under its longest name. Short aliases are left out.
fn command_help() -> BTreeMap<&'static str, &'static str> {
    let mut by_description: BTreeMap<&str, &str> = BTreeMap::new();
    for (&name, cmd) in commands::COMMANDS.iter().filter(|(name, _)| name.len() > 2) {
        let slot = by_description.entry(cmd.description).or_insert(name);
        if name.len() > slot.len() {
            *slot = name;
        }
    }
    by_description
        .into_iter()
        .map(|(description, name)| (name, description))
        .collect()
}

fn help_lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(" PocketBudget Help ", theme::accent_bold()),
        Line::default(),
    ];

    for (heading, keys) in KEY_HELP {
        lines.push(Line::styled(format!(" {heading}"), theme::heading_style()));
        for pair in keys.chunks(2) {
            let text: String = pair
                .iter()
                .map(|(key, action)| format!("  {key:<15} {action:<24}"))
                .collect();
            lines.push(Line::styled(text, theme::normal_style()));
        }
        lines.push(Line::default());
    }

    lines.push(Line::styled(" Commands", theme::heading_style()));
    for (name, description) in command_help() {
        lines.push(Line::styled(
            format!("  :{name:<14} {description}"),
            theme::normal_style(),
        ));
    }

    lines.push(Line::default());
    lines.push(Line::styled(" Press any key to close ", theme::dim_style()));
    lines
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + area.width.saturating_sub(width) / 2,
        area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    )
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let lines = help_lines();
    let popup = centered(area, HELP_WIDTH, lines.len() as u16 + 2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block), popup);
}
