use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::aggregate::NO_EXPENSES_LABEL;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Summary cards
            Constraint::Min(8),    // Spending chart
            Constraint::Length(app.dashboard.tracker.len().min(8) as u16 + 2), // Tracker
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_spending_chart(f, chunks[1], app);
    render_tracker_digest(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let d = &app.dashboard;
    let count = d.expenses.len();

    render_card(
        f,
        cards[0],
        "Total Budget",
        d.total_budget,
        theme::ACCENT,
        format!(
            "{} over {} categories",
            format_amount(app.budgets.total()),
            app.budgets.len()
        ),
    );
    render_card(
        f,
        cards[1],
        "Total Spend",
        d.total_spend,
        theme::PEACH,
        format!("{count} expenses"),
    );
    render_card(
        f,
        cards[2],
        "Balance",
        d.balance,
        theme::balance_color(d.is_overspent()),
        if d.is_overspent() {
            "Over budget".to_string()
        } else {
            "Left to spend".to_string()
        },
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: Color, subtitle: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Spending by Category, {} ", app.period.label()),
            theme::title_style(),
        ));

    let data = app.dashboard.chart_data();
    if data.len() == 1 && data[0].0 == NO_EXPENSES_LABEL {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(NO_EXPENSES_LABEL, theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Record one with :add <YYYY-MM-DD> <amount> <category>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = data
        .iter()
        .enumerate()
        .map(|(i, (name, amt))| {
            let color = theme::CHART_COLORS[i % theme::CHART_COLORS.len()];
            let cents = amt
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|c| c.to_u64())
                .unwrap_or(u64::MAX);
            Bar::default()
                .value(cents)
                .text_value(format!("{amt:.2}"))
                .label(Line::from(truncate(name, 12)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(12)
        .bar_gap(1)
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}

fn render_tracker_digest(f: &mut Frame, area: Rect, app: &App) {
    let tracker = &app.dashboard.tracker;
    let lines: Vec<Line> = if tracker.is_empty() {
        vec![Line::from(Span::styled(
            "No category budgets. Use :edit-budgets to add some",
            theme::dim_style(),
        ))]
    } else {
        tracker
            .iter()
            .take(8)
            .map(|row| {
                let color = theme::status_color(row.status);
                Line::from(vec![
                    Span::styled(
                        format!(" {:<20}", truncate(&row.category, 19)),
                        theme::normal_style(),
                    ),
                    Span::styled(
                        format!("{:>16} left  ", format_amount(row.remaining)),
                        Style::default().fg(color),
                    ),
                    Span::styled(
                        row.status.as_str(),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ])
            })
            .collect()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Budget Tracker ", theme::title_style()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
