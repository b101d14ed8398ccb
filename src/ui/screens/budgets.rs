use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, spent_ratio, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let tracker = &app.dashboard.tracker;
    if tracker.is_empty() {
        render_empty(f, area);
        return;
    }

    let items: Vec<ListItem> = tracker
        .iter()
        .enumerate()
        .skip(app.budget_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, row)| {
            let ratio = spent_ratio(row.spent, row.budget);
            let color = theme::status_color(row.status);

            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let display_name = truncate(&row.category, 17);
            let remaining = if row.is_over() {
                format!("{} over", format_amount(-row.remaining))
            } else {
                format!("{} left", format_amount(row.remaining))
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{display_name:<18}"), style),
                Span::styled(
                    format!(
                        "{}/{} ",
                        format_amount(row.spent),
                        format_amount(row.budget)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(format!(" {remaining:<18}"), Style::default().fg(color)),
                Span::styled(
                    row.status.as_str(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Budgets for {} ", app.period.label()),
                theme::title_style(),
            )),
    );
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No category budgets set", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :edit-budgets Food & Drinks=200; Transport=100 to set them",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Budgets ", theme::title_style())),
    );
    f.render_widget(msg, area);
}
