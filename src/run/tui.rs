use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::{Database, PeriodStore};
use crate::ledger;
use crate::ui::app::{App, InputMode, LoginField, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::util::scroll_to;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    let mut app = App::new(db.load_selected_period()?);
    app.refresh_all(db)?;

    let mut terminal = enter_terminal()?;
    let result = run_app(&mut terminal, &mut app, db);
    leave_terminal(&mut terminal)?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "ui loop failed");
        eprintln!("Error: {e:?}");
    }
    result
}

fn enter_terminal() -> Result<Term> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
}

fn leave_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Rows lost to the tab, status and command bars, borders and the table header.
const CHROME_ROWS: u16 = 6;

fn run_app(terminal: &mut Term, app: &mut App, db: &mut Database) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            app.visible_rows = (f.area().height.saturating_sub(CHROME_ROWS) as usize).max(1);
            crate::ui::render::render(f, app);
        })?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if std::mem::take(&mut app.show_help) {
            continue;
        }

        if app.screen == Screen::Login {
            handle_login_input(key, app, db)?;
        } else {
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Editing => handle_editing_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.code == KeyCode::Char(c) && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Typing, backspace. Returns false for keys that are not line edits.
fn edit_line(key: &KeyEvent, line: &mut String) -> bool {
    match key.code {
        KeyCode::Char(c) => line.push(c),
        KeyCode::Backspace => {
            line.pop();
        }
        _ => return false,
    }
    true
}

fn handle_login_input(key: KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    if key.code == KeyCode::Esc || is_ctrl(&key, 'c') {
        app.running = false;
        return Ok(());
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login_field = app.login_field.other();
        }
        KeyCode::Enter if app.login_field == LoginField::Username => {
            app.login_field = LoginField::Password;
        }
        KeyCode::Enter => {
            if app.submit_login() {
                app.refresh_all(db)?;
            } else {
                tracing::warn!("login rejected");
            }
        }
        _ => {
            let field = match app.login_field {
                LoginField::Username => &mut app.login_username,
                LoginField::Password => &mut app.login_password,
            };
            edit_line(&key, field);
        }
    }
    Ok(())
}

fn handle_normal_input(key: KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    if is_ctrl(&key, 'q') || is_ctrl(&key, 'c') {
        app.running = false;
        return Ok(());
    }
    let half_page = app.visible_rows / 2;
    if is_ctrl(&key, 'd') {
        move_cursor(app, Motion::Down(half_page));
        return Ok(());
    }
    if is_ctrl(&key, 'u') {
        move_cursor(app, Motion::Up(half_page));
        return Ok(());
    }

    // Keys that are shorthand for a `:` command.
    let shortcut = match key.code {
        KeyCode::Char('H') => Some("prev-month"),
        KeyCode::Char('L') => Some("next-month"),
        KeyCode::Char('t') => Some("total"),
        KeyCode::Char('B') => Some("edit-budgets"),
        KeyCode::Char('D') if app.screen == Screen::Expenses => Some("delete"),
        _ => None,
    };
    if let Some(command) = shortcut {
        return commands::handle_command(command, app, db);
    }

    match key.code {
        KeyCode::Char(':') => {
            app.command_input.clear();
            app.input_mode = InputMode::Command;
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        KeyCode::Char('j') | KeyCode::Down => move_cursor(app, Motion::Down(1)),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(app, Motion::Up(1)),
        KeyCode::Char('g') => move_cursor(app, Motion::Top),
        KeyCode::Char('G') => move_cursor(app, Motion::Bottom),
        KeyCode::Tab => {
            let next = app.screen.cycle(1);
            switch_screen(app, db, next)?;
        }
        KeyCode::BackTab => {
            let prev = app.screen.cycle(-1);
            switch_screen(app, db, prev)?;
        }
        KeyCode::Char(c @ '1'..='3') => {
            let tab = c as usize - '1' as usize;
            if let Some(&screen) = Screen::all().get(tab) {
                switch_screen(app, db, screen)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = std::mem::take(&mut app.command_input);
            app.input_mode = InputMode::Normal;
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        _ => {
            // Backspacing past the colon leaves command mode.
            if edit_line(&key, &mut app.command_input) && app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
    }
    Ok(())
}

fn handle_editing_input(key: KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => commands::submit_edit(app, db)?,
        KeyCode::Esc => {
            app.command_input.clear();
            app.edit_target = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        _ => {
            edit_line(&key, &mut app.command_input);
        }
    }
    Ok(())
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    let confirmed = matches!(key.code, KeyCode::Char('y' | 'Y'));
    let action = app.pending_action.take();
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();

    let Some(PendingAction::DeleteExpense { id, label }) = action.filter(|_| confirmed) else {
        app.set_status("Cancelled");
        return Ok(());
    };

    if let Some(deleted) = app.absorb(ledger::delete_expense(db, id))? {
        app.refresh_all(db)?;
        app.set_status(if deleted {
            format!("Deleted: {label}")
        } else {
            "Expense was already gone".to_string()
        });
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

enum Motion {
    Down(usize),
    Up(usize),
    Top,
    Bottom,
}

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) -> Result<()> {
    app.screen = screen;
    app.refresh_all(db)
}

fn move_cursor(app: &mut App, motion: Motion) {
    let page = app.visible_rows.max(1);
    let Some((index, scroll, len)) = app.list_cursor() else {
        return;
    };
    let target = match motion {
        Motion::Down(n) => index.saturating_add(n),
        Motion::Up(n) => index.saturating_sub(n),
        Motion::Top => 0,
        Motion::Bottom => usize::MAX,
    };
    scroll_to(index, scroll, target, len, page);
}
