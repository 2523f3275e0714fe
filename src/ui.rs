use crate::app::{App, DiaryScreen, LoginScreen, Screen};
use color_eyre::Result;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{stdout, Stdout};
use unicode_width::UnicodeWidthStr;

const UNDO_TITLE: &str = "Remove last note";
const UNDO_MESSAGE: &str =
    "Do you really want to remove the last writing? This operation cannot be undone!";
const DIARY_CONTROLS: &str =
    "Enter: Save, Alt+Enter: New line, Ctrl+U: Undo, PgUp/PgDn: Scroll, Esc: Quit";
const MAX_INPUT_ROWS: u16 = 5;

pub struct UI<B: Backend> {
    terminal: Terminal<B>,
}

impl UI<CrosstermBackend<Stdout>> {
    pub fn new() -> Result<Self> {
        Self::with_backend(CrosstermBackend::new(stdout()))
    }
}

impl<B: Backend> UI<B> {
    pub fn with_backend(backend: B) -> Result<Self> {
        let terminal = Terminal::new(backend)?;
        Ok(UI { terminal })
    }

    /// Draws the current screen. The diary scroll offset is clamped to what
    /// the visible area can show, hence `&mut`.
    pub fn display(&mut self, app: &mut App) -> Result<()> {
        self.terminal.draw(|f| match app.screen_mut() {
            Screen::Login(screen) => draw_login(f, screen),
            Screen::Diary(screen) => draw_diary(f, screen),
        })?;
        Ok(())
    }
}

/// Raw mode and the alternate screen for as long as this is alive.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen)?;
        Ok(TerminalGuard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        disable_raw_mode().ok();
        execute!(stdout(), LeaveAlternateScreen, Show).ok();
    }
}

fn title(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
}

fn instructions(text: &str) -> Paragraph<'_> {
    Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
}

/// Cursor after the last character of an input drawn inside a bordered block.
fn place_cursor(f: &mut Frame, area: Rect, shown: &str) {
    let visible_rows = area.height.saturating_sub(2).max(1);
    let row = (input_rows(shown) - 1).min(visible_rows - 1);
    let last_line = shown.rsplit('\n').next().unwrap_or("");
    let max_x = area.x + area.width.saturating_sub(2);
    let x = (area.x + 1).saturating_add(last_line.width() as u16).min(max_x);
    f.set_cursor_position((x, area.y + 1 + row));
}

fn input_rows(input: &str) -> u16 {
    input.split('\n').count().min(u16::MAX as usize) as u16
}

fn draw_login(f: &mut Frame, screen: &LoginScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(title("Secret Diary"), chunks[0]);

    let masked = "*".repeat(screen.gate.input().chars().count());
    let pin_input = Paragraph::new(masked.as_str())
        .block(Block::default().borders(Borders::ALL).title("PIN"));
    f.render_widget(pin_input, chunks[1]);
    place_cursor(f, chunks[1], &masked);

    if let Some(error) = &screen.error {
        let error_line = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        f.render_widget(error_line, chunks[2]);
    }

    f.render_widget(instructions("Enter: Log in, Esc: Quit"), chunks[4]);
}

fn draw_diary(f: &mut Frame, screen: &mut DiaryScreen) {
    let rows = input_rows(&screen.input);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(rows.min(MAX_INPUT_ROWS) + 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(title("Secret Diary"), chunks[0]);

    let new_entry = Paragraph::new(screen.input.as_str())
        .block(Block::default().borders(Borders::ALL).title("New writing"))
        .scroll((rows.saturating_sub(MAX_INPUT_ROWS), 0));
    f.render_widget(new_entry, chunks[1]);

    let count = screen.diary.get_entries().len();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Diary ({count})"));
    let inner = block.inner(chunks[2]);
    f.render_widget(block, chunks[2]);

    let diary = Paragraph::new(screen.diary.render()).wrap(Wrap { trim: false });
    let total = diary.line_count(inner.width).min(u16::MAX as usize) as u16;
    screen.clamp_scroll(total.saturating_sub(inner.height));
    f.render_widget(diary.scroll((screen.scroll, 0)), inner);

    match &screen.notice {
        Some(notice) => {
            let toast = Paragraph::new(Line::from(Span::styled(
                notice.message.as_str(),
                Style::default().fg(Color::Black).bg(Color::Yellow),
            )))
            .alignment(Alignment::Center);
            f.render_widget(toast, chunks[3]);
        }
        None => f.render_widget(
            instructions(DIARY_CONTROLS),
            chunks[3],
        ),
    }

    if screen.confirm_undo {
        draw_undo_dialog(f);
    } else {
        place_cursor(f, chunks[1], &screen.input);
    }
}

fn draw_undo_dialog(f: &mut Frame) {
    let area = centered_rect(60, 9, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(UNDO_TITLE)
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(UNDO_MESSAGE).wrap(Wrap { trim: true });
    f.render_widget(message, chunks[0]);

    let buttons = Line::from(vec![
        Span::styled("[Y]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("es    "),
        Span::styled("[N]", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("o"),
    ]);
    f.render_widget(Paragraph::new(buttons).alignment(Alignment::Center), chunks[1]);
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
