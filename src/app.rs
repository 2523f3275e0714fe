use crate::diary_state::DiaryState;
use crate::login::{LoginError, LoginGate};
use crate::preferences::KeyValueStore;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};
use tracing::debug;

pub const NOTICE_DURATION: Duration = Duration::from_secs(2);
const PAGE_ROWS: u16 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Type(char),
    Backspace,
    ScrollUp(u16),
    ScrollDown(u16),
    Submit,
    RequestUndo,
    Confirm,
    Cancel,
    Quit,
}

pub struct LoginScreen {
    pub gate: LoginGate,
    pub error: Option<LoginError>,
}

pub struct DiaryScreen {
    pub diary: DiaryState,
    pub input: String,
    pub confirm_undo: bool,
    pub notice: Option<Notice>,
    /// Rows of the diary area scrolled past; 0 shows the newest entry.
    pub scroll: u16,
}

pub struct Notice {
    pub message: String,
    shown_at: Instant,
}

pub enum Screen {
    Login(LoginScreen),
    Diary(DiaryScreen),
}

pub struct App {
    screen: Screen,
    store: Option<Box<dyn KeyValueStore>>,
    should_quit: bool,
}

impl App {
    /// The store is only opened into a diary once the PIN has been accepted.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        App {
            screen: Screen::Login(LoginScreen {
                gate: LoginGate::new(),
                error: None,
            }),
            store: Some(store),
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Some(action) = self.map_key(key) {
            self.apply(action);
        }
    }

    fn map_key(&self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        match &self.screen {
            Screen::Diary(screen) if screen.confirm_undo => match key.code {
                KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::Confirm),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::Cancel),
                _ => None,
            },
            Screen::Diary(_) if ctrl && key.code == KeyCode::Char('u') => {
                Some(Action::RequestUndo)
            }
            Screen::Diary(_) => match key.code {
                KeyCode::Enter if alt => Some(Action::Type('\n')),
                KeyCode::Up => Some(Action::ScrollUp(1)),
                KeyCode::Down => Some(Action::ScrollDown(1)),
                KeyCode::PageUp => Some(Action::ScrollUp(PAGE_ROWS)),
                KeyCode::PageDown => Some(Action::ScrollDown(PAGE_ROWS)),
                KeyCode::Home => Some(Action::ScrollUp(u16::MAX)),
                KeyCode::End => Some(Action::ScrollDown(u16::MAX)),
                _ => Self::map_common(key.code, ctrl),
            },
            Screen::Login(_) => Self::map_common(key.code, ctrl),
        }
    }

    fn map_common(code: KeyCode, ctrl: bool) -> Option<Action> {
        match code {
            KeyCode::Char('c') if ctrl => Some(Action::Quit),
            KeyCode::Esc => Some(Action::Quit),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) if !ctrl => Some(Action::Type(c)),
            _ => None,
        }
    }

    pub fn apply(&mut self, action: Action) {
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }
        match &mut self.screen {
            Screen::Login(screen) => {
                if screen.apply(action) {
                    self.unlock();
                }
            }
            Screen::Diary(screen) => screen.apply(action),
        }
    }

    /// Past the gate there is no way back to it; leaving the diary quits.
    fn unlock(&mut self) {
        if let Some(store) = self.store.take() {
            self.screen = Screen::Diary(DiaryScreen::new(DiaryState::load(store)));
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if let Screen::Diary(screen) = &mut self.screen {
            if screen
                .notice
                .as_ref()
                .is_some_and(|n| now.duration_since(n.shown_at) >= NOTICE_DURATION)
            {
                screen.notice = None;
            }
        }
    }
}

impl LoginScreen {
    /// Returns true once the PIN has been accepted.
    fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Type(c) => {
                self.gate.push(c);
                self.error = None;
            }
            Action::Backspace => {
                self.gate.backspace();
                self.error = None;
            }
            Action::Submit => match self.gate.submit() {
                Ok(()) => return true,
                Err(e) => self.error = Some(e),
            },
            _ => {}
        }
        false
    }
}

impl DiaryScreen {
    fn new(diary: DiaryState) -> Self {
        DiaryScreen {
            diary,
            input: String::new(),
            confirm_undo: false,
            notice: None,
            scroll: 0,
        }
    }

    /// Keeps the offset within what the diary area can actually scroll.
    pub fn clamp_scroll(&mut self, max: u16) {
        self.scroll = self.scroll.min(max);
    }

    fn apply(&mut self, action: Action) {
        if self.confirm_undo {
            match action {
                Action::Confirm => {
                    self.confirm_undo = false;
                    if let Some(removed) = self.diary.remove_most_recent() {
                        debug!(date_time = %removed.date_time, "last entry removed");
                    }
                }
                Action::Cancel => self.confirm_undo = false,
                _ => {}
            }
            return;
        }
        match action {
            Action::Type(c) => self.input.push(c),
            Action::Backspace => {
                self.input.pop();
            }
            Action::Submit => match self.diary.append(&self.input) {
                Ok(entry) => {
                    debug!(date_time = %entry.date_time, "entry saved");
                    self.input.clear();
                    self.scroll = 0;
                }
                Err(e) => {
                    self.notice = Some(Notice {
                        message: e.to_string(),
                        shown_at: Instant::now(),
                    });
                }
            },
            Action::ScrollUp(rows) => self.scroll = self.scroll.saturating_sub(rows),
            Action::ScrollDown(rows) => self.scroll = self.scroll.saturating_add(rows),
            Action::RequestUndo => self.confirm_undo = true,
            _ => {}
        }
    }
}
