use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyHandler;

impl KeyHandler {
    pub fn handle_normal_mode_key(key_event: KeyEvent) -> NormalModeAction {
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                NormalModeAction::Quit
            }
            KeyCode::Char('q') => NormalModeAction::Quit,
            KeyCode::Esc => NormalModeAction::HandleEscape,
            KeyCode::Up | KeyCode::Char('k') => NormalModeAction::MoveSelectionUp,
            KeyCode::Down | KeyCode::Char('j') => NormalModeAction::MoveSelectionDown,
            KeyCode::Left | KeyCode::Char('h') => NormalModeAction::PreviousCategory,
            KeyCode::Right | KeyCode::Char('l') => NormalModeAction::NextCategory,
            KeyCode::Tab | KeyCode::BackTab => NormalModeAction::SwitchFocus,
            KeyCode::Enter | KeyCode::Char(' ') => NormalModeAction::ToggleFavorite,
            KeyCode::Char('/') => NormalModeAction::EnterSearchMode,
            KeyCode::Char('x') => NormalModeAction::ClearFavorites,
            KeyCode::Char('?') => NormalModeAction::ToggleHelpMode,
            _ => NormalModeAction::None,
        }
    }

    pub fn handle_help_mode_key(key_event: KeyEvent) -> HelpModeAction {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('?') => {
                HelpModeAction::ExitHelpMode
            }
            _ => HelpModeAction::None,
        }
    }

    pub fn handle_search_mode_key(key_event: KeyEvent) -> SearchModeAction {
        match key_event.code {
            KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                SearchModeAction::Quit
            }
            KeyCode::Esc | KeyCode::Enter => SearchModeAction::ExitSearch,
            KeyCode::Backspace => SearchModeAction::Backspace,
            KeyCode::Delete => SearchModeAction::Delete,
            KeyCode::Left => SearchModeAction::MoveCursorLeft,
            KeyCode::Right => SearchModeAction::MoveCursorRight,
            KeyCode::Home => SearchModeAction::MoveCursorHome,
            KeyCode::End => SearchModeAction::MoveCursorEnd,
            KeyCode::Char(c)
                if key_event.modifiers.is_empty() || key_event.modifiers == KeyModifiers::SHIFT =>
            {
                SearchModeAction::InsertChar(c)
            }
            _ => SearchModeAction::None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum NormalModeAction {
    None,
    Quit,
    HandleEscape,
    MoveSelectionUp,
    MoveSelectionDown,
    PreviousCategory,
    NextCategory,
    SwitchFocus,
    ToggleFavorite,
    EnterSearchMode,
    ClearFavorites,
    ToggleHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum HelpModeAction {
    None,
    ExitHelpMode,
}

#[derive(Debug, PartialEq)]
pub enum SearchModeAction {
    None,
    Quit,
    ExitSearch,
    Backspace,
    Delete,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorHome,
    MoveCursorEnd,
    InsertChar(char),
}

pub trait KeyEventHandler {
    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()>;
}
