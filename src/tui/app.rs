use crate::storage::KeyValueStore;
use crate::store::CatalogStore;
use crate::tui::handlers::{
    HelpModeAction, KeyEventHandler, KeyHandler, NormalModeAction, SearchModeAction,
};
use crate::tui::navigation::{Focus, NavigationState};
use crate::tui::search::SearchInput;
use anyhow::Result;
use crossterm::event::KeyEvent;

#[derive(Debug)]
pub struct App<S: KeyValueStore> {
    pub store: CatalogStore<S>,
    pub navigation: NavigationState,
    pub search: SearchInput,
    pub help_mode: bool,
    pub should_quit: bool,
    pub storage_label: String,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: CatalogStore<S>, storage_label: String) -> Self {
        let mut app = Self {
            store,
            navigation: NavigationState::new(),
            search: SearchInput::new(),
            help_mode: false,
            should_quit: false,
            storage_label,
        };
        app.clamp_selection();
        app
    }

    fn handle_normal_mode_key(&mut self, key_event: KeyEvent) {
        match KeyHandler::handle_normal_mode_key(key_event) {
            NormalModeAction::Quit => self.should_quit = true,
            NormalModeAction::HandleEscape => self.navigation.focus_items(),
            NormalModeAction::MoveSelectionUp => self.navigation.move_selection_up(),
            NormalModeAction::MoveSelectionDown => {
                let len = self.focused_len();
                self.navigation.move_selection_down(len);
            }
            NormalModeAction::PreviousCategory => {
                self.store.previous_category();
                self.clamp_selection();
            }
            NormalModeAction::NextCategory => {
                self.store.next_category();
                self.clamp_selection();
            }
            NormalModeAction::SwitchFocus => self.navigation.switch_focus(),
            NormalModeAction::ToggleFavorite => self.toggle_selected_favorite(),
            NormalModeAction::EnterSearchMode => {
                let current = self.store.search_text().to_string();
                self.search.enter_search_mode(&current);
            }
            NormalModeAction::ClearFavorites => {
                self.store.clear_favorites();
                self.clamp_selection();
            }
            NormalModeAction::ToggleHelpMode => self.help_mode = true,
            NormalModeAction::None => {}
        }
    }

    fn handle_help_mode_key(&mut self, key_event: KeyEvent) {
        if KeyHandler::handle_help_mode_key(key_event) == HelpModeAction::ExitHelpMode {
            self.help_mode = false;
        }
    }

    fn handle_search_mode_key(&mut self, key_event: KeyEvent) {
        let changed = match KeyHandler::handle_search_mode_key(key_event) {
            SearchModeAction::Quit => {
                self.should_quit = true;
                false
            }
            SearchModeAction::ExitSearch => {
                self.search.exit_search_mode();
                false
            }
            SearchModeAction::Backspace => self.search.backspace(),
            SearchModeAction::Delete => self.search.delete(),
            SearchModeAction::MoveCursorLeft => {
                self.search.move_cursor_left();
                false
            }
            SearchModeAction::MoveCursorRight => {
                self.search.move_cursor_right();
                false
            }
            SearchModeAction::MoveCursorHome => {
                self.search.move_cursor_home();
                false
            }
            SearchModeAction::MoveCursorEnd => {
                self.search.move_cursor_end();
                false
            }
            SearchModeAction::InsertChar(c) => {
                self.search.insert_char(c);
                true
            }
            SearchModeAction::None => false,
        };

        if changed {
            self.store.set_search_text(&self.search.buffer);
            self.clamp_selection();
        }
    }

    fn focused_len(&self) -> usize {
        match self.navigation.focus {
            Focus::Items => self.store.filtered_items().len(),
            Focus::Favorites => self.store.favorite_count(),
        }
    }

    fn clamp_selection(&mut self) {
        let item_count = self.store.filtered_items().len();
        let favorite_count = self.store.favorite_count();
        self.navigation.clamp(item_count, favorite_count);
    }

    fn toggle_selected_favorite(&mut self) {
        let selected = match self.navigation.focus {
            Focus::Items => self
                .store
                .filtered_items()
                .get(self.navigation.item_index)
                .map(|item| (*item).clone()),
            Focus::Favorites => self.store.favorites().get(self.navigation.favorite_index).cloned(),
        };

        if let Some(item) = selected {
            let now_favorite = self.store.toggle_favorite(&item);
            tracing::debug!(id = item.id, now_favorite, "toggled favorite");
            self.clamp_selection();
        }
    }
}

impl<S: KeyValueStore> KeyEventHandler for App<S> {
    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        if self.help_mode {
            self.handle_help_mode_key(key_event);
        } else if self.search.search_mode {
            self.handle_search_mode_key(key_event);
        } else {
            self.handle_normal_mode_key(key_event);
        }
        Ok(())
    }
}
