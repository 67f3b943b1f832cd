#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Items,
    Favorites,
}

/// Cursor positions in the item list and the favorites panel.
#[derive(Debug)]
pub struct NavigationState {
    pub focus: Focus,
    pub item_index: usize,
    pub favorite_index: usize,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Items,
            item_index: 0,
            favorite_index: 0,
        }
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Items => Focus::Favorites,
            Focus::Favorites => Focus::Items,
        };
    }

    pub fn focus_items(&mut self) {
        self.focus = Focus::Items;
    }

    fn focused_index_mut(&mut self) -> &mut usize {
        match self.focus {
            Focus::Items => &mut self.item_index,
            Focus::Favorites => &mut self.favorite_index,
        }
    }

    pub fn move_selection_up(&mut self) {
        let index = self.focused_index_mut();
        *index = index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self, max_items: usize) {
        let index = self.focused_index_mut();
        if *index < max_items.saturating_sub(1) {
            *index += 1;
        }
    }

    /// Keeps both cursors inside their lists after the lists shrink.
    pub fn clamp(&mut self, item_count: usize, favorite_count: usize) {
        self.item_index = self.item_index.min(item_count.saturating_sub(1));
        self.favorite_index = self.favorite_index.min(favorite_count.saturating_sub(1));
    }
}
