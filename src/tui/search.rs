/// Line editor behind the search box. `cursor` is a byte offset that always
/// sits on a char boundary.
#[derive(Debug, Default)]
pub struct SearchInput {
    pub search_mode: bool,
    pub buffer: String,
    pub cursor: usize,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_search_mode(&mut self, current_text: &str) {
        self.buffer = current_text.to_string();
        self.cursor = self.buffer.len();
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Returns whether the buffer changed.
    pub fn backspace(&mut self) -> bool {
        match self.buffer[..self.cursor].chars().next_back() {
            Some(ch) => {
                self.cursor -= ch.len_utf8();
                self.buffer.remove(self.cursor);
                true
            }
            None => false,
        }
    }

    /// Returns whether the buffer changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(ch) = self.buffer[..self.cursor].chars().next_back() {
            self.cursor -= ch.len_utf8();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(ch) = self.buffer[self.cursor..].chars().next() {
            self.cursor += ch.len_utf8();
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.buffer.split_at(self.cursor)
    }
}
