/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEdit {
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
}

/// Single-line text input with a character-indexed cursor.
#[derive(Debug, Clone)]
pub struct InputField {
    text: String,
    cursor: usize,
    enabled: bool,
}

impl Default for InputField {
    fn default() -> Self {
        Self::new()
    }
}

impl InputField {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            enabled: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Apply an edit. Returns false when the field is disabled and the edit
    /// was dropped.
    pub fn apply(&mut self, edit: InputEdit) -> bool {
        if !self.enabled {
            return false;
        }

        let char_count = self.text.chars().count();
        match edit {
            InputEdit::Insert(c) => {
                let byte_pos = char_to_byte_index(&self.text, self.cursor);
                self.text.insert(byte_pos, c);
                self.cursor += 1;
            }
            InputEdit::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let byte_pos = char_to_byte_index(&self.text, self.cursor);
                    self.text.remove(byte_pos);
                }
            }
            InputEdit::Delete => {
                if self.cursor < char_count {
                    let byte_pos = char_to_byte_index(&self.text, self.cursor);
                    self.text.remove(byte_pos);
                }
            }
            InputEdit::Left => self.cursor = self.cursor.saturating_sub(1),
            InputEdit::Right => self.cursor = (self.cursor + 1).min(char_count),
            InputEdit::Home => self.cursor = 0,
            InputEdit::End => self.cursor = char_count,
        }
        true
    }
}
