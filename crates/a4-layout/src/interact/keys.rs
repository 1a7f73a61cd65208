/// Keys the editors react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Char(char),
    Other,
}

/// A key press as delivered by the surrounding UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    /// Ctrl on most platforms, ⌘ on macOS
    pub ctrl_or_meta: bool,
    /// Focus is inside a text field; editing keys belong to the field then
    pub focus_in_text_input: bool,
}

impl KeyInput {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            ctrl_or_meta: false,
            focus_in_text_input: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl_or_meta = true;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.focus_in_text_input = true;
        self
    }

    pub fn is_delete(&self) -> bool {
        matches!(self.key, Key::Delete | Key::Backspace)
    }

    pub fn is_shortcut(&self, c: char) -> bool {
        self.ctrl_or_meta && matches!(self.key, Key::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

/// What a key press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Ignored,
    Deleted(crate::types::ElementId),
    Copied(crate::types::ElementId),
    Pasted(crate::types::ElementId),
}
