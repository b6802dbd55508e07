use std::cell::Cell;

use crate::model::chat::ChatMessage;
use crate::model::widget::{HostElements, Welcome};
use crate::widget::WidgetHost;

/// Terminal-side state of the chat widget, drawn by `ui::chat_panel`.
#[derive(Debug, Default)]
pub struct TuiHost {
    pub active: bool,
    pub welcome: Option<Welcome>,
    pub transcript: Vec<ChatMessage>,
    pub input: String,
    /// Cursor position in chars.
    pub cursor: usize,
    pub input_enabled: bool,
    pub input_focused: bool,
    pub typing: bool,
    /// Rows scrolled up from the bottom of the transcript.
    pub scroll: usize,
    /// Largest useful `scroll`, recorded by the panel on each draw.
    pub max_scroll: Cell<usize>,
}

impl TuiHost {
    pub fn new() -> Self {
        Self {
            input_enabled: true,
            ..Self::default()
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if !self.input_enabled {
            return;
        }
        let byte_idx = self.byte_index();
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if !self.input_enabled || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let byte_idx = self.byte_index();
        self.input.remove(byte_idx);
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll.get());
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.min(self.max_scroll.get()).saturating_sub(1);
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map_or(self.input.len(), |(i, _)| i)
    }
}

impl WidgetHost for TuiHost {
    fn elements(&self) -> HostElements {
        HostElements::ALL
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.input_focused = false;
        }
    }

    fn message_count(&self) -> usize {
        self.transcript.len() + usize::from(self.welcome.is_some())
    }

    fn show_welcome(&mut self, welcome: &Welcome) {
        self.welcome = Some(welcome.clone());
    }

    fn remove_welcome(&mut self) {
        self.welcome = None;
    }

    fn append_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    fn set_typing(&mut self, visible: bool) {
        self.typing = visible;
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll = 0;
    }
}
