use ratatui::style::Color;

use crate::model::chat::{ChatMessage, Sender};

pub const ACCENT: Color = Color::Rgb(0x6C, 0x63, 0xFF);
pub const MUTED: Color = Color::DarkGray;
pub const ERROR: Color = Color::Rgb(0xE5, 0x48, 0x4D);

pub fn sender_color(sender: Sender) -> Color {
    match sender {
        Sender::User => Color::White,
        Sender::Bot => ACCENT,
    }
}

pub fn body_color(message: &ChatMessage) -> Color {
    if message.is_error {
        return ERROR;
    }
    match message.sender {
        Sender::User => Color::White,
        Sender::Bot => Color::Rgb(0xCC, 0xCC, 0xCC),
    }
}
