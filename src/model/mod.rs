pub mod chat;
pub mod widget;
