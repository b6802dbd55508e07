use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ChatApi, ChatReply};
use crate::config::{AppConfig, PageConfig};
use crate::error::ChatError;
use crate::event::KeyAction;
use crate::ui::host::TuiHost;
use crate::widget::{ChatWidget, WidgetHost};

#[derive(Debug, Clone)]
pub enum Action {
    Key(KeyAction),
    Tick,
    ChatReply(Result<ChatReply, ChatError>),
    Quit,
}

pub struct App {
    /// `None` when the widget failed to attach; the page still runs.
    pub widget: Option<ChatWidget<TuiHost>>,
    pub page: PageConfig,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub action_tx: mpsc::UnboundedSender<Action>,
    api: Arc<dyn ChatApi>,
}

impl App {
    pub fn new(
        config: &AppConfig,
        api: Arc<dyn ChatApi>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let (widget, flash_message) = match ChatWidget::attach(TuiHost::new(), &config.chat) {
            Ok(widget) => (Some(widget), None),
            Err(e) => (None, Some((format!("Chat unavailable: {e}"), Instant::now()))),
        };

        Self {
            widget,
            page: config.page.clone(),
            flash_message,
            should_quit: false,
            action_tx,
            api,
        }
    }

    pub fn update(&mut self, action: Action) {
        // Clear flash message after 3 seconds
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key),
            Action::Tick => {
                if let Some(widget) = self.widget.as_mut() {
                    widget.poll_deferred(Instant::now());
                }
            }
            Action::ChatReply(outcome) => match self.widget.as_mut() {
                Some(widget) => widget.finish_send(outcome),
                None => debug!("chat reply dropped, widget is not attached"),
            },
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    fn handle_key(&mut self, key: KeyAction) {
        let Some(widget) = self.widget.as_mut() else {
            if matches!(key, KeyAction::Char('q') | KeyAction::Escape) {
                self.should_quit = true;
            }
            return;
        };

        // Tab is the floating toggle button
        if matches!(key, KeyAction::Tab) {
            widget.toggle();
            return;
        }

        if !widget.state().is_open {
            match key {
                KeyAction::Char('c') | KeyAction::Select => widget.toggle(),
                KeyAction::Char('q') | KeyAction::Escape => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key {
            KeyAction::Escape if widget.host().elements().close => widget.toggle(),
            KeyAction::Escape => {}
            KeyAction::Select => {
                let raw = widget.host().input.clone();
                if let Some(message) = widget.begin_send(&raw) {
                    spawn_request(Arc::clone(&self.api), self.action_tx.clone(), message);
                }
            }
            KeyAction::Char(c) => widget.host_mut().insert_char(c),
            KeyAction::Backspace => widget.host_mut().backspace(),
            KeyAction::Left => widget.host_mut().cursor_left(),
            KeyAction::Right => widget.host_mut().cursor_right(),
            KeyAction::Up => widget.host_mut().scroll_up(),
            KeyAction::Down => widget.host_mut().scroll_down(),
            KeyAction::Tab => {}
        }
    }
}

/// Post `message` on its own task and report the outcome as an action.
/// A panicking request still produces a `ChatReply` so the widget unlocks.
fn spawn_request(api: Arc<dyn ChatApi>, tx: mpsc::UnboundedSender<Action>, message: String) {
    tokio::spawn(async move {
        let request = tokio::spawn(async move { api.send(&message).await });
        let outcome = match request.await {
            Ok(outcome) => outcome,
            Err(e) => Err(ChatError::Transport(format!("request task failed: {e}"))),
        };
        let _ = tx.send(Action::ChatReply(outcome));
    });
}

#[cfg(test)]
mod tests;
