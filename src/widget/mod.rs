//! The chat widget controller.
//!
//! `ChatWidget` owns the widget state and drives a [`WidgetHost`], the
//! component that owns the concrete UI elements. A send cycle is split in two
//! so a host can keep handling input while the request is in flight:
//! [`ChatWidget::begin_send`] updates the transcript and locks the input,
//! [`ChatWidget::finish_send`] renders the outcome and always unlocks it.

use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use futures::FutureExt;
use tracing::{debug, error, info, warn};

use crate::api::{ChatApi, ChatReply};
use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::markdown::{escape_html, render_markdown};
use crate::model::chat::ChatMessage;
use crate::model::widget::{HostElements, SendPhase, Welcome, WidgetState};

/// The UI surface the widget renders into.
///
/// Methods that touch an optional element are only called when
/// [`WidgetHost::elements`] reports that element as present.
pub trait WidgetHost {
    fn elements(&self) -> HostElements;
    fn set_active(&mut self, active: bool);
    /// Number of entries in the message list, placeholder content included.
    fn message_count(&self) -> usize;
    fn show_welcome(&mut self, welcome: &Welcome);
    fn remove_welcome(&mut self);
    fn append_message(&mut self, message: ChatMessage);
    fn clear_input(&mut self);
    /// Enables or disables both the input and the send control.
    fn set_input_enabled(&mut self, enabled: bool);
    fn set_typing(&mut self, visible: bool);
    fn focus_input(&mut self);
    fn scroll_to_bottom(&mut self);
}

pub struct ChatWidget<H: WidgetHost> {
    host: H,
    elements: HostElements,
    state: WidgetState,
    endpoint: String,
    settle_delay: Duration,
    settle_at: Option<Instant>,
}

impl<H: WidgetHost> ChatWidget<H> {
    pub fn attach(mut host: H, config: &ChatConfig) -> Result<Self, ChatError> {
        let elements = host.elements();
        if !elements.toggle_button {
            error!(element = "toggle button", "chat widget elements not found");
            return Err(ChatError::MissingElement("toggle button"));
        }
        if !elements.container {
            error!(element = "container", "chat widget elements not found");
            return Err(ChatError::MissingElement("container"));
        }

        if elements.messages && host.message_count() == 0 {
            host.show_welcome(&Welcome::from(&config.welcome));
        }

        info!(endpoint = %config.endpoint, "chat widget attached");

        Ok(Self {
            host,
            elements,
            state: WidgetState::default(),
            endpoint: config.endpoint.clone(),
            settle_delay: config.settle_delay(),
            settle_at: None,
        })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn phase(&self) -> SendPhase {
        self.state.phase()
    }

    pub fn toggle(&mut self) {
        self.toggle_at(Instant::now());
    }

    /// Flip open/closed. Opening schedules input focus and a scroll to the
    /// bottom once `settle_delay` has passed, see [`ChatWidget::poll_deferred`].
    pub fn toggle_at(&mut self, now: Instant) {
        self.state.is_open = !self.state.is_open;
        self.host.set_active(self.state.is_open);
        self.settle_at = self.state.is_open.then(|| now + self.settle_delay);
    }

    /// Run the deferred open actions if they are due. Returns whether they ran.
    pub fn poll_deferred(&mut self, now: Instant) -> bool {
        match self.settle_at {
            Some(at) if now >= at => {
                self.settle_at = None;
                if self.state.is_open {
                    if self.elements.input {
                        self.host.focus_input();
                    }
                    self.scroll_to_bottom();
                }
                true
            }
            _ => false,
        }
    }

    /// Run a whole send cycle against `api`.
    pub async fn send(&mut self, raw: &str, api: &dyn ChatApi) {
        let Some(message) = self.begin_send(raw) else {
            return;
        };

        let outcome = AssertUnwindSafe(api.send(&message))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(ChatError::Transport("request panicked".into())));

        self.finish_send(outcome);
    }

    /// Start a send cycle. Returns the message to post, or `None` when there
    /// is nothing to send or a request is already outstanding.
    pub fn begin_send(&mut self, raw: &str) -> Option<String> {
        if !self.elements.input || !self.elements.messages {
            return None;
        }

        let message = raw.trim();
        if message.is_empty() {
            return None;
        }

        if !self.state.is_input_enabled {
            debug!("send ignored while a request is outstanding");
            return None;
        }

        self.host.remove_welcome();
        self.append(ChatMessage::user(escape_html(message)));
        self.host.clear_input();
        self.set_input_enabled(false);
        self.show_typing();

        debug!(chars = message.chars().count(), "chat request started");
        Some(message.to_string())
    }

    /// Complete the outstanding send cycle with the request outcome.
    pub fn finish_send(&mut self, outcome: Result<ChatReply, ChatError>) {
        let mut cycle = SendCleanup { widget: self };
        cycle.widget.hide_typing();

        match outcome {
            Ok(reply) => {
                info!(
                    source = reply.source.as_deref().unwrap_or("unknown"),
                    "chat reply received"
                );
                let html = render_markdown(&reply.reply);
                cycle.widget.append(ChatMessage::bot(html));
            }
            Err(e) => {
                warn!(error = %e, endpoint = %cycle.widget.endpoint, "chat request failed");
                let text = cycle.widget.fallback_text();
                cycle.widget.append(ChatMessage::bot_error(text));
            }
        }
    }

    fn fallback_text(&self) -> String {
        format!(
            "Sorry, I encountered an error. Please make sure the backend API is running at {}",
            self.endpoint
        )
    }

    fn append(&mut self, message: ChatMessage) {
        if !self.elements.messages {
            return;
        }
        self.host.append_message(message);
        self.scroll_to_bottom();
    }

    fn set_input_enabled(&mut self, enabled: bool) {
        self.state.is_input_enabled = enabled;
        if self.elements.input || self.elements.send {
            self.host.set_input_enabled(enabled);
        }
    }

    fn show_typing(&mut self) {
        if self.elements.typing {
            self.host.set_typing(true);
            self.scroll_to_bottom();
        }
    }

    fn hide_typing(&mut self) {
        if self.elements.typing {
            self.host.set_typing(false);
        }
    }

    fn scroll_to_bottom(&mut self) {
        if self.elements.messages {
            self.host.scroll_to_bottom();
        }
    }
}

/// Unlocks and refocuses the input when a send cycle ends, unwinding included.
struct SendCleanup<'a, H: WidgetHost> {
    widget: &'a mut ChatWidget<H>,
}

impl<H: WidgetHost> Drop for SendCleanup<'_, H> {
    fn drop(&mut self) {
        self.widget.set_input_enabled(true);
        if self.widget.elements.input {
            self.widget.host.focus_input();
        }
    }
}
