use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{Action, App};
use crate::api::{ChatApi, ChatReply};
use crate::config::{AppConfig, ChatConfig};
use crate::error::ChatError;
use crate::event::KeyAction;
use crate::model::chat::Sender;

struct StubApi {
    reply: Option<&'static str>,
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ChatApi for StubApi {
    fn endpoint(&self) -> &str {
        "http://stub/api/chat"
    }

    async fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
        self.sent.lock().unwrap().push(message.to_string());
        match self.reply {
            Some(reply) => Ok(ChatReply {
                reply: reply.to_string(),
                source: None,
            }),
            None => Err(ChatError::Status { status: 500 }),
        }
    }
}

fn make_app(
    reply: Option<&'static str>,
) -> (App, mpsc::UnboundedReceiver<Action>, Arc<Mutex<Vec<String>>>) {
    let sent = Arc::new(Mutex::new(Vec::new()));
    let api = StubApi {
        reply,
        sent: sent.clone(),
    };
    let config = AppConfig {
        chat: ChatConfig {
            endpoint: "http://stub/api/chat".into(),
            settle_delay_ms: 0,
            ..ChatConfig::default()
        },
        ..AppConfig::default()
    };
    let (tx, rx) = mpsc::unbounded_channel();
    (App::new(&config, Arc::new(api), tx), rx, sent)
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.update(Action::Key(KeyAction::Char(c)));
    }
}

#[test]
fn closed_widget_opens_with_c_and_quits_with_q() {
    let (mut app, _rx, _) = make_app(Some("hi"));

    app.update(Action::Key(KeyAction::Char('c')));
    assert!(app.widget.as_ref().unwrap().state().is_open);

    app.update(Action::Key(KeyAction::Escape));
    assert!(!app.widget.as_ref().unwrap().state().is_open);
    assert!(!app.should_quit);

    app.update(Action::Key(KeyAction::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn open_widget_types_instead_of_quitting() {
    let (mut app, _rx, _) = make_app(Some("hi"));

    app.update(Action::Key(KeyAction::Tab));
    type_text(&mut app, "quit");

    assert!(!app.should_quit);
    assert_eq!(app.widget.as_ref().unwrap().host().input, "quit");
}

#[test]
fn tick_focuses_input_after_opening() {
    let (mut app, _rx, _) = make_app(Some("hi"));

    app.update(Action::Key(KeyAction::Tab));
    assert!(!app.widget.as_ref().unwrap().host().input_focused);

    app.update(Action::Tick);
    assert!(app.widget.as_ref().unwrap().host().input_focused);
}

#[tokio::test]
async fn enter_sends_and_reply_unlocks_input() {
    let (mut app, mut rx, sent) = make_app(Some("Hello **there**"));

    app.update(Action::Key(KeyAction::Tab));
    type_text(&mut app, "  who are you? ");
    app.update(Action::Key(KeyAction::Select));

    {
        let widget = app.widget.as_ref().unwrap();
        assert!(!widget.state().is_input_enabled);
        assert!(widget.host().input.is_empty());
        assert!(widget.host().typing);
        assert_eq!(widget.host().transcript.len(), 1);
        assert_eq!(widget.host().transcript[0].text, "who are you?");
    }

    let action = rx.recv().await.unwrap();
    assert!(matches!(action, Action::ChatReply(Ok(_))));
    app.update(action);

    let widget = app.widget.as_ref().unwrap();
    assert_eq!(sent.lock().unwrap().as_slice(), &["who are you?"]);
    assert!(widget.state().is_input_enabled);
    assert!(!widget.host().typing);
    let reply = &widget.host().transcript[1];
    assert_eq!(reply.sender, Sender::Bot);
    assert_eq!(reply.text, "Hello <strong>there</strong>");
}

#[tokio::test]
async fn server_error_shows_fallback() {
    let (mut app, mut rx, _) = make_app(None);

    app.update(Action::Key(KeyAction::Tab));
    type_text(&mut app, "hi");
    app.update(Action::Key(KeyAction::Select));

    let action = rx.recv().await.unwrap();
    app.update(action);

    let widget = app.widget.as_ref().unwrap();
    let reply = &widget.host().transcript[1];
    assert!(reply.is_error);
    assert!(reply.text.contains("http://stub/api/chat"));
    assert!(widget.state().is_input_enabled);
}

#[test]
fn blank_enter_sends_nothing() {
    let (mut app, mut rx, _) = make_app(Some("hi"));

    app.update(Action::Key(KeyAction::Tab));
    type_text(&mut app, "   ");
    app.update(Action::Key(KeyAction::Select));

    let widget = app.widget.as_ref().unwrap();
    assert!(widget.host().transcript.is_empty());
    assert!(widget.state().is_input_enabled);
    assert!(rx.try_recv().is_err());
}
