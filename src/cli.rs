use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use ratatui::style::Style;

use crate::api::{self, ChatApi};
use crate::config::{self, AppConfig};
use crate::markdown::render_markdown;
use crate::model::chat::{ChatMessage, Sender};
use crate::model::widget::{HostElements, Welcome};
use crate::ui::transcript::html_to_lines;
use crate::widget::{ChatWidget, WidgetHost};

#[derive(Debug, Parser)]
#[command(name = "folio-chat", version, about = "Terminal chat widget for the portfolio assistant")]
pub struct Cli {
    /// Config file [default: ~/.folio-chat/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Chat endpoint, overrides the config file
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one message and print the reply
    Ask {
        /// Print plain text instead of the reply HTML
        #[arg(long)]
        plain: bool,

        #[arg(required = true)]
        message: Vec<String>,
    },
    /// Print the HTML a bot reply renders to
    Render {
        #[arg(required = true)]
        text: Vec<String>,
    },
}

impl Cli {
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = config::load_config(self.config.as_deref())?;
        if let Some(endpoint) = &self.endpoint {
            config.chat.endpoint = endpoint.clone();
        }
        Ok(config)
    }
}

pub async fn handle_ask(config: &AppConfig, words: &[String], plain: bool) -> Result<()> {
    let api = api::create_api(&config.chat)?;
    let reply = ask(config, api.as_ref(), &words.join(" ")).await?;

    if plain {
        for line in html_to_lines(&reply, Style::default()) {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            println!("{text}");
        }
    } else {
        println!("{reply}");
    }
    Ok(())
}

/// Run one send cycle through the widget and return the bot's HTML.
pub async fn ask(config: &AppConfig, api: &dyn ChatApi, message: &str) -> Result<String> {
    let mut widget = ChatWidget::attach(ConsoleHost::default(), &config.chat)?;
    widget.send(message, api).await;

    let Some(reply) = widget.host().last_bot_message() else {
        bail!("Message cannot be empty");
    };
    if reply.is_error {
        bail!("{}", reply.text);
    }
    Ok(reply.text.clone())
}

pub fn handle_render(words: &[String]) {
    println!("{}", render_markdown(&words.join(" ")));
}

/// Headless host: a transcript and nothing else.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    messages: Vec<ChatMessage>,
}

impl ConsoleHost {
    fn last_bot_message(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.sender == Sender::Bot)
    }
}

impl WidgetHost for ConsoleHost {
    fn elements(&self) -> HostElements {
        HostElements {
            close: false,
            send: false,
            typing: false,
            ..HostElements::ALL
        }
    }

    fn set_active(&mut self, _active: bool) {}

    fn message_count(&self) -> usize {
        self.messages.len()
    }

    fn show_welcome(&mut self, _welcome: &Welcome) {}

    fn remove_welcome(&mut self) {}

    fn append_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    fn clear_input(&mut self) {}

    fn set_input_enabled(&mut self, _enabled: bool) {}

    fn set_typing(&mut self, _visible: bool) {}

    fn focus_input(&mut self) {}

    fn scroll_to_bottom(&mut self) {}
}
