use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use super::{ChatApi, ChatReply, ChatRequest};
use crate::error::ChatError;

pub struct HttpChatApi {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpChatApi {
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Result<Self, ChatError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ChatError::ClientBuild(e.to_string()))?;
        Ok(Self { endpoint, client })
    }
}

#[derive(Deserialize)]
struct ReplyBody {
    reply: Option<String>,
    source: Option<String>,
}

/// Interpret a 2xx response body.
pub fn parse_reply(body: &str) -> Result<ChatReply, ChatError> {
    let parsed: ReplyBody =
        serde_json::from_str(body).map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

    match parsed.reply {
        Some(reply) if !reply.is_empty() => Ok(ChatReply {
            reply,
            source: parsed.source,
        }),
        _ => Err(ChatError::MissingReply),
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, message: &str) -> Result<ChatReply, ChatError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        parse_reply(&body)
    }
}
