pub mod http;

use async_trait::async_trait;
use serde::Serialize;

use crate::config::ChatConfig;
use crate::error::ChatError;

/// Request body posted to the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// A successful reply. `reply` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: String,
    pub source: Option<String>,
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// The URL requests are posted to.
    fn endpoint(&self) -> &str;
    async fn send(&self, message: &str) -> Result<ChatReply, ChatError>;
}

pub fn create_api(config: &ChatConfig) -> Result<Box<dyn ChatApi>, ChatError> {
    let api = http::HttpChatApi::new(config.endpoint.clone(), config.request_timeout())?;
    Ok(Box::new(api))
}
