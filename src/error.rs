/// Errors produced by the chat widget and its API client.
///
/// Payloads are plain strings so the error can travel through the action
/// channel alongside other `Clone` actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The host does not provide an element the widget cannot work without.
    #[error("chat widget element not found: {0}")]
    MissingElement(&'static str),

    /// The request never produced an HTTP response (DNS, TLS, refused, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// The endpoint answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// The response body was not the expected JSON object.
    #[error("response parse failed: {0}")]
    MalformedResponse(String),

    /// The response parsed but carried no usable `reply`.
    #[error("response has no reply")]
    MissingReply,

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}
