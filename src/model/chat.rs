use serde::{Deserialize, Serialize};

/// Display format for message times, e.g. `3:07 PM`.
const TIME_FORMAT: &str = "%-I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. `text` holds the HTML that goes into the bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub timestamp: String,
    #[serde(default)]
    pub is_error: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            timestamp: now_display(),
            is_error: false,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
            timestamp: now_display(),
            is_error: false,
        }
    }

    pub fn bot_error(text: impl Into<String>) -> Self {
        Self {
            is_error: true,
            ..Self::bot(text)
        }
    }
}

fn now_display() -> String {
    chrono::Local::now().format(TIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_sender_and_error_flag() {
        let user = ChatMessage::user("hi");
        assert_eq!(user.sender, Sender::User);
        assert!(!user.is_error);

        let err = ChatMessage::bot_error("oops");
        assert_eq!(err.sender, Sender::Bot);
        assert!(err.is_error);
        assert_eq!(err.text, "oops");
    }

    #[test]
    fn timestamp_is_twelve_hour_clock() {
        let msg = ChatMessage::bot("x");
        let (clock, meridiem) = msg.timestamp.split_once(' ').unwrap();
        assert!(meridiem == "AM" || meridiem == "PM");
        let (hour, minute) = clock.split_once(':').unwrap();
        let hour: u32 = hour.parse().unwrap();
        assert!((1..=12).contains(&hour));
        assert_eq!(minute.len(), 2);
    }

    #[test]
    fn sender_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("hey")).unwrap();
        assert!(json.contains(r#""sender":"user""#));
    }
}
