/// Text shown while a reply is pending.
pub const PLACEHOLDER_TEXT: &str = "Thinking...";

/// Bot message shown when the reply service could not be reached.
pub const FALLBACK_TEXT: &str = "Oops! Something went wrong.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
    Placeholder,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You:",
            Sender::Bot | Sender::Placeholder => "Bot:",
        }
    }
}

/// A single transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }

    pub fn placeholder() -> Self {
        Self {
            sender: Sender::Placeholder,
            text: PLACEHOLDER_TEXT.to_string(),
        }
    }

    pub fn fallback() -> Self {
        Self::bot(FALLBACK_TEXT)
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_placeholder(&self) -> bool {
        self.sender == Sender::Placeholder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bot_reply_matching_placeholder_text_is_not_a_placeholder() {
        let reply = Message::bot(PLACEHOLDER_TEXT);
        assert!(!reply.is_placeholder());
        assert!(Message::placeholder().is_placeholder());
    }

    #[test]
    fn labels_follow_sender() {
        assert_eq!(Message::user("hi").sender().label(), "You:");
        assert_eq!(Message::fallback().sender().label(), "Bot:");
        assert_eq!(Message::fallback().text(), FALLBACK_TEXT);
    }
}
