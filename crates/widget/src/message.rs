use relay_client::AssistantReply;

/// Local sequence number of one dispatch. Never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestSeq(pub u64);

impl RequestSeq {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chat speaker role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
}

/// Validated user input: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    text: String,
}

impl OutgoingMessage {
    /// Returns `None` when the input trims to nothing.
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            text: text.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// One message as it is rendered into the chat log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatMessage {
    User(OutgoingMessage),
    Assistant(AssistantReply),
}

impl ChatMessage {
    pub fn role(&self) -> Role {
        match self {
            Self::User(_) => Role::User,
            Self::Assistant(_) => Role::Assistant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_input_is_rejected() {
        for raw in ["", " ", "\n\t ", "\u{3000}"] {
            assert_eq!(OutgoingMessage::parse(raw), None, "input {raw:?}");
        }
    }

    #[test]
    fn input_is_trimmed() {
        let message = OutgoingMessage::parse("  hello there \n").expect("valid input");

        assert_eq!(message.text(), "hello there");
        assert_eq!(ChatMessage::User(message).role(), Role::User);
    }
}
