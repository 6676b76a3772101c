//! Message parser - Turns raw console lines into chat messages

use crate::domain::entities::{ChatMessage, User};

/// Parses console input of the form `<sender> text` or plain `text`
pub struct MessageParser {
    channel: String,
    default_sender: String,
}

impl MessageParser {
    pub fn new(channel: impl Into<String>, default_sender: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            default_sender: default_sender.into(),
        }
    }

    pub fn parse(&self, line: &str) -> ChatMessage {
        let line = line.trim_end_matches(['\r', '\n']);

        let (sender, content) = match Self::split_sender(line) {
            Some((sender, content)) => (sender, content),
            None => (self.default_sender.as_str(), line),
        };

        ChatMessage::new(&self.channel, User::new(sender.to_lowercase()).with_display_name(sender), content)
    }

    /// `<name> rest` with a non-empty name that has no whitespace
    fn split_sender(line: &str) -> Option<(&str, &str)> {
        let rest = line.strip_prefix('<')?;
        let (name, content) = rest.split_once('>')?;
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return None;
        }
        Some((name, content.strip_prefix(' ').unwrap_or(content)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_uses_default_sender() {
        let parser = MessageParser::new("console", "you");
        let msg = parser.parse("hello there\n");
        assert_eq!(msg.sender.login, "you");
        assert_eq!(msg.content, "hello there");
        assert_eq!(msg.channel, "console");
    }

    #[test]
    fn test_sender_tag() {
        let parser = MessageParser::new("console", "you");
        let msg = parser.parse("<Viewer42> !hi");
        assert_eq!(msg.sender.login, "viewer42");
        assert_eq!(msg.sender.name(), "Viewer42");
        assert_eq!(msg.content, "!hi");
    }

    #[test]
    fn test_malformed_tag_is_content() {
        let parser = MessageParser::new("console", "you");
        assert_eq!(parser.parse("<not a name> hi").content, "<not a name> hi");
        assert_eq!(parser.parse("<> hi").content, "<> hi");
        assert_eq!(parser.parse("a < b").content, "a < b");
    }
}
