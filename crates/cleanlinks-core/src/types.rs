use serde::{Deserialize, Serialize};
use std::fmt;

/// Platform chat identifier (Telegram chat ids are signed; groups are negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform message identifier. Only unique within its chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i32);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a delivered message, as seen by the dedup gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageKey {
    pub chat: ChatId,
    pub message: MessageId,
}

impl MessageKey {
    pub fn new(chat: ChatId, message: MessageId) -> Self {
        Self { chat, message }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.chat, self.message)
    }
}

/// Sender of an inbound message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    /// Public handle without the leading `@`.
    pub username: Option<String>,
    /// First and last name joined by a space. May be empty.
    pub full_name: String,
    pub is_bot: bool,
}

/// What a rich-text annotation marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityKind {
    /// The annotated body text is itself the URL.
    Url,
    /// The annotated body text is a label; the target travels out of band.
    TextLink { url: String },
    /// Any annotation the scrubber does not care about (bold, mention, ...).
    Other,
}

/// A rich-text annotation over the message body.
///
/// `offset` and `length` are UTF-8 byte positions into the text. Adapters
/// convert from the platform's native unit before building one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntity {
    pub kind: EntityKind,
    pub offset: usize,
    pub length: usize,
}

impl MessageEntity {
    pub fn url(offset: usize, length: usize) -> Self {
        Self {
            kind: EntityKind::Url,
            offset,
            length,
        }
    }

    pub fn text_link(offset: usize, length: usize, url: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::TextLink { url: url.into() },
            offset,
            length,
        }
    }

    /// Byte range of the annotated body text.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.length
    }
}

/// Platform-neutral view of an inbound group message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat: ChatId,
    pub id: MessageId,
    pub author: Option<Author>,
    /// Message text, or the media caption when there is no text.
    pub text: Option<String>,
    /// Entities belonging to whichever of text/caption was chosen.
    pub entities: Vec<MessageEntity>,
}

impl IncomingMessage {
    pub fn key(&self) -> MessageKey {
        MessageKey::new(self.chat, self.id)
    }
}
