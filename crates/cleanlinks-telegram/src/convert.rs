//! Conversion from teloxide messages to the platform-neutral core type.
//!
//! Telegram reports entity offsets in UTF-16 code units; `parse_entities`
//! resolves them to byte ranges, which is what the scrubber works with.

use teloxide::types::{Message, MessageEntityKind, MessageEntityRef, User};

use cleanlinks_core::types::{Author, ChatId, EntityKind, IncomingMessage, MessageEntity, MessageId};

/// Build an [`IncomingMessage`] from text (or caption) and its entities.
pub fn to_incoming(msg: &Message) -> IncomingMessage {
    let (text, entities) = match msg.text() {
        Some(text) => (Some(text), msg.parse_entities()),
        None => (msg.caption(), msg.parse_caption_entities()),
    };

    IncomingMessage {
        chat: ChatId(msg.chat.id.0),
        id: MessageId(msg.id.0),
        author: msg.from.as_ref().map(to_author),
        text: text.map(str::to_string),
        entities: entities
            .unwrap_or_default()
            .iter()
            .map(to_entity)
            .collect(),
    }
}

fn to_author(user: &User) -> Author {
    Author {
        username: user.username.clone(),
        full_name: user.full_name(),
        is_bot: user.is_bot,
    }
}

fn to_entity(entity: &MessageEntityRef<'_>) -> MessageEntity {
    let kind = match entity.kind() {
        MessageEntityKind::Url => EntityKind::Url,
        MessageEntityKind::TextLink { url } => EntityKind::TextLink {
            url: url.to_string(),
        },
        _ => EntityKind::Other,
    };
    let range = entity.range();
    MessageEntity {
        kind,
        offset: range.start,
        length: range.len(),
    }
}
