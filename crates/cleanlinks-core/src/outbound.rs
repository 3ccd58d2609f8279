//! Seams between the scrub pipeline and the outside world.
//!
//! The pipeline never talks to a chat platform directly. It receives an
//! `Outbound` for the two side effects it performs and a `ChatModes` for the
//! one piece of per-chat state it reads.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatId, MessageId};

/// Outbound operations against the host messaging platform.
#[async_trait]
pub trait Outbound: Send + Sync {
    /// Post `text` to `chat`, optionally as a reply to `reply_to`.
    async fn send_text(&self, chat: ChatId, text: &str, reply_to: Option<MessageId>) -> Result<()>;

    /// Delete `message` from `chat`.
    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<()>;
}

/// Read-only view of per-chat behaviour flags.
pub trait ChatModes: Send + Sync {
    /// Whether the original message should be deleted and the cleaned text
    /// posted standalone instead of as a reply. Defaults to `false`.
    fn delete_original(&self, chat: ChatId) -> bool;
}
