//! Outbound delivery to Telegram.
//!
//! Telegram's message limit is 4096 characters. Longer texts are split on
//! line boundaries; only the first chunk carries the reply reference.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{MessageId as TgMessageId, ReplyParameters};

use cleanlinks_core::error::{CleanLinksError, Result};
use cleanlinks_core::outbound::Outbound;
use cleanlinks_core::types::{ChatId, MessageId};

/// Maximum bytes per message. Bytes are never fewer than characters, so
/// this stays under Telegram's character limit.
const CHUNK_MAX: usize = 4096;

/// Largest char boundary in `s` that is `<= max`.
fn floor_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut at = max;
    while !s.is_char_boundary(at) {
        at -= 1;
    }
    at
}

/// Split `text` into chunks of at most `CHUNK_MAX` bytes.
///
/// Prefers newline boundaries, then spaces, then a hard split on a char
/// boundary for a single overlong word.
pub fn split_chunks(text: &str) -> Vec<String> {
    if text.len() <= CHUNK_MAX {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut remaining = text;
    while remaining.len() > CHUNK_MAX {
        let limit = floor_boundary(remaining, CHUNK_MAX);
        let head = &remaining[..limit];
        let split_at = head
            .rfind('\n')
            .or_else(|| head.rfind(' '))
            .filter(|&at| at > 0)
            .unwrap_or(limit);
        chunks.push(remaining[..split_at].to_string());
        remaining = remaining[split_at..].trim_start_matches(&['\n', ' '][..]);
    }
    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }
    chunks
}

fn delivery_error(op: &'static str, e: teloxide::RequestError) -> CleanLinksError {
    CleanLinksError::Delivery {
        op,
        reason: e.to_string(),
    }
}

/// [`Outbound`] over a teloxide `Bot`.
#[derive(Clone)]
pub struct TelegramOutbound {
    bot: Bot,
}

impl TelegramOutbound {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Outbound for TelegramOutbound {
    async fn send_text(&self, chat: ChatId, text: &str, reply_to: Option<MessageId>) -> Result<()> {
        let chat_id = teloxide::types::ChatId(chat.0);
        for (i, chunk) in split_chunks(text).into_iter().enumerate() {
            let mut request = self.bot.send_message(chat_id, chunk);
            if let (0, Some(reply_to)) = (i, reply_to) {
                request = request.reply_parameters(ReplyParameters::new(TgMessageId(reply_to.0)));
            }
            request.await.map_err(|e| delivery_error("send_message", e))?;
        }
        Ok(())
    }

    async fn delete_message(&self, chat: ChatId, message: MessageId) -> Result<()> {
        self.bot
            .delete_message(teloxide::types::ChatId(chat.0), TgMessageId(message.0))
            .await
            .map_err(|e| delivery_error("delete_message", e))?;
        Ok(())
    }
}
