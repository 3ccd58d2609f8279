//! Telegram message handler registered in the teloxide Dispatcher.

use std::sync::Arc;

use teloxide::prelude::*;

use cleanlinks_scrub::Scrubber;
use cleanlinks_settings::ChatSettings;

use crate::commands;
use crate::convert::to_incoming;
use crate::send::TelegramOutbound;

/// The bot's own account, fetched once at startup.
#[derive(Debug, Clone)]
pub struct BotIdentity {
    pub username: String,
}

/// Runs for every incoming `Message`:
/// 1. Command interception (any chat type)
/// 2. Group/supergroup guard
/// 3. Scrub pipeline
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    scrubber: Arc<Scrubber>,
    settings: Arc<ChatSettings>,
    me: BotIdentity,
) -> ResponseResult<()> {
    // 1. Commands.
    if let Some(command) = msg
        .text()
        .and_then(|text| commands::parse_command(text, &me.username))
    {
        commands::execute(&bot, &msg, command, &settings).await;
        return Ok(());
    }

    // 2. Only group chats are scrubbed.
    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        return Ok(());
    }

    // 3. Pipeline. Failures are logged inside; nothing propagates.
    let incoming = to_incoming(&msg);
    let out = TelegramOutbound::new(bot);
    scrubber.process(&incoming, &out).await;

    Ok(())
}
