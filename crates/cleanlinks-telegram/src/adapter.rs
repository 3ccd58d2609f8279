//! Telegram channel adapter.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling event loop
//! until the process exits.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::info;

use cleanlinks_scrub::Scrubber;
use cleanlinks_settings::ChatSettings;

use crate::error::TelegramError;
use crate::handler::{handle_message, BotIdentity};

/// Telegram channel adapter. Long polling, so no public URL is required.
pub struct TelegramAdapter {
    token: String,
    scrubber: Arc<Scrubber>,
    settings: Arc<ChatSettings>,
}

impl TelegramAdapter {
    /// `token` must already be validated (see `BotConfig::require_token`).
    pub fn new(token: &str, scrubber: Arc<Scrubber>, settings: Arc<ChatSettings>) -> Self {
        Self {
            token: token.to_string(),
            scrubber,
            settings,
        }
    }

    /// Connect to Telegram and drive the long-polling loop.
    ///
    /// Returns early only if the bot cannot identify itself; otherwise runs
    /// until Ctrl-C.
    pub async fn run(self) -> Result<(), TelegramError> {
        let bot = Bot::new(&self.token);

        let me = bot.get_me().await?;
        let username = me
            .user
            .username
            .clone()
            .ok_or(TelegramError::NoUsername { id: me.user.id.0 })?;
        info!(bot = %username, "Telegram: starting long-polling dispatcher");

        let handler = Update::filter_message().endpoint(handle_message);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![
                Arc::clone(&self.scrubber),
                Arc::clone(&self.settings),
                BotIdentity { username }
            ])
            .default_handler(|_upd| async {})
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        info!("Telegram dispatcher stopped");
        Ok(())
    }
}
