/// Errors that stop the Telegram adapter from starting.
///
/// Failures while handling an individual message never surface here; they
/// are logged and the dispatcher moves on.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("teloxide error: {0}")]
    Teloxide(#[from] teloxide::RequestError),

    #[error("bot account {id} has no username; commands cannot be addressed to it")]
    NoUsername { id: u64 },
}
