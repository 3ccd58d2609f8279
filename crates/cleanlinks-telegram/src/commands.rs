//! Bot commands: `/ping`, `/help`, `/delete_original`.
//!
//! Parsing and reply wording are pure functions; [`execute`] performs the
//! Telegram calls (admin check, reply).

use teloxide::prelude::*;
use teloxide::types::{ParseMode, ReplyParameters};
use tracing::{info, warn};

use cleanlinks_core::outbound::ChatModes;
use cleanlinks_core::types::ChatId;
use cleanlinks_settings::ChatSettings;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "🤖 <b>Pomoc Clean Links Bot</b>\n\n\
Ten bot skanuje wiadomości pod kątem linków do YouTube oraz Twitter/X i usuwa z nich zbędne lub śledzące parametry.\n\
Jeśli link da się oczyścić, bot odpowiada w wątku z oczyszczoną wersją oraz zabawnym intro.\n\n\
<b>Komendy:</b>\n\
/ping – Sprawdź czy bot żyje i poznaj jego wersję\n\
/help – Wyświetl tę pomoc\n\
/delete_original on|off – (administratorzy) usuwaj oryginalną wiadomość i publikuj oczyszczoną zamiast odpowiedzi\n\n\
<b>Jak działa bot:</b>\n\
- Działa tylko na czatach grupowych\n\
- Automatycznie odpowiada, jeśli wykryje możliwy do poprawienia link do YouTube lub Twitter/X\n\
- Podaje autora oryginalnej wiadomości\n\
- Używa pamięci podręcznej, by nie odpowiadać dwa razy na ten sam komunikat\n";

pub const TOGGLE_USAGE: &str = "Użycie: /delete_original on|off";
pub const GROUPS_ONLY: &str = "Ta komenda działa tylko w czatach grupowych.";
pub const ADMINS_ONLY: &str = "Tę opcję mogą zmieniać tylko administratorzy czatu.";
pub const SAVE_FAILED: &str = "Nie udało się zapisać ustawienia. Spróbuj ponownie później.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ping,
    Help,
    /// Raw argument, if any.
    DeleteOriginal(Option<String>),
}

/// Parse a command from message text.
///
/// Accepts `/name` and `/name@bot_username`. Commands addressed to a
/// different bot, and unknown commands, yield `None`.
pub fn parse_command(text: &str, bot_username: &str) -> Option<Command> {
    let rest = text.trim().strip_prefix('/')?;
    let (head, args) = match rest.split_once(char::is_whitespace) {
        Some((head, args)) => (head, args.trim()),
        None => (rest, ""),
    };
    let name = match head.split_once('@') {
        Some((name, target)) if target.eq_ignore_ascii_case(bot_username) => name,
        Some(_) => return None,
        None => head,
    };

    match name.to_ascii_lowercase().as_str() {
        "ping" => Some(Command::Ping),
        "help" => Some(Command::Help),
        "delete_original" => Some(Command::DeleteOriginal(
            (!args.is_empty()).then(|| args.to_string()),
        )),
        _ => None,
    }
}

/// Parse a boolean-like toggle token, case-insensitively.
pub fn parse_toggle(token: &str) -> Option<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// What `/delete_original` should do for a given argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleAction {
    /// No argument: report the current state.
    Report,
    Set(bool),
    /// Unrecognised argument.
    Usage,
}

pub fn toggle_action(arg: Option<&str>) -> ToggleAction {
    match arg {
        None => ToggleAction::Report,
        Some(token) => parse_toggle(token).map_or(ToggleAction::Usage, ToggleAction::Set),
    }
}

fn state_word(enabled: bool) -> &'static str {
    if enabled {
        "włączone"
    } else {
        "wyłączone"
    }
}

pub fn ping_reply() -> String {
    format!("pong (Wersja {VERSION})")
}

pub fn report_reply(enabled: bool) -> String {
    format!(
        "Usuwanie oryginalnych wiadomości jest {}.\n{TOGGLE_USAGE}",
        state_word(enabled)
    )
}

pub fn confirm_reply(enabled: bool) -> String {
    let mut reply = format!("Usuwanie oryginalnych wiadomości: {}.", state_word(enabled));
    if enabled {
        reply.push_str(" Bot potrzebuje uprawnienia do usuwania wiadomości.");
    }
    reply
}

/// Run `command` in response to `msg`.
pub async fn execute(bot: &Bot, msg: &Message, command: Command, settings: &ChatSettings) {
    let (reply, parse_mode) = match command {
        Command::Ping => (ping_reply(), None),
        Command::Help => (HELP_TEXT.to_string(), Some(ParseMode::Html)),
        Command::DeleteOriginal(arg) => (delete_original(bot, msg, arg.as_deref(), settings).await, None),
    };

    let mut request = bot
        .send_message(msg.chat.id, reply)
        .reply_parameters(ReplyParameters::new(msg.id));
    if let Some(mode) = parse_mode {
        request = request.parse_mode(mode);
    }
    if let Err(e) = request.await {
        warn!(chat = msg.chat.id.0, error = %e, "failed to answer command");
    }
}

async fn delete_original(bot: &Bot, msg: &Message, arg: Option<&str>, settings: &ChatSettings) -> String {
    if !(msg.chat.is_group() || msg.chat.is_supergroup()) {
        return GROUPS_ONLY.to_string();
    }

    let Some(user) = msg.from.as_ref() else {
        return ADMINS_ONLY.to_string();
    };
    match bot.get_chat_member(msg.chat.id, user.id).await {
        Ok(member) if member.is_privileged() => {}
        Ok(_) => return ADMINS_ONLY.to_string(),
        Err(e) => {
            warn!(chat = msg.chat.id.0, user = user.id.0, error = %e, "admin check failed");
            return ADMINS_ONLY.to_string();
        }
    }

    let chat = ChatId(msg.chat.id.0);
    match toggle_action(arg) {
        ToggleAction::Report => report_reply(settings.delete_original(chat)),
        ToggleAction::Usage => TOGGLE_USAGE.to_string(),
        ToggleAction::Set(enabled) => match settings.set_delete_original(chat, enabled) {
            Ok(()) => {
                info!(%chat, user = user.id.0, enabled, "delete_original toggled");
                confirm_reply(enabled)
            }
            Err(_) => SAVE_FAILED.to_string(),
        },
    }
}
