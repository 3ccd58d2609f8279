use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "cleanlinks.toml";
pub const DEFAULT_SETTINGS_PATH: &str = "config.json";
pub const DEFAULT_DEDUP_CAPACITY: usize = 10;
pub const DEFAULT_LOG_FILTER: &str = "warn,cleanlinks=info";

/// Legacy env var the bot token has always been read from.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Process configuration (cleanlinks.toml + CLEANLINKS_* env overrides).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Telegram bot token. Required; `main` refuses to start without it.
    #[serde(default)]
    pub bot_token: Option<String>,
    /// JSON file holding per-chat settings.
    /// Override with env var: CLEANLINKS_SETTINGS_PATH
    #[serde(default = "default_settings_path")]
    pub settings_path: String,
    /// How many recent message ids the dedup gate remembers.
    #[serde(default = "default_dedup_capacity")]
    pub dedup_capacity: usize,
    /// `tracing` filter used when RUST_LOG is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            settings_path: default_settings_path(),
            dedup_capacity: default_dedup_capacity(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_settings_path() -> String {
    DEFAULT_SETTINGS_PATH.to_string()
}
fn default_dedup_capacity() -> usize {
    DEFAULT_DEDUP_CAPACITY
}
fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl BotConfig {
    /// Load config from an optional TOML file with env var overrides.
    ///
    /// Precedence, lowest first:
    ///   1. built-in defaults
    ///   2. TOML file (explicit path, else ./cleanlinks.toml; missing is fine)
    ///   3. CLEANLINKS_* (e.g. CLEANLINKS_SETTINGS_PATH, CLEANLINKS_BOT_TOKEN)
    ///   4. TELEGRAM_BOT_TOKEN
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        let config: BotConfig = Figment::new()
            .merge(Serialized::defaults(BotConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("CLEANLINKS_"))
            .merge(Env::raw().only(&[TOKEN_ENV]).map(|_| "bot_token".into()))
            .extract()
            .map_err(|e| crate::error::CleanLinksError::Config(e.to_string()))?;

        if config.dedup_capacity == 0 {
            return Err(crate::error::CleanLinksError::Config(
                "dedup_capacity must be at least 1".to_string(),
            ));
        }

        Ok(config)
    }

    /// The bot token, or a config error when it is absent or blank.
    pub fn require_token(&self) -> crate::error::Result<&str> {
        match self.bot_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(crate::error::CleanLinksError::Config(format!(
                "no bot token configured (set {TOKEN_ENV})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config = BotConfig::load(None).expect("defaults load");
            assert_eq!(config.settings_path, DEFAULT_SETTINGS_PATH);
            assert_eq!(config.dedup_capacity, 10);
            assert!(config.bot_token.is_none());
            Ok(())
        });
    }

    #[test]
    fn legacy_token_env_is_honoured() {
        Jail::expect_with(|jail| {
            jail.set_env("TELEGRAM_BOT_TOKEN", "123:abc");
            let config = BotConfig::load(None).expect("load");
            assert_eq!(config.require_token().expect("token"), "123:abc");
            Ok(())
        });
    }

    #[test]
    fn legacy_token_env_wins_over_prefixed() {
        Jail::expect_with(|jail| {
            jail.set_env("TELEGRAM_BOT_TOKEN", "legacy");
            jail.set_env("CLEANLINKS_BOT_TOKEN", "prefixed");
            let config = BotConfig::load(None).expect("load");
            assert_eq!(config.require_token().expect("token"), "legacy");
            Ok(())
        });
    }

    #[test]
    fn prefixed_token_used_when_legacy_unset() {
        Jail::expect_with(|jail| {
            jail.set_env("CLEANLINKS_BOT_TOKEN", "prefixed");
            let config = BotConfig::load(None).expect("load");
            assert_eq!(config.require_token().expect("token"), "prefixed");
            Ok(())
        });
    }

    #[test]
    fn toml_file_and_prefixed_env_override_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "bot.toml",
                r#"
                    bot_token = "from-file"
                    settings_path = "/var/lib/cleanlinks/settings.json"
                    dedup_capacity = 32
                "#,
            )?;
            jail.set_env("CLEANLINKS_SETTINGS_PATH", "/tmp/override.json");
            let config = BotConfig::load(Some("bot.toml")).expect("load");
            assert_eq!(config.require_token().expect("token"), "from-file");
            assert_eq!(config.settings_path, "/tmp/override.json");
            assert_eq!(config.dedup_capacity, 32);
            Ok(())
        });
    }

    #[test]
    fn blank_token_is_rejected() {
        let config = BotConfig {
            bot_token: Some("   ".to_string()),
            ..BotConfig::default()
        };
        assert!(matches!(
            config.require_token(),
            Err(crate::error::CleanLinksError::Config(_))
        ));
    }

    #[test]
    fn zero_dedup_capacity_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.set_env("CLEANLINKS_DEDUP_CAPACITY", "0");
            assert!(BotConfig::load(None).is_err());
            Ok(())
        });
    }
}
