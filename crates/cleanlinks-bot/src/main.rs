use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cleanlinks_core::config::BotConfig;
use cleanlinks_scrub::{IntroPicker, Scrubber};
use cleanlinks_settings::ChatSettings;
use cleanlinks_telegram::TelegramAdapter;

/// Cleans tracking parameters from YouTube and Twitter/X links posted in
/// Telegram groups.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML config file. Defaults to $CLEANLINKS_CONFIG, then ./cleanlinks.toml.
    #[arg(long, env = "CLEANLINKS_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Config comes first so its log filter can seed the subscriber.
    let config = BotConfig::load(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .init();

    let token = config.require_token()?;

    let settings = Arc::new(ChatSettings::load(&config.settings_path));
    let scrubber = Arc::new(Scrubber::new(
        settings.clone(),
        IntroPicker::new(),
        config.dedup_capacity,
    ));

    info!(
        version = env!("CARGO_PKG_VERSION"),
        settings = %settings.path().display(),
        dedup_capacity = config.dedup_capacity,
        "cleanlinks bot starting"
    );

    TelegramAdapter::new(token, scrubber, settings).run().await?;
    Ok(())
}
