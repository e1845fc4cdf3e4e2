use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use hanzi_config::lookup::API_KEY_VARS;
use hanzi_core::state::AppState;
use hanzi_lang_chinese::{ChineseProcessor, GeminiCharacterClient};
use hanzi_lookup::CharacterSource;
use tokio::signal;
use tokio::time::timeout;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod io;
pub mod profile;
pub mod renderer;
pub mod status;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::{AppController, AppTasks};
use self::renderer::LogRendererFactory;

const UI_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Look up Chinese characters and practice their stroke order
#[derive(Parser, Debug)]
#[command(name = "hanzi", version)]
struct Args {
    /// Profile to load from the user config directory
    #[arg(long, default_value = "main")]
    profile: String,

    /// Create the profile from the main profile if it does not exist yet
    #[arg(long)]
    create_profile: bool,

    /// Character shown on startup instead of the profile default
    #[arg(long)]
    character: Option<char>,

    /// Gemini model to query
    #[arg(long)]
    model: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; the key may come from the real environment
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let root = profile::config_root()?;
    profile::init_user_config(&root)?;
    if args.create_profile {
        profile::add_profile_from_default(&root, &args.profile)?;
    }

    let mut config = profile::load_user_profile(&root, &args.profile)?;
    config.load_api_key();
    if let Some(character) = args.character {
        config.ui.default_character = Some(character);
    }
    if let Some(model) = args.model {
        config.lookup.model = model;
    }

    let source = Arc::new(GeminiCharacterClient::new(&config.lookup)?);
    if source.metadata().requires_api_key && !config.lookup.has_api_key() {
        tracing::warn!(
            "No API key in {:?}; every lookup will fail until one is set",
            API_KEY_VARS
        );
    }

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);

    let AppTasks {
        mut event_loop,
        mut ui,
        mut watchers,
    } = controller.spawn_tasks(
        source,
        Arc::new(ChineseProcessor::new()),
        Arc::new(LogRendererFactory),
    );

    let finished = tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
            false
        }
        result = &mut event_loop => {
            match result {
                Ok(Ok(())) => tracing::info!("event loop finished, shutting down"),
                Ok(Err(e)) => tracing::error!("event loop exited: {e}"),
                Err(e) => tracing::error!("event loop panicked: {e}"),
            }
            true
        }
    };

    controller.shutdown();
    watchers.shutdown().await;

    // The event loop closes the UI once the last snapshot is queued
    if finished && timeout(UI_DRAIN_TIMEOUT, &mut ui).await.is_err() {
        tracing::warn!("UI did not finish in time");
    }
    ui.abort();
    event_loop.abort();

    Ok(())
}
