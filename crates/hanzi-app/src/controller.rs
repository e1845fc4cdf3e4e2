use std::sync::Arc;

use hanzi_core::language::LanguageProcessor;
use hanzi_core::renderer::RendererFactory;
use hanzi_core::state::AppState;
use hanzi_lookup::CharacterSource;
use hanzi_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::{JoinHandle, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64), // session snapshots
            ui_to_app: kanal::bounded_async(64), // user commands
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Handles of the running tasks.
///
/// The event loop decides when the app is done; the UI finishes after it
/// and the input watchers are simply stopped.
pub struct AppTasks {
    pub event_loop: JoinHandle<anyhow::Result<()>>,
    pub ui: JoinHandle<anyhow::Result<()>>,
    pub watchers: JoinSet<anyhow::Result<()>>,
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        source: Arc<dyn CharacterSource>,
        processor: Arc<dyn LanguageProcessor>,
        renderers: Arc<dyn RendererFactory>,
    ) -> AppTasks {
        // Event loop
        let event_loop = tokio::spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            source,
            processor,
            renderers,
        ));

        // UI loop
        let ui = tokio::spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.state.config.clone(),
        ));

        // Stdin watcher
        let mut watchers = JoinSet::new();
        watchers.spawn(watcher_io(
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
        ));

        AppTasks {
            event_loop,
            ui,
            watchers,
        }
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
