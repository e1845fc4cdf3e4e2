use std::sync::Arc;

use hanzi_core::ViewController;
use hanzi_core::language::LanguageProcessor;
use hanzi_core::renderer::RendererFactory;
use hanzi_core::state::AppState;
use hanzi_lookup::CharacterSource;
use hanzi_types::{AppEvent, UiEvent};
use kanal::{AsyncReceiver, AsyncSender};

use crate::status::LookupStatus;

pub mod playback;
pub mod search;

use playback::handle_playback;
use search::{SettledLookup, handle_search, handle_settled};

/// What the loop does after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Stop once no lookup is in flight
    Drain,
    Stop,
}

/// App's main loop. Sole owner of the view controller.
///
/// Sends `Close` to the UI when it stops.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    source: Arc<dyn CharacterSource>,
    processor: Arc<dyn LanguageProcessor>,
    renderers: Arc<dyn RendererFactory>,
) -> anyhow::Result<()> {
    let language = processor.language_code().to_string();
    let mut view = {
        let config = state.config.read().await;
        ViewController::new(processor, renderers, &config)
    };
    let mut status = LookupStatus::default();
    let (settled_tx, settled_rx) = kanal::unbounded_async::<SettledLookup>();

    let metadata = source.metadata();
    tracing::info!(
        %language,
        provider = %metadata.name,
        model = %metadata.model,
        "[EVENT_LOOP] Starting main loop"
    );
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    // Initial load of the default character
    if view.session().active_character().is_some() {
        handle_search(&mut view, "", &source, &settled_tx, &mut status);
    }
    publish(&view, &app_to_ui_tx).await?;

    let mut draining = false;
    loop {
        tokio::select! {
            event = ui_to_app_rx.recv(), if !draining => {
                let event = event?;
                tracing::debug!(
                    "[EVENT_LOOP] EVENT RECEIVED: {:?}",
                    std::mem::discriminant(&event)
                );
                match handle_events(&mut view, &source, &settled_tx, &mut status, event) {
                    Flow::Continue => {}
                    Flow::Drain => draining = true,
                    Flow::Stop => break,
                }
            }
            settled = settled_rx.recv() => {
                handle_settled(&mut view, settled?, &mut status);
            }
        }

        publish(&view, &app_to_ui_tx).await?;

        if draining && !view.session().is_loading() {
            break;
        }
    }

    tracing::info!(
        dispatched = status.dispatched,
        succeeded = status.succeeded,
        failed = status.failed,
        discarded = status.discarded,
        outstanding = status.outstanding(),
        "[EVENT_LOOP] Stopped"
    );

    if let Err(e) = app_to_ui_tx.send(AppEvent::UiEvent(UiEvent::Close)).await {
        tracing::debug!("UI already gone: {}", e);
    }

    Ok(())
}

fn handle_events(
    view: &mut ViewController,
    source: &Arc<dyn CharacterSource>,
    settled_tx: &AsyncSender<SettledLookup>,
    status: &mut LookupStatus,
    event: AppEvent,
) -> Flow {
    match event {
        AppEvent::UiEvent(UiEvent::SearchText(text)) => {
            handle_search(view, &text, source, settled_tx, status);
        }
        AppEvent::UiEvent(UiEvent::Playback(command)) => {
            handle_playback(view, command);
        }
        AppEvent::UiEvent(UiEvent::Resize { width, height }) => {
            tracing::debug!("Resize to {}x{}", width, height);
            view.resize(width, height);
        }
        AppEvent::UiEvent(UiEvent::InputClosed) => {
            tracing::info!("Input closed");
            return if view.session().is_loading() {
                Flow::Drain
            } else {
                Flow::Stop
            };
        }
        AppEvent::UiEvent(UiEvent::Close) => {
            tracing::info!("Close requested");
            return Flow::Stop;
        }
        AppEvent::SessionUpdated(_) | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
        }
    }

    Flow::Continue
}

async fn publish(view: &ViewController, app_to_ui_tx: &AsyncSender<AppEvent>) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::SessionUpdated(view.snapshot()))
        .await?;
    Ok(())
}
