use std::sync::Arc;
use std::time::Duration;

use hanzi_config::Config;
use hanzi_config::renderer::RendererConfig;
use hanzi_lookup::LookupError;
use hanzi_types::{CharacterRecord, PlaybackCommand, SessionView};
use tokio_util::sync::CancellationToken;

use crate::language::LanguageProcessor;
use crate::playback::run_loop;
use crate::renderer::{RendererFactory, StrokeRenderer};
use crate::session::{PendingLookup, Phase, SessionState, Settlement};

/// Owns the session state and the renderer attached to the active character.
///
/// Lookups are split in two steps so the caller can run the fetch elsewhere:
/// [`ViewController::submit_search`] hands out a [`PendingLookup`] and
/// [`ViewController::settle`] applies its outcome. Only the latest lookup
/// can settle; older outcomes are discarded.
pub struct ViewController {
    processor: Arc<dyn LanguageProcessor>,
    renderers: Arc<dyn RendererFactory>,
    options: RendererConfig,
    loop_interval: Duration,
    session: SessionState,
    renderer: Option<Arc<dyn StrokeRenderer>>,
    loop_token: Option<CancellationToken>,
}

impl ViewController {
    pub fn new(
        processor: Arc<dyn LanguageProcessor>,
        renderers: Arc<dyn RendererFactory>,
        config: &Config,
    ) -> Self {
        Self {
            processor,
            renderers,
            options: config.renderer.clone(),
            loop_interval: Duration::from_millis(config.ui.loop_interval_ms),
            session: SessionState::new(config.ui.default_character),
            renderer: None,
            loop_token: None,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn snapshot(&self) -> SessionView {
        self.session.snapshot()
    }

    pub fn renderer(&self) -> Option<&Arc<dyn StrokeRenderer>> {
        self.renderer.as_ref()
    }

    pub fn is_looping(&self) -> bool {
        self.loop_token
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    /// Validate the input and start a lookup.
    ///
    /// Uses the first glyph of the input, or the active character when the
    /// input is blank. Rejected input moves the session to `Failed` and
    /// returns the validation error without any lookup being issued.
    pub fn submit_search(&mut self, raw: &str) -> Result<PendingLookup, LookupError> {
        let glyph = self
            .processor
            .first_glyph(raw)
            .or(self.session.active_character());

        let character = match glyph {
            Some(c) if self.processor.accepts(c) => c,
            other => {
                let err =
                    LookupError::InvalidCharacter(other.map(String::from).unwrap_or_default());
                tracing::debug!("Rejected search input {:?}: {}", raw, err);
                self.session.reject(err.user_message());
                return Err(err);
            }
        };

        let changed = self.session.active_character() != Some(character);
        let pending = self.session.begin(character);
        tracing::debug!(
            %character,
            generation = pending.generation(),
            "lookup dispatched"
        );

        if changed || self.renderer.is_none() {
            self.attach_renderer(character);
        }

        Ok(pending)
    }

    /// Apply the outcome of a lookup issued by [`ViewController::submit_search`]
    pub fn settle(
        &mut self,
        pending: PendingLookup,
        result: Result<CharacterRecord, LookupError>,
    ) -> Settlement {
        if !self.session.is_current(pending) {
            tracing::debug!(
                character = %pending.character(),
                generation = pending.generation(),
                "discarding stale lookup result"
            );
            return Settlement::Discarded;
        }

        let result = result.and_then(|record| {
            if record.character() == pending.character() {
                Ok(record)
            } else {
                Err(LookupError::SchemaError(format!(
                    "requested {:?}, service answered for {:?}",
                    pending.character(),
                    record.character()
                )))
            }
        });

        match &result {
            Ok(record) => tracing::info!(
                character = %record.character(),
                strokes = record.stroke_count(),
                "character data loaded"
            ),
            Err(err) => tracing::warn!(
                character = %pending.character(),
                kind = ?err.kind(),
                "lookup failed: {}",
                err
            ),
        }

        self.session.settle(pending, result)
    }

    pub fn handle_playback(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::Animate => self.animate(),
            PlaybackCommand::Loop => self.start_loop(),
            PlaybackCommand::Quiz => self.quiz(),
            PlaybackCommand::Reset => self.stop(),
        }
    }

    /// Play the stroke animation once
    pub fn animate(&mut self) {
        let Some(renderer) = self.renderer.clone() else {
            tracing::debug!("animate ignored, no renderer attached");
            return;
        };
        self.cancel_loop();
        renderer.cancel();
        tokio::spawn(async move { renderer.animate_once().await });
    }

    /// Play the stroke animation repeatedly until another trigger or a new character
    pub fn start_loop(&mut self) {
        let Some(renderer) = self.renderer.clone() else {
            tracing::debug!("loop ignored, no renderer attached");
            return;
        };
        self.cancel_loop();
        renderer.cancel();

        let token = CancellationToken::new();
        self.loop_token = Some(token.clone());
        tokio::spawn(run_loop(renderer, self.loop_interval, token));
    }

    /// Start the tracing quiz
    pub fn quiz(&mut self) {
        let Some(renderer) = self.renderer.clone() else {
            tracing::debug!("quiz ignored, no renderer attached");
            return;
        };
        self.cancel_loop();
        renderer.start_quiz();
    }

    /// Reset: stop looping, cancel quiz or animation and hide the character
    pub fn stop(&mut self) {
        self.cancel_loop();
        if let Some(renderer) = &self.renderer {
            renderer.cancel();
            renderer.hide();
        }
    }

    /// Change the render size; the renderer is rebuilt for the new size
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.options.width == width && self.options.height == height {
            return;
        }
        self.options.width = width;
        self.options.height = height;

        if let Some(character) = self.session.active_character() {
            self.attach_renderer(character);
        }
    }

    fn attach_renderer(&mut self, character: char) {
        self.cancel_loop();
        if let Some(previous) = self.renderer.take() {
            previous.cancel();
        }

        match self.renderers.create(character, &self.options) {
            Ok(renderer) => {
                tracing::debug!(%character, "renderer attached");
                self.renderer = Some(renderer);
                self.session.set_render_notice(None);
            }
            Err(err) => {
                tracing::warn!(%character, "renderer unavailable: {}", err);
                self.session
                    .set_render_notice(Some(format!("Stroke diagram unavailable for {character}.")));
            }
        }
    }

    fn cancel_loop(&mut self) {
        if let Some(token) = self.loop_token.take() {
            token.cancel();
        }
    }
}

impl Drop for ViewController {
    fn drop(&mut self) {
        self.cancel_loop();
    }
}
