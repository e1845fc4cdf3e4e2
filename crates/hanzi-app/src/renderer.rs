use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hanzi_config::renderer::RendererConfig;
use hanzi_core::renderer::{RenderError, RendererFactory, StrokeRenderer};
use tokio_util::sync::CancellationToken;

/// Renderer for a headless terminal: it draws nothing and traces each command.
///
/// An animation cycle still takes its nominal time so looping behaves the
/// same as with a graphical diagram.
pub struct LogRenderer {
    character: char,
    cycle: Duration,
    quiz_active: AtomicBool,
    visible: AtomicBool,
    current: Mutex<CancellationToken>,
}

impl LogRenderer {
    pub fn new(character: char, options: &RendererConfig) -> Self {
        Self {
            character,
            cycle: cycle_duration(options),
            quiz_active: AtomicBool::new(false),
            visible: AtomicBool::new(options.show_character),
            current: Mutex::new(CancellationToken::new()),
        }
    }

    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    pub fn is_quiz_active(&self) -> bool {
        self.quiz_active.load(Ordering::SeqCst)
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    fn token(&self) -> CancellationToken {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// One stroke at speed 1.0 plus the pause before the next cycle
fn cycle_duration(options: &RendererConfig) -> Duration {
    let speed = options.stroke_animation_speed.max(0.1);
    Duration::from_secs_f32(1.0 / speed) + Duration::from_millis(options.delay_between_strokes_ms)
}

#[async_trait]
impl StrokeRenderer for LogRenderer {
    fn character(&self) -> char {
        self.character
    }

    async fn animate_once(&self) {
        let token = self.token();
        self.quiz_active.store(false, Ordering::SeqCst);
        self.visible.store(true, Ordering::SeqCst);
        tracing::info!(character = %self.character, "animating strokes");

        tokio::select! {
            _ = tokio::time::sleep(self.cycle) => {
                tracing::debug!(character = %self.character, "animation complete");
            }
            _ = token.cancelled() => {
                tracing::debug!(character = %self.character, "animation cancelled");
            }
        }
    }

    fn cancel(&self) {
        let mut current = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        current.cancel();
        *current = CancellationToken::new();
        self.quiz_active.store(false, Ordering::SeqCst);
    }

    fn start_quiz(&self) {
        self.cancel();
        self.quiz_active.store(true, Ordering::SeqCst);
        tracing::info!(character = %self.character, "quiz started, trace the strokes in order");
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
        tracing::info!(character = %self.character, "character hidden");
    }
}

pub struct LogRendererFactory;

impl RendererFactory for LogRendererFactory {
    fn create(
        &self,
        character: char,
        options: &RendererConfig,
    ) -> Result<Arc<dyn StrokeRenderer>, RenderError> {
        let invalid = RenderError::InvalidSize {
            width: options.width,
            height: options.height,
        };
        if options.width == 0 || options.height == 0 {
            return Err(invalid);
        }
        if options.padding.saturating_mul(2) >= options.width.min(options.height) {
            return Err(invalid);
        }

        tracing::debug!(
            %character,
            width = options.width,
            height = options.height,
            "creating stroke diagram"
        );
        Ok(Arc::new(LogRenderer::new(character, options)))
    }
}
