use std::sync::Arc;

use hanzi_config::renderer::RendererConfig;

/// Command interface of a stroke-order diagram bound to one character.
///
/// Instances are never retargeted: a new character or a new render size
/// means a new renderer from [`RendererFactory::create`].
#[async_trait::async_trait]
pub trait StrokeRenderer: Send + Sync {
    /// Character this renderer draws
    fn character(&self) -> char;

    /// Animate every stroke once, resolving when the cycle has finished
    async fn animate_once(&self);

    /// Cancel a running quiz or animation
    fn cancel(&self);

    /// Start the self-paced tracing quiz
    fn start_quiz(&self);

    /// Hide the drawn character, leaving the empty grid
    fn hide(&self);
}

/// Builds renderers for a character and a set of visual options
pub trait RendererFactory: Send + Sync {
    fn create(
        &self,
        character: char,
        options: &RendererConfig,
    ) -> Result<Arc<dyn StrokeRenderer>, RenderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("No stroke data for {0:?}")]
    MissingStrokeData(char),

    #[error("Invalid render size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}
