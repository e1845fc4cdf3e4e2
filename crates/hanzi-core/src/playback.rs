use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::renderer::StrokeRenderer;

/// Looping stroke animation.
///
/// Each cycle runs to completion, then the loop waits `interval` and checks
/// `token` before starting the next one. Cancelling the token never aborts a
/// cycle that has already started.
pub async fn run_loop(
    renderer: Arc<dyn StrokeRenderer>,
    interval: Duration,
    token: CancellationToken,
) {
    let character = renderer.character();
    let mut cycles = 0u64;

    while !token.is_cancelled() {
        renderer.animate_once().await;
        cycles += 1;

        tokio::select! {
            _ = token.cancelled() => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }

    tracing::debug!(%character, cycles, "animation loop stopped");
}
