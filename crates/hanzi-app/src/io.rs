use std::io::BufRead;

use hanzi_types::{AppEvent, PlaybackCommand, UiEvent};
use kanal::AsyncSender;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Read commands from stdin and forward them to the event loop.
///
/// Stdin is read on a plain thread so a pending read never holds up runtime
/// shutdown. End of input lets the lookup in flight finish before closing.
pub async fn watcher_io(
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (line_tx, mut line_rx) = mpsc::channel::<String>(16);

    std::thread::Builder::new()
        .name("stdin-reader".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if line_tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
        })?;

    tracing::info!("Starting stdin watcher");

    loop {
        tokio::select! {
            line = line_rx.recv() => {
                let Some(line) = line else {
                    tracing::info!("stdin closed");
                    event_tx.send(AppEvent::UiEvent(UiEvent::InputClosed)).await?;
                    break;
                };

                if let Some(event) = parse_command(&line) {
                    let close = event == UiEvent::Close;
                    event_tx.send(AppEvent::UiEvent(event)).await?;
                    if close {
                        break;
                    }
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("stdin watcher stopping");
                break;
            }
        }
    }

    Ok(())
}

/// Map one input line to a UI event.
///
/// Lines starting with `:` are commands, anything else is a search.
pub fn parse_command(line: &str) -> Option<UiEvent> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Some(UiEvent::SearchText(trimmed.to_string()));
    };

    let mut parts = command.split_whitespace();
    let event = match parts.next().unwrap_or_default() {
        "animate" | "a" => UiEvent::Playback(PlaybackCommand::Animate),
        "loop" | "l" => UiEvent::Playback(PlaybackCommand::Loop),
        "quiz" | "practice" | "p" => UiEvent::Playback(PlaybackCommand::Quiz),
        "reset" | "r" => UiEvent::Playback(PlaybackCommand::Reset),
        "quit" | "q" | "exit" => UiEvent::Close,
        "size" => {
            let width = parts.next().and_then(|v| v.parse::<u32>().ok());
            let height = parts.next().and_then(|v| v.parse::<u32>().ok());
            match (width, height) {
                (Some(width), Some(height)) => UiEvent::Resize { width, height },
                _ => {
                    tracing::warn!("Usage: :size WIDTH HEIGHT");
                    return None;
                }
            }
        }
        other => {
            tracing::warn!("Unknown command :{}", other);
            return None;
        }
    };

    Some(event)
}
