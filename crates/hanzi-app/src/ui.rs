use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::Arc;

use hanzi_config::Config;
use hanzi_types::{AppEvent, CharacterRecord, SessionView, UiEvent};
use kanal::AsyncReceiver;
use tokio::sync::RwLock;

pub const LOADING_TEXT: &str = "Consulting the ancient scrolls...";
pub const EMPTY_TEXT: &str = "Enter a character to begin learning.";

const HELP: &str = "\
Type a character and press Enter to look it up (empty input reloads the current one).
Commands: :animate  :loop  :quiz  :reset  :size W H  :quit";

/// Print session snapshots to stdout
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let prompt = config.read().await.ui.prompt.clone();
    let interactive = atty::is(atty::Stream::Stdin);
    let mut previous: Option<SessionView> = None;

    while let Ok(event) = app_to_ui_rx.recv().await {
        match event {
            AppEvent::BackendReady => {
                println!("{HELP}");
            }
            AppEvent::SessionUpdated(view) => {
                if previous.as_ref() == Some(&view) {
                    continue;
                }

                print!("{}", render_session(&view, previous.as_ref()));
                if interactive && !view.is_loading {
                    print!("{prompt}");
                }
                std::io::stdout().flush()?;
                previous = Some(view);
            }
            AppEvent::UiEvent(UiEvent::Close) => break,
            _ => {}
        }
    }

    tracing::debug!("UI loop stopped");
    Ok(())
}

/// Text for one snapshot.
///
/// The record panel is only reprinted when the record itself changed.
pub fn render_session(view: &SessionView, previous: Option<&SessionView>) -> String {
    let mut out = String::new();

    if let Some(notice) = &view.render_notice {
        let _ = writeln!(out, "[diagram] {notice}");
    }

    if view.is_loading {
        let character = view.active_character.map(String::from).unwrap_or_default();
        let _ = writeln!(out, "{character} {LOADING_TEXT}");
        return out;
    }

    if let Some(error) = &view.last_error {
        let _ = writeln!(out, "error: {error}");
    }

    match &view.record {
        Some(record) if previous.and_then(|p| p.record.as_ref()) != Some(record) => {
            out.push_str(&render_record(record));
        }
        Some(_) => {}
        None if view.last_error.is_none() => {
            let _ = writeln!(out, "{EMPTY_TEXT}");
        }
        None => {}
    }

    out
}

pub fn render_record(record: &CharacterRecord) -> String {
    let mut out = String::new();

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}   {}",
        record.character(),
        record.pronunciations().join(", ")
    );
    let _ = writeln!(
        out,
        "  {}   {}",
        record.difficulty().badge(),
        record.difficulty().description()
    );
    let _ = writeln!(
        out,
        "  Radical: {}   Strokes: {}",
        record.radical(),
        record.stroke_count()
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "  Meaning");
    for definition in record.definitions() {
        let _ = writeln!(out, "    - {definition}");
    }

    let _ = writeln!(out, "  Origin");
    let _ = writeln!(out, "    {}", record.etymology());

    if !record.examples().is_empty() {
        let _ = writeln!(out, "  Examples");
        for example in record.examples() {
            let _ = writeln!(
                out,
                "    {}  {}  {}",
                example.source_text, example.transcription, example.translation
            );
        }
    }
    let _ = writeln!(out);

    out
}

#[cfg(test)]
mod tests {
    use hanzi_types::{Difficulty, ExampleSentence};

    use super::*;

    fn record() -> CharacterRecord {
        CharacterRecord::new(
            '好',
            vec!["hǎo".into(), "hào".into()],
            vec!["good".into(), "well".into()],
            "女".into(),
            6,
            "A woman with a child.".into(),
            Difficulty::Beginner,
            vec![ExampleSentence::new("你好", "nǐhǎo", "hello")],
        )
        .unwrap()
    }

    #[test]
    fn test_empty_state() {
        let out = render_session(&SessionView::default(), None);
        assert_eq!(out.trim(), EMPTY_TEXT);
    }

    #[test]
    fn test_loading_hides_record() {
        let view = SessionView {
            active_character: Some('好'),
            record: Some(record()),
            is_loading: true,
            ..SessionView::default()
        };
        let out = render_session(&view, None);
        assert!(out.contains(LOADING_TEXT));
        assert!(!out.contains("Radical"));
    }

    #[test]
    fn test_record_panel() {
        let out = render_record(&record());
        assert!(out.contains("好   hǎo, hào"));
        assert!(out.contains("🟢 Beginner   Beginner (common, simple structure)"));
        assert!(out.contains("Radical: 女   Strokes: 6"));
        assert!(out.contains("- well"));
        assert!(out.contains("你好  nǐhǎo  hello"));
    }

    #[test]
    fn test_error_keeps_previous_record_quiet() {
        let loaded = SessionView {
            active_character: Some('好'),
            record: Some(record()),
            ..SessionView::default()
        };
        let failed = SessionView {
            last_error: Some("Please enter a valid Chinese character.".into()),
            ..loaded.clone()
        };

        let out = render_session(&failed, Some(&loaded));
        assert_eq!(out, "error: Please enter a valid Chinese character.\n");
    }

    #[test]
    fn test_error_without_record() {
        let view = SessionView {
            active_character: Some('永'),
            last_error: Some("Failed".into()),
            ..SessionView::default()
        };
        let out = render_session(&view, None);
        assert!(out.contains("error: Failed"));
        assert!(!out.contains(EMPTY_TEXT));
    }

    #[test]
    fn test_render_notice_shown() {
        let view = SessionView {
            active_character: Some('龘'),
            render_notice: Some("Stroke diagram unavailable for 龘.".into()),
            is_loading: true,
            ..SessionView::default()
        };
        assert!(render_session(&view, None).starts_with("[diagram] Stroke diagram unavailable"));
    }
}
