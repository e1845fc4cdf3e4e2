use std::sync::Arc;

use hanzi_core::{PendingLookup, Phase, Settlement, ViewController};
use hanzi_lookup::{CharacterSource, LookupError};
use hanzi_types::CharacterRecord;
use kanal::AsyncSender;

use crate::status::LookupStatus;

/// Outcome of a lookup task, delivered back to the event loop
pub struct SettledLookup {
    pub pending: PendingLookup,
    pub result: Result<CharacterRecord, LookupError>,
}

/// Validate the search and run the fetch in its own task.
///
/// Nothing waits on the task; its result comes back through `settled_tx`.
pub fn handle_search(
    view: &mut ViewController,
    text: &str,
    source: &Arc<dyn CharacterSource>,
    settled_tx: &AsyncSender<SettledLookup>,
    status: &mut LookupStatus,
) {
    let pending = match view.submit_search(text) {
        Ok(pending) => pending,
        Err(err) => {
            tracing::debug!("Search rejected: {}", err);
            status.record_rejection();
            return;
        }
    };
    status.record_dispatch();

    let source = source.clone();
    let settled_tx = settled_tx.clone();
    tokio::spawn(async move {
        let result = source.fetch(pending.character()).await;
        if let Err(e) = settled_tx.send(SettledLookup { pending, result }).await {
            tracing::error!("Failed to deliver lookup result: {}", e);
        }
    });
}

pub fn handle_settled(view: &mut ViewController, settled: SettledLookup, status: &mut LookupStatus) {
    match view.settle(settled.pending, settled.result) {
        // the controller may still reject a record, so count what it applied
        Settlement::Applied => status.record_settled(view.phase() == Phase::Loaded),
        Settlement::Discarded => status.record_discard(),
    }

    tracing::debug!(?status, "lookup settled");
}

#[cfg(test)]
mod tests {
    use hanzi_config::Config;
    use hanzi_lang_chinese::ChineseProcessor;
    use hanzi_types::{Difficulty, ExampleSentence};

    use super::*;
    use crate::renderer::LogRendererFactory;

    fn view() -> ViewController {
        let mut config = Config::default();
        config.ui.default_character = None;
        ViewController::new(
            Arc::new(ChineseProcessor::new()),
            Arc::new(LogRendererFactory),
            &config,
        )
    }

    fn record(character: char) -> CharacterRecord {
        CharacterRecord::new(
            character,
            vec!["hǎo".into()],
            vec!["good".into()],
            "女".into(),
            6,
            "A woman with a child.".into(),
            Difficulty::Beginner,
            vec![ExampleSentence::new("你好", "nǐhǎo", "hello")],
        )
        .unwrap()
    }

    #[test]
    fn test_record_for_other_glyph_counts_as_failure() {
        let mut view = view();
        let mut status = LookupStatus::default();
        let pending = view.submit_search("永").unwrap();

        let settled = SettledLookup {
            pending,
            result: Ok(record('好')),
        };
        handle_settled(&mut view, settled, &mut status);

        assert_eq!(view.phase(), Phase::Failed);
        assert_eq!(status.succeeded, 0);
        assert_eq!(status.failed, 1);
    }

    #[test]
    fn test_tally_success_and_discard() {
        let mut view = view();
        let mut status = LookupStatus::default();
        let stale = view.submit_search("永").unwrap();
        let current = view.submit_search("好").unwrap();

        handle_settled(
            &mut view,
            SettledLookup {
                pending: current,
                result: Ok(record('好')),
            },
            &mut status,
        );
        handle_settled(
            &mut view,
            SettledLookup {
                pending: stale,
                result: Err(LookupError::EmptyResponse),
            },
            &mut status,
        );

        assert_eq!(status.succeeded, 1);
        assert_eq!(status.discarded, 1);
        assert_eq!(view.phase(), Phase::Loaded);
    }
}
