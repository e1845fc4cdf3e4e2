//! Event loop driven end to end with a scripted character source

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use hanzi_config::Config;
use hanzi_core::state::AppState;
use hanzi_lang_chinese::ChineseProcessor;
use hanzi_lookup::{
    CharacterSource, INVALID_CHARACTER_MESSAGE, LookupError, ProviderMetadata,
    RETRIEVAL_FAILED_MESSAGE,
};
use hanzi_types::{
    AppEvent, CharacterRecord, Difficulty, ExampleSentence, PlaybackCommand, SessionView, UiEvent,
};
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::events::event_loop;
use crate::renderer::LogRendererFactory;

enum Reply {
    Record(CharacterRecord),
    Empty,
}

#[derive(Default)]
struct ScriptedSource {
    replies: Mutex<HashMap<char, VecDeque<(Duration, Reply)>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    fn reply(self, character: char, delay_ms: u64, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(character)
            .or_default()
            .push_back((Duration::from_millis(delay_ms), reply));
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CharacterSource for ScriptedSource {
    async fn fetch(&self, character: char) -> Result<CharacterRecord, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&character)
            .and_then(|queue| queue.pop_front());

        let Some((delay, reply)) = next else {
            return Err(LookupError::EmptyResponse);
        };
        tokio::time::sleep(delay).await;

        match reply {
            Reply::Record(record) => Ok(record),
            Reply::Empty => Err(LookupError::EmptyResponse),
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".into(),
            model: "test".into(),
            requires_api_key: false,
        }
    }
}

fn yong() -> CharacterRecord {
    CharacterRecord::new(
        '永',
        vec!["yǒng".into()],
        vec!["forever".into(), "perpetual".into()],
        "水".into(),
        5,
        "Water flowing on and on.".into(),
        Difficulty::Intermediate,
        vec![ExampleSentence::new("永远", "yǒngyuǎn", "forever")],
    )
    .unwrap()
}

fn hao() -> CharacterRecord {
    CharacterRecord::new(
        '好',
        vec!["hǎo".into(), "hào".into()],
        vec!["good".into()],
        "女".into(),
        6,
        "A woman with a child.".into(),
        Difficulty::Beginner,
        vec![ExampleSentence::new("你好", "nǐhǎo", "hello")],
    )
    .unwrap()
}

struct Harness {
    tx: AsyncSender<AppEvent>,
    rx: AsyncReceiver<AppEvent>,
    task: JoinHandle<anyhow::Result<()>>,
    source: Arc<ScriptedSource>,
}

impl Harness {
    fn start(default: Option<char>, source: ScriptedSource) -> Self {
        let mut config = Config::default();
        config.ui.default_character = default;
        let state = Arc::new(AppState::new(config));
        let source = Arc::new(source);

        let (ui_to_app_tx, ui_to_app_rx) = kanal::unbounded_async();
        let (app_to_ui_tx, app_to_ui_rx) = kanal::unbounded_async();

        let task = tokio::spawn(event_loop(
            state,
            ui_to_app_rx,
            app_to_ui_tx,
            source.clone(),
            Arc::new(ChineseProcessor::new()),
            Arc::new(LogRendererFactory),
        ));

        Self {
            tx: ui_to_app_tx,
            rx: app_to_ui_rx,
            task,
            source,
        }
    }

    async fn send(&self, event: UiEvent) {
        self.tx.send(AppEvent::UiEvent(event)).await.unwrap();
    }

    async fn search(&self, text: &str) {
        self.send(UiEvent::SearchText(text.to_string())).await;
    }

    /// Next published snapshot matching `pred`
    async fn wait_for(&self, pred: impl Fn(&SessionView) -> bool) -> SessionView {
        timeout(Duration::from_secs(30), async {
            loop {
                if let AppEvent::SessionUpdated(view) = self.rx.recv().await.unwrap() {
                    if pred(&view) {
                        return view;
                    }
                }
            }
        })
        .await
        .expect("no matching snapshot")
    }

    /// Close the loop and return every snapshot published after the last wait
    async fn close(self) -> Vec<SessionView> {
        self.send(UiEvent::Close).await;
        self.task.await.unwrap().unwrap();

        let mut rest = Vec::new();
        while let Ok(Some(event)) = self.rx.try_recv() {
            if let AppEvent::SessionUpdated(view) = event {
                rest.push(view);
            }
        }
        rest
    }
}

fn loaded(character: char) -> impl Fn(&SessionView) -> bool {
    move |view| {
        !view.is_loading && view.record.as_ref().map(|r| r.character()) == Some(character)
    }
}

fn failed(view: &SessionView) -> bool {
    !view.is_loading && view.last_error.is_some()
}

#[tokio::test(start_paused = true)]
async fn test_lookup_yong() {
    let source = ScriptedSource::default().reply('永', 200, Reply::Record(yong()));
    let harness = Harness::start(None, source);

    harness.search("永").await;
    let view = harness.wait_for(loaded('永')).await;

    let record = view.record.unwrap();
    assert_eq!(record.stroke_count(), 5);
    assert!(Difficulty::ALL.contains(&record.difficulty()));
    assert_eq!(view.active_character, Some('永'));
    assert!(view.last_error.is_none());
    assert_eq!(harness.source.calls(), 1);
    harness.close().await;
}

#[tokio::test(start_paused = true)]
async fn test_default_character_loaded_on_start() {
    let source = ScriptedSource::default().reply('永', 50, Reply::Record(yong()));
    let harness = Harness::start(Some('永'), source);

    harness.wait_for(loaded('永')).await;
    assert_eq!(harness.source.calls(), 1);
    harness.close().await;
}

#[tokio::test(start_paused = true)]
async fn test_empty_input_without_character_fails_offline() {
    let harness = Harness::start(None, ScriptedSource::default());

    harness.search("").await;
    let view = harness.wait_for(failed).await;

    assert_eq!(view.last_error.as_deref(), Some(INVALID_CHARACTER_MESSAGE));
    assert_eq!(view.active_character, None);
    assert_eq!(harness.source.calls(), 0);
    harness.close().await;
}

#[tokio::test(start_paused = true)]
async fn test_non_chinese_input_fails_offline() {
    let harness = Harness::start(None, ScriptedSource::default());

    harness.search("abc").await;
    let view = harness.wait_for(failed).await;

    assert_eq!(view.last_error.as_deref(), Some(INVALID_CHARACTER_MESSAGE));
    assert_eq!(harness.source.calls(), 0);
    harness.close().await;
}

#[tokio::test(start_paused = true)]
async fn test_empty_response_keeps_character_and_record() {
    let source = ScriptedSource::default()
        .reply('永', 50, Reply::Record(yong()))
        .reply('永', 50, Reply::Empty);
    let harness = Harness::start(None, source);

    harness.search("永").await;
    harness.wait_for(loaded('永')).await;

    // empty input retries the active character
    harness.search("").await;
    let view = harness.wait_for(failed).await;

    assert_eq!(view.last_error.as_deref(), Some(RETRIEVAL_FAILED_MESSAGE));
    assert_eq!(view.active_character, Some('永'));
    assert_eq!(view.record.map(|r| r.character()), Some('永'));
    assert_eq!(harness.source.calls(), 2);
    harness.close().await;
}

#[tokio::test(start_paused = true)]
async fn test_failure_for_new_character_clears_record() {
    let source = ScriptedSource::default()
        .reply('永', 50, Reply::Record(yong()))
        .reply('好', 50, Reply::Empty);
    let harness = Harness::start(None, source);

    harness.search("永").await;
    harness.wait_for(loaded('永')).await;

    harness.search("好").await;
    let view = harness.wait_for(failed).await;

    assert_eq!(view.active_character, Some('好'));
    assert!(view.record.is_none());
    harness.close().await;
}

#[tokio::test(start_paused = true)]
async fn test_rapid_double_search_keeps_latest() {
    let source = ScriptedSource::default()
        .reply('永', 500, Reply::Record(yong()))
        .reply('好', 100, Reply::Record(hao()));
    let harness = Harness::start(None, source);

    harness.search("永").await;
    harness.search("好").await;
    let view = harness.wait_for(loaded('好')).await;
    assert_eq!(view.active_character, Some('好'));

    // let the slow 永 reply arrive
    tokio::time::sleep(Duration::from_secs(2)).await;
    let rest = harness.close().await;

    assert!(
        rest.iter()
            .all(|view| view.active_character == Some('好')
                && view.record.as_ref().map(|r| r.character()) == Some('好'))
    );
}

#[tokio::test(start_paused = true)]
async fn test_loading_snapshot_published() {
    let source = ScriptedSource::default().reply('永', 1000, Reply::Record(yong()));
    let harness = Harness::start(None, source);

    harness.search("永").await;
    let view = harness.wait_for(|view| view.is_loading).await;
    assert_eq!(view.active_character, Some('永'));
    assert!(view.last_error.is_none());

    harness.wait_for(loaded('永')).await;
    harness.close().await;
}

#[tokio::test(start_paused = true)]
async fn test_playback_and_resize_keep_session() {
    let source = ScriptedSource::default().reply('永', 50, Reply::Record(yong()));
    let harness = Harness::start(None, source);

    // no active character yet, ignored
    harness.send(UiEvent::Playback(PlaybackCommand::Loop)).await;

    harness.search("永").await;
    let before = harness.wait_for(loaded('永')).await;

    for command in [
        PlaybackCommand::Animate,
        PlaybackCommand::Loop,
        PlaybackCommand::Quiz,
        PlaybackCommand::Reset,
    ] {
        harness.send(UiEvent::Playback(command)).await;
    }
    harness
        .send(UiEvent::Resize {
            width: 0,
            height: 0,
        })
        .await;

    let view = harness.wait_for(|view| view.render_notice.is_some()).await;
    assert_eq!(view.record, before.record);
    assert_eq!(
        view.render_notice.as_deref(),
        Some("Stroke diagram unavailable for 永.")
    );

    harness
        .send(UiEvent::Resize {
            width: 300,
            height: 300,
        })
        .await;
    harness.wait_for(|view| view.render_notice.is_none()).await;
    harness.close().await;
}

#[tokio::test(start_paused = true)]
async fn test_end_of_input_waits_for_lookup() {
    let source = ScriptedSource::default().reply('永', 500, Reply::Record(yong()));
    let harness = Harness::start(None, source);

    harness.search("永").await;
    harness.send(UiEvent::InputClosed).await;

    let Harness { rx, task, .. } = harness;
    timeout(Duration::from_secs(30), task)
        .await
        .expect("event loop did not stop")
        .unwrap()
        .unwrap();

    let mut events = Vec::new();
    while let Ok(Some(event)) = rx.try_recv() {
        events.push(event);
    }

    let last_view = events
        .iter()
        .rev()
        .find_map(|event| match event {
            AppEvent::SessionUpdated(view) => Some(view.clone()),
            _ => None,
        })
        .unwrap();
    assert!(loaded('永')(&last_view));
    assert!(matches!(
        events.last(),
        Some(AppEvent::UiEvent(UiEvent::Close))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_end_of_input_when_idle_stops() {
    let harness = Harness::start(None, ScriptedSource::default());
    harness.send(UiEvent::InputClosed).await;

    let Harness { task, source, .. } = harness;
    timeout(Duration::from_secs(30), task)
        .await
        .expect("event loop did not stop")
        .unwrap()
        .unwrap();
    assert_eq!(source.calls(), 0);
}
