use crate::record::CharacterRecord;

#[derive(Debug, Clone)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Snapshot published after every session transition
    SessionUpdated(SessionView),
    BackendReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchText(String),
    Playback(PlaybackCommand),
    Resize { width: u32, height: u32 },
    /// Input ended; stop once the lookup in flight has settled
    InputClosed,
    Close,
}

/// The four stroke-diagram triggers exposed to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Animate,
    Loop,
    Quiz,
    Reset,
}

/// Read-only view of the session handed to the presentation layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub active_character: Option<char>,
    pub record: Option<CharacterRecord>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    pub render_notice: Option<String>,
}
