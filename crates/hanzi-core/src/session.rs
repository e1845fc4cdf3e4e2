use hanzi_lookup::LookupError;
use hanzi_types::{CharacterRecord, SessionView};

/// Observable phase of the session, derived from its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Ticket for a dispatched lookup.
///
/// Only the most recently issued ticket can settle the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLookup {
    generation: u64,
    character: char,
}

impl PendingLookup {
    pub fn character(&self) -> char {
        self.character
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// A newer search or a rejection superseded this lookup
    Discarded,
}

/// View state of one learning session.
///
/// Invariants:
/// - `in_flight` and `last_error` are never both set
/// - `record`, when present, belongs to `active_character`
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    active_character: Option<char>,
    record: Option<CharacterRecord>,
    in_flight: Option<PendingLookup>,
    last_error: Option<String>,
    render_notice: Option<String>,
    generation: u64,
}

impl SessionState {
    pub fn new(default_character: Option<char>) -> Self {
        Self {
            active_character: default_character,
            ..Self::default()
        }
    }

    pub fn active_character(&self) -> Option<char> {
        self.active_character
    }

    pub fn record(&self) -> Option<&CharacterRecord> {
        self.record.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn render_notice(&self) -> Option<&str> {
        self.render_notice.as_deref()
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_some() {
            Phase::Loading
        } else if self.last_error.is_some() {
            Phase::Failed
        } else if self.record.is_some() {
            Phase::Loaded
        } else {
            Phase::Idle
        }
    }

    /// Whether `pending` is the lookup the session is waiting for
    pub fn is_current(&self, pending: PendingLookup) -> bool {
        self.in_flight == Some(pending)
    }

    /// Enter `Loading` for `character`, superseding any lookup in flight
    pub fn begin(&mut self, character: char) -> PendingLookup {
        self.generation += 1;
        let pending = PendingLookup {
            generation: self.generation,
            character,
        };

        if self
            .record
            .as_ref()
            .is_some_and(|record| record.character() != character)
        {
            self.record = None;
        }
        self.active_character = Some(character);
        self.last_error = None;
        self.in_flight = Some(pending);

        pending
    }

    /// Enter `Failed` without a lookup. The active character and its record stay.
    pub fn reject(&mut self, message: impl Into<String>) {
        self.in_flight = None;
        self.last_error = Some(message.into());
    }

    /// Apply the outcome of `pending`; stale outcomes leave the state untouched.
    ///
    /// A record must already be checked against `pending.character()`.
    pub fn settle(
        &mut self,
        pending: PendingLookup,
        result: Result<CharacterRecord, LookupError>,
    ) -> Settlement {
        if !self.is_current(pending) {
            return Settlement::Discarded;
        }
        self.in_flight = None;

        match result {
            Ok(record) => {
                self.record = Some(record);
                self.last_error = None;
            }
            Err(err) => {
                self.last_error = Some(err.user_message().to_string());
            }
        }

        Settlement::Applied
    }

    pub fn set_render_notice(&mut self, notice: Option<String>) {
        self.render_notice = notice;
    }

    pub fn snapshot(&self) -> SessionView {
        SessionView {
            active_character: self.active_character,
            record: self.record.clone(),
            is_loading: self.is_loading(),
            last_error: self.last_error.clone(),
            render_notice: self.render_notice.clone(),
        }
    }
}
