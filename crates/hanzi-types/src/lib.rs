pub mod record;
pub mod types;

pub use record::{CharacterRecord, Difficulty, ExampleSentence, RawCharacterRecord, RecordError};
pub use types::{AppEvent, PlaybackCommand, SessionView, UiEvent};
