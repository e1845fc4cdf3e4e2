use serde::{Deserialize, Serialize};

/// Dictionary data for a single character, as returned by the lookup service.
///
/// Every instance has passed validation: there is no way to build a
/// partially populated record. Deserialization goes through
/// [`RawCharacterRecord`] and the same checks as [`CharacterRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCharacterRecord")]
pub struct CharacterRecord {
    #[serde(rename = "char")]
    character: char,
    #[serde(rename = "pinyin")]
    pronunciations: Vec<String>,
    definitions: Vec<String>,
    radical: String,
    #[serde(rename = "strokeCount")]
    stroke_count: u32,
    etymology: String,
    difficulty: Difficulty,
    examples: Vec<ExampleSentence>,
}

/// Wire shape of a record before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCharacterRecord {
    #[serde(rename = "char")]
    pub character: String,
    #[serde(rename = "pinyin")]
    pub pronunciations: Vec<String>,
    pub definitions: Vec<String>,
    pub radical: String,
    /// Schema declares a JSON number, so `5.0` is as valid as `5`
    #[serde(rename = "strokeCount")]
    pub stroke_count: f64,
    pub etymology: String,
    pub difficulty: Difficulty,
    pub examples: Vec<ExampleSentence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSentence {
    #[serde(rename = "chinese")]
    pub source_text: String,
    #[serde(rename = "pinyin")]
    pub transcription: String,
    #[serde(rename = "english")]
    pub translation: String,
}

impl ExampleSentence {
    pub fn new(
        source_text: impl Into<String>,
        transcription: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            transcription: transcription.into(),
            translation: translation.into(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected exactly one character, got {0:?}")]
    NotSingleCharacter(String),

    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("field `{field}` has a blank entry at index {index}")]
    BlankEntry { field: &'static str, index: usize },

    #[error("stroke count must be a positive integer, got {0}")]
    InvalidStrokeCount(String),
}

impl CharacterRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        character: char,
        pronunciations: Vec<String>,
        definitions: Vec<String>,
        radical: String,
        stroke_count: u32,
        etymology: String,
        difficulty: Difficulty,
        examples: Vec<ExampleSentence>,
    ) -> Result<Self, RecordError> {
        if character.is_whitespace() {
            return Err(RecordError::NotSingleCharacter(character.to_string()));
        }
        require_entries("pinyin", &pronunciations)?;
        require_entries("definitions", &definitions)?;
        require_text("radical", &radical)?;
        if stroke_count == 0 {
            return Err(RecordError::InvalidStrokeCount(stroke_count.to_string()));
        }
        require_text("etymology", &etymology)?;
        for (index, example) in examples.iter().enumerate() {
            if example.source_text.trim().is_empty()
                || example.transcription.trim().is_empty()
                || example.translation.trim().is_empty()
            {
                return Err(RecordError::BlankEntry {
                    field: "examples",
                    index,
                });
            }
        }

        Ok(Self {
            character,
            pronunciations,
            definitions,
            radical,
            stroke_count,
            etymology,
            difficulty,
            examples,
        })
    }

    pub fn character(&self) -> char {
        self.character
    }

    pub fn pronunciations(&self) -> &[String] {
        &self.pronunciations
    }

    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    pub fn radical(&self) -> &str {
        &self.radical
    }

    pub fn stroke_count(&self) -> u32 {
        self.stroke_count
    }

    pub fn etymology(&self) -> &str {
        &self.etymology
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn examples(&self) -> &[ExampleSentence] {
        &self.examples
    }
}

impl TryFrom<RawCharacterRecord> for CharacterRecord {
    type Error = RecordError;

    fn try_from(raw: RawCharacterRecord) -> Result<Self, Self::Error> {
        let mut chars = raw.character.chars();
        let character = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(RecordError::NotSingleCharacter(raw.character)),
        };

        let stroke_count = raw.stroke_count;
        if !(stroke_count.is_finite()
            && stroke_count.fract() == 0.0
            && stroke_count >= 1.0
            && stroke_count <= u32::MAX as f64)
        {
            return Err(RecordError::InvalidStrokeCount(stroke_count.to_string()));
        }

        Self::new(
            character,
            raw.pronunciations,
            raw.definitions,
            raw.radical,
            stroke_count as u32,
            raw.etymology,
            raw.difficulty,
            raw.examples,
        )
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::EmptyField(field));
    }
    Ok(())
}

fn require_entries(field: &'static str, values: &[String]) -> Result<(), RecordError> {
    if values.is_empty() {
        return Err(RecordError::EmptyField(field));
    }
    match values.iter().position(|v| v.trim().is_empty()) {
        Some(index) => Err(RecordError::BlankEntry { field, index }),
        None => Ok(()),
    }
}

/// Learner difficulty level reported by the lookup service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    /// Parse level from string, case-insensitive
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(Difficulty::Beginner),
            "intermediate" => Some(Difficulty::Intermediate),
            "advanced" => Some(Difficulty::Advanced),
            _ => None,
        }
    }

    /// Name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner (common, simple structure)",
            Difficulty::Intermediate => "Intermediate (everyday vocabulary)",
            Difficulty::Advanced => "Advanced (literary or complex)",
        }
    }

    /// Get color badge
    pub fn badge(&self) -> String {
        match self {
            Difficulty::Beginner => "🟢 Beginner".to_string(),
            Difficulty::Intermediate => "🟡 Intermediate".to_string(),
            Difficulty::Advanced => "🔴 Advanced".to_string(),
        }
    }
}
