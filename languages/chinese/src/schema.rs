//! Request payload for the Gemini `generateContent` endpoint.
//!
//! The response schema mirrors the wire shape of
//! [`hanzi_types::CharacterRecord`]; every field is required.

use hanzi_types::Difficulty;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub fn lookup_prompt(character: char) -> String {
    format!("Provide detailed dictionary information for the Chinese character \"{character}\".")
}

pub fn response_schema() -> Value {
    let difficulties: Vec<&str> = Difficulty::ALL.iter().map(|d| d.as_str()).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "char": { "type": "STRING", "description": "The character itself" },
            "pinyin": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of pinyin pronunciations (e.g., ['wǒ'])"
            },
            "definitions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "List of English definitions"
            },
            "radical": { "type": "STRING", "description": "The radical of the character" },
            "strokeCount": { "type": "NUMBER", "description": "Total number of strokes" },
            "etymology": {
                "type": "STRING",
                "description": "Brief explanation of the character's origin or evolution (approx 30 words)"
            },
            "difficulty": { "type": "STRING", "enum": difficulties },
            "examples": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "chinese": { "type": "STRING" },
                        "pinyin": { "type": "STRING" },
                        "english": { "type": "STRING" }
                    },
                    "required": ["chinese", "pinyin", "english"]
                },
                "description": "3 common example sentences or phrases"
            }
        },
        "required": [
            "char", "pinyin", "definitions", "radical",
            "strokeCount", "etymology", "examples", "difficulty"
        ]
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Structured lookup request for one character
    pub fn for_character(character: char) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: lookup_prompt(character),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        }
    }
}

#[derive(Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

#[derive(Deserialize, Default)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
pub struct Candidate {
    pub content: Option<ContentResponse>,
}

#[derive(Deserialize)]
pub struct ContentResponse {
    #[serde(default)]
    pub parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
pub struct PartResponse {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, `None` when blank
    pub fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates?
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Deserialize)]
pub struct ErrorWrapper {
    pub error: ErrorBody,
}

#[derive(Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
    pub status: Option<String>,
}
