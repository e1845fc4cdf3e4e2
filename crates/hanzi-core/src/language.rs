/// Script-specific input handling for a language implementation
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code: "zh", "ja", "ko", etc.)
    fn language_code(&self) -> &str;

    /// Normalize raw input (Unicode normalization, surrounding whitespace)
    fn normalize(&self, text: &str) -> String;

    /// Whether a glyph belongs to the accepted script range
    fn accepts(&self, glyph: char) -> bool;

    /// First glyph of the normalized input, if any
    fn first_glyph(&self, text: &str) -> Option<char> {
        self.normalize(text).chars().next()
    }
}
