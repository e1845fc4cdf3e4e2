use std::ops::RangeInclusive;

use hanzi_core::language::LanguageProcessor;
use unicode_normalization::UnicodeNormalization;

/// CJK Unified Ideographs, basic block as accepted by the lookup prompt
pub const ACCEPTED_RANGE: RangeInclusive<char> = '\u{4E00}'..='\u{9FA5}';

/// Chinese input processor
#[derive(Debug, Clone, Copy, Default)]
pub struct ChineseProcessor;

impl ChineseProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageProcessor for ChineseProcessor {
    fn language_code(&self) -> &str {
        "zh"
    }

    fn normalize(&self, text: &str) -> String {
        // NFKC folds compatibility ideographs and Kangxi radicals into the unified block
        text.nfkc().collect::<String>().trim().to_string()
    }

    fn accepts(&self, glyph: char) -> bool {
        ACCEPTED_RANGE.contains(&glyph)
    }
}
