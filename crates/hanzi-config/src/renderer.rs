use serde::{Deserialize, Serialize};

fn default_size() -> u32 {
    400
}

fn default_padding() -> u32 {
    20
}

fn default_true() -> bool {
    true
}

fn default_stroke_color() -> String {
    "#1a1a1a".to_string()
}

fn default_radical_color() -> Option<String> {
    Some("#e63946".to_string())
}

fn default_outline_color() -> String {
    "#ddd".to_string()
}

fn default_drawing_width() -> u32 {
    20
}

fn default_animation_speed() -> f32 {
    1.0
}

fn default_stroke_delay_ms() -> u64 {
    200
}

fn default_hint_after_misses() -> u32 {
    3
}

/// Options handed to the stroke renderer on construction
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RendererConfig {
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
    #[serde(default = "default_padding")]
    pub padding: u32,
    #[serde(default = "default_true")]
    pub show_outline: bool,
    #[serde(default = "default_stroke_color")]
    pub stroke_color: String,
    /// Radical highlight; `None` draws the radical in the stroke color
    #[serde(default = "default_radical_color")]
    pub radical_color: Option<String>,
    #[serde(default = "default_outline_color")]
    pub outline_color: String,
    #[serde(default = "default_drawing_width")]
    pub drawing_width: u32,
    #[serde(default = "default_true")]
    pub show_character: bool,
    /// Multiplier, 1.0 is normal speed
    #[serde(default = "default_animation_speed")]
    pub stroke_animation_speed: f32,
    #[serde(default = "default_stroke_delay_ms")]
    pub delay_between_strokes_ms: u64,
    #[serde(default = "default_hint_after_misses")]
    pub show_hint_after_misses: u32,
    #[serde(default = "default_true")]
    pub highlight_on_variation: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            padding: default_padding(),
            show_outline: default_true(),
            stroke_color: default_stroke_color(),
            radical_color: default_radical_color(),
            outline_color: default_outline_color(),
            drawing_width: default_drawing_width(),
            show_character: default_true(),
            stroke_animation_speed: default_animation_speed(),
            delay_between_strokes_ms: default_stroke_delay_ms(),
            show_hint_after_misses: default_hint_after_misses(),
            highlight_on_variation: default_true(),
        }
    }
}
