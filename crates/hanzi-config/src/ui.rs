use serde::{Deserialize, Serialize};

fn default_character() -> Option<char> {
    Some('永')
}

fn default_loop_interval_ms() -> u64 {
    1000
}

fn default_prompt() -> String {
    "字> ".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Character shown and looked up on startup
    #[serde(default = "default_character")]
    pub default_character: Option<char>,
    /// Pause between cycles of the looping animation
    #[serde(default = "default_loop_interval_ms")]
    pub loop_interval_ms: u64,
    /// Only printed when stdin is a terminal
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_character: default_character(),
            loop_interval_ms: default_loop_interval_ms(),
            prompt: default_prompt(),
        }
    }
}
