use serde::{Deserialize, Serialize};

use self::lookup::LookupConfig;
use self::renderer::RendererConfig;
use self::ui::UiConfig;

pub mod lookup;
pub mod renderer;
pub mod ui;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub lookup: LookupConfig,
    pub renderer: RendererConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults plus the API key from the environment.
    ///
    /// The key is the only setting taken from the environment; everything
    /// else comes from profiles or the command line.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_api_key();
        config
    }

    /// Fill `lookup.api_key` from the environment, keeping any key already set
    pub fn load_api_key(&mut self) {
        if self.lookup.has_api_key() {
            return;
        }
        if let Some(key) = LookupConfig::api_key_from_env() {
            self.lookup.api_key = key;
        }
    }
}
