pub mod client;
pub mod processor;
pub mod schema;

pub use client::GeminiCharacterClient;
pub use processor::ChineseProcessor;
