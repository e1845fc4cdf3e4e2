pub mod controller;
pub mod language;
pub mod playback;
pub mod renderer;
pub mod session;
pub mod state;

pub use controller::ViewController;
pub use session::{PendingLookup, Phase, SessionState, Settlement};
