use hanzi_core::ViewController;
use hanzi_types::PlaybackCommand;

pub fn handle_playback(view: &mut ViewController, command: PlaybackCommand) {
    let Some(character) = view.session().active_character() else {
        tracing::debug!("{:?} ignored, no active character", command);
        return;
    };

    tracing::debug!(%character, ?command, "playback trigger");
    view.handle_playback(command);
}
