/// Fire-and-forget audio cues.

use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Shoot,
    EnemyExplode,
    PlayerHit,
    BorderHit,
    PowerUp,
    Congratulations,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MusicCommand {
    Start,
    Pause,
    Resume,
    Stop,
}

pub trait SoundSink: Send {
    fn play(&mut self, cue: SoundCue);
    fn music(&mut self, command: MusicCommand);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
    fn music(&mut self, _command: MusicCommand) {}
}

/// Emits each cue as a trace event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggedSound;

impl SoundSink for LoggedSound {
    fn play(&mut self, cue: SoundCue) {
        trace!(?cue, "sound");
    }

    fn music(&mut self, command: MusicCommand) {
        trace!(?command, "music");
    }
}
