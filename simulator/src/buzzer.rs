//! Buzzer stand-in: tone changes go to the log instead of a speaker.

use noise_monitor::{Tone, ToneOutput};
use tracing::debug;

#[derive(Default)]
pub struct LogBuzzer {
    sounding: Option<Tone>,
}

impl ToneOutput for LogBuzzer {
    fn play(
        &mut self,
        tone: Tone,
    ) {
        debug!(?tone, hz = tone.frequency_hz(), "buzzer on");
        self.sounding = Some(tone);
    }

    fn silence(&mut self) {
        if self.sounding.take().is_some() {
            debug!("buzzer off");
        }
    }
}
