//! Keyboard-driven stand-in for the analog microphone.
//!
//! The ambient level is nudged with Up/Down; holding Space replaces it with a
//! loud burst well above the alarm threshold. A small sine wobble keeps the
//! bar moving like a real envelope signal.

use noise_monitor::Sampler;
use noise_monitor::config::ADC_MAX;

/// Ambient step per Up/Down press (ADC codes).
const LEVEL_STEP: u16 = 200;

/// Boot ambient level, well under the threshold.
const AMBIENT_DEFAULT: u16 = 800;

/// Code produced while Space is held.
const BURST_LEVEL: u16 = 3600;

/// Wobble amplitude (ADC codes).
const WOBBLE: f32 = 40.0;

pub struct SimMicrophone {
    ambient: u16,
    burst: bool,
    phase: f32,
}

impl SimMicrophone {
    pub const fn new() -> Self {
        Self {
            ambient: AMBIENT_DEFAULT,
            burst: false,
            phase: 0.0,
        }
    }

    pub fn louder(&mut self) { self.ambient = self.ambient.saturating_add(LEVEL_STEP).min(ADC_MAX); }

    pub fn quieter(&mut self) { self.ambient = self.ambient.saturating_sub(LEVEL_STEP); }

    pub fn set_burst(
        &mut self,
        held: bool,
    ) {
        self.burst = held;
    }

    #[inline]
    pub const fn ambient(&self) -> u16 { self.ambient }
}

impl Sampler for SimMicrophone {
    fn read_raw(&mut self) -> u16 {
        self.phase += 0.7;
        let base = if self.burst { BURST_LEVEL } else { self.ambient };
        let raw = f32::from(base) + self.phase.sin() * WOBBLE;
        raw.clamp(0.0, f32::from(ADC_MAX)) as u16
    }
}
