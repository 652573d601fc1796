//! Passive buzzer on a PWM slice.
//!
//! The tone is a 50% duty square wave; the frequency is set through the
//! slice's wrap value. Silence keeps the carrier running at 0% duty.

use embassy_rp::pwm::{Config, Pwm};
use noise_monitor::config::IDLE_TONE_HZ;
use noise_monitor::tone::{half_duty, pwm_top};
use noise_monitor::{Tone, ToneOutput};

use crate::config::BUZZER_CLOCK_DIVIDER;

/// Buzzer on PWM channel B.
pub struct Buzzer<'d> {
    pwm: Pwm<'d>,
    config: Config,
    clock_hz: u32,
}

impl<'d> Buzzer<'d> {
    /// Take over a configured slice and leave it silent at the idle frequency.
    pub fn new(
        pwm: Pwm<'d>,
        clock_hz: u32,
    ) -> Self {
        let mut config = Config::default();
        config.divider = BUZZER_CLOCK_DIVIDER.into();
        let mut buzzer = Self { pwm, config, clock_hz };
        buzzer.configure(IDLE_TONE_HZ, false);
        buzzer
    }

    fn configure(
        &mut self,
        freq_hz: u32,
        sounding: bool,
    ) {
        let top = pwm_top(self.clock_hz, BUZZER_CLOCK_DIVIDER, freq_hz);
        self.config.top = top;
        self.config.compare_b = if sounding { half_duty(top) } else { 0 };
        self.pwm.set_config(&self.config);
    }
}

impl ToneOutput for Buzzer<'_> {
    fn play(
        &mut self,
        tone: Tone,
    ) {
        self.configure(tone.frequency_hz(), true);
    }

    fn silence(&mut self) {
        self.config.compare_b = 0;
        self.pwm.set_config(&self.config);
    }
}
