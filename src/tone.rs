//! Buzzer tones.
//!
//! The buzzer is a passive transducer driven by a PWM square wave. Only a
//! few fixed frequencies are used, so tones are an enum rather than a free
//! frequency.

use crate::config::{ALARM_HIGH_TONE_HZ, ALARM_LOW_TONE_HZ};

/// Discrete tones the alarm can play.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tone {
    /// First stage of each repetition (400 Hz).
    Low,
    /// Second stage of each repetition (600 Hz).
    High,
}

impl Tone {
    /// Frequency in hertz.
    #[inline]
    pub const fn frequency_hz(self) -> u32 {
        match self {
            Self::Low => ALARM_LOW_TONE_HZ,
            Self::High => ALARM_HIGH_TONE_HZ,
        }
    }
}

/// Audible output channel.
pub trait ToneOutput {
    /// Start (or switch to) a tone at 50% duty.
    fn play(
        &mut self,
        tone: Tone,
    );

    /// Stop sounding. The carrier may keep running at 0% duty.
    fn silence(&mut self);
}

/// PWM wrap (`top`) value producing `freq_hz` from `clock_hz` after an
/// integer clock divider.
///
/// The counter runs `0..=top`, so the period is `top + 1` ticks. Results that
/// do not fit the 16-bit counter saturate at `u16::MAX`; pick a divider that
/// keeps the lowest tone in range.
pub const fn pwm_top(
    clock_hz: u32,
    divider: u8,
    freq_hz: u32,
) -> u16 {
    let divider = if divider == 0 { 1 } else { divider as u32 };
    let freq_hz = if freq_hz == 0 { 1 } else { freq_hz };
    let ticks = clock_hz / divider / freq_hz;
    if ticks == 0 {
        0
    } else if ticks - 1 > u16::MAX as u32 {
        u16::MAX
    } else {
        (ticks - 1) as u16
    }
}

/// Compare value for a 50% duty square wave.
#[inline]
pub const fn half_duty(top: u16) -> u16 { top / 2 }
