//! Analog microphone on the RP2350 ADC.

use defmt::warn;
use embassy_rp::adc::{Adc, Blocking, Channel};
use noise_monitor::Sampler;

/// Microphone module wired to one ADC input, read synchronously.
pub struct Microphone<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
    last_raw: u16,
}

impl<'d> Microphone<'d> {
    pub fn new(
        adc: Adc<'d, Blocking>,
        channel: Channel<'d>,
    ) -> Self {
        Self {
            adc,
            channel,
            last_raw: 0,
        }
    }
}

impl Sampler for Microphone<'_> {
    /// One blocking conversion.
    ///
    /// A failed conversion repeats the last good code so the loop keeps its
    /// cadence; it is logged but never surfaced.
    fn read_raw(&mut self) -> u16 {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(raw) => {
                self.last_raw = raw;
                raw
            }
            Err(e) => {
                warn!("ADC conversion failed: {}", e);
                self.last_raw
            }
        }
    }
}
