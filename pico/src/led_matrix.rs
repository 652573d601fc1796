//! 5x5 WS2812 matrix driven by a PIO state machine.
//!
//! Bit timing and GRB serialization are handled by embassy-rp's PIO program;
//! this wrapper only pushes complete [`LedFrame`]s.

use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use noise_monitor::LedFrame;
use noise_monitor::config::LED_COUNT;

/// LED matrix on PIO0 state machine 0.
pub struct LedMatrix<'d> {
    ws2812: PioWs2812<'d, PIO0, 0, LED_COUNT>,
}

impl<'d> LedMatrix<'d> {
    pub fn new(ws2812: PioWs2812<'d, PIO0, 0, LED_COUNT>) -> Self { Self { ws2812 } }

    /// Flush a full frame (25 cells, no partial writes).
    pub async fn write(
        &mut self,
        frame: &LedFrame,
    ) {
        self.ws2812.write(frame.cells()).await;
    }

    /// Turn every cell off.
    pub async fn clear(&mut self) { self.write(&LedFrame::off()).await; }
}
