//! LED matrix frame.
//!
//! The 5x5 WS2812 matrix is always written as a complete frame. Colors are
//! scaled by [`MAX_BRIGHTNESS_PERCENT`] when they are stored, so a frame
//! always holds exactly the values that go on the wire.

use smart_leds::RGB8;

use crate::config::{LED_COUNT, MAX_BRIGHTNESS_PERCENT};

/// Apply the global brightness cap to one channel.
#[inline]
pub const fn scale(value: u8) -> u8 { (value as u16 * MAX_BRIGHTNESS_PERCENT / 100) as u8 }

/// Full color set for all 25 cells.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LedFrame([RGB8; LED_COUNT]);

impl LedFrame {
    /// All cells dark.
    pub const fn off() -> Self { Self([RGB8 { r: 0, g: 0, b: 0 }; LED_COUNT]) }

    /// Every cell set to the same (capped) color.
    pub const fn filled(
        r: u8,
        g: u8,
        b: u8,
    ) -> Self {
        Self(
            [RGB8 {
                r: scale(r),
                g: scale(g),
                b: scale(b),
            }; LED_COUNT],
        )
    }

    /// Flat green glow used while monitoring.
    #[inline]
    pub const fn glow(brightness: u8) -> Self { Self::filled(0, brightness, 0) }

    /// Full red used by the alarm's high-tone stage.
    #[inline]
    pub const fn alarm_red() -> Self { Self::filled(255, 0, 0) }

    /// Whether every cell is dark.
    pub fn is_off(&self) -> bool { self.0.iter().all(|c| c.r == 0 && c.g == 0 && c.b == 0) }

    /// Cell colors in strip order, as handed to the WS2812 driver.
    #[inline]
    pub const fn cells(&self) -> &[RGB8; LED_COUNT] { &self.0 }
}

impl Default for LedFrame {
    fn default() -> Self { Self::off() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_caps_full_channel() {
        assert_eq!(scale(255), 25);
        assert_eq!(scale(0), 0);
        assert_eq!(scale(9), 0);
        assert_eq!(scale(10), 1);
    }

    #[test]
    fn test_off_frame() {
        assert!(LedFrame::off().is_off());
        assert!(LedFrame::default().is_off());
    }

    #[test]
    fn test_glow_is_green_only_and_uniform() {
        let frame = LedFrame::glow(200);
        for cell in frame.cells() {
            assert_eq!(*cell, RGB8 { r: 0, g: 20, b: 0 });
        }
    }

    #[test]
    fn test_zero_glow_is_off() {
        assert!(LedFrame::glow(0).is_off());
    }

    #[test]
    fn test_alarm_red() {
        let frame = LedFrame::alarm_red();
        assert!(frame.cells().iter().all(|c| *c == RGB8 { r: 25, g: 0, b: 0 }));
    }
}
