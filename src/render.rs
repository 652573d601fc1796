//! OLED content for each mode.
//!
//! Every update clears the whole target and redraws it; there is no partial
//! update or dirty tracking. Rendering the same [`DisplayContent`] twice
//! produces the same frame.

use core::fmt::Write;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::text::Text;
use heapless::String;

use crate::config::{ADC_MAX, BAR_HEIGHT, BAR_MAX_WIDTH, BAR_TOP, TEXT_ROW_0, TEXT_ROW_1};
use crate::mode::Mode;
use crate::sampler::SampleReading;
use crate::styles::{BAR_FILL, HEADLINE_STYLE, TEXT_STYLE, TOP_LEFT};

/// Message shown while monitoring is switched off.
pub const OFF_MESSAGE: &str = "Monitoring OFF";

/// What the OLED shows for one update.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayContent {
    /// Live level: raw code, voltage, proportional bar.
    Level { raw: u16, voltage: f32 },
    /// Number of alarms since boot.
    AlarmCount(u32),
    /// Static "off" message.
    Off,
}

impl DisplayContent {
    /// Content for the live level screen.
    #[inline]
    pub const fn level(reading: SampleReading) -> Self {
        Self::Level {
            raw: reading.raw,
            voltage: reading.voltage,
        }
    }

    /// Content for a resolved mode. `reading` is only used in
    /// [`Mode::Monitoring`]; a missing reading shows as silence.
    pub fn for_mode(
        mode: Mode,
        reading: Option<SampleReading>,
        alarm_count: u32,
    ) -> Self {
        match mode {
            Mode::AlarmCountDisplay => Self::AlarmCount(alarm_count),
            Mode::Monitoring => Self::level(reading.unwrap_or(SampleReading::from_raw(0))),
            Mode::Off => Self::Off,
        }
    }
}

/// Width of the level bar for a raw code, `round(raw * 128 / ADC_MAX)`.
#[inline]
pub const fn bar_width(raw: u16) -> u32 {
    let max = ADC_MAX as u32;
    let raw = if raw > ADC_MAX { max } else { raw as u32 };
    (raw * BAR_MAX_WIDTH + max / 2) / max
}

/// Clear `display` and draw `content`.
pub fn render<D>(
    content: &DisplayContent,
    display: &mut D,
) where
    D: DrawTarget<Color = BinaryColor>,
{
    display.clear(BinaryColor::Off).ok();

    match *content {
        DisplayContent::Level { raw, voltage } => {
            let mut line: String<24> = String::new();
            write!(line, "ADC: {raw}").ok();
            Text::with_text_style(&line, Point::new(0, TEXT_ROW_0), TEXT_STYLE, TOP_LEFT)
                .draw(display)
                .ok();

            line.clear();
            write!(line, "Voltage {voltage:.2} V").ok();
            Text::with_text_style(&line, Point::new(0, TEXT_ROW_1), TEXT_STYLE, TOP_LEFT)
                .draw(display)
                .ok();

            Rectangle::new(Point::new(0, BAR_TOP), Size::new(bar_width(raw), BAR_HEIGHT))
                .into_styled(BAR_FILL)
                .draw(display)
                .ok();
        }
        DisplayContent::AlarmCount(count) => {
            let mut line: String<24> = String::new();
            write!(line, "Alarms {count}").ok();
            Text::with_text_style(&line, Point::new(0, TEXT_ROW_0), HEADLINE_STYLE, TOP_LEFT)
                .draw(display)
                .ok();
        }
        DisplayContent::Off => {
            Text::with_text_style(OFF_MESSAGE, Point::new(0, TEXT_ROW_0), TEXT_STYLE, TOP_LEFT)
                .draw(display)
                .ok();
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
